use super::*;
use crate::foundation::core::Checkpoint;

#[test]
fn parses_every_step_kind() {
    let script = ReplayScript::from_json(
        r#"{
          "steps": [
            { "op": "event", "event": "StoryHasTwoPages" },
            { "op": "story", "page_count": 5, "element_count": 2 },
            { "op": "register", "category": "PRIORITY", "id": "a", "failing": true },
            { "op": "unregister", "category": "PRIORITY", "id": "a" },
            { "op": "request_review" },
            { "op": "reset_review" },
            { "op": "report_high_priority", "count": 2 },
            { "op": "snapshot" }
          ]
        }"#,
    )
    .unwrap();
    assert_eq!(script.steps.len(), 8);
    assert_eq!(script.opts, SessionOpts::default());
    assert_eq!(
        script.steps[1],
        ReplayStep::Story(StoryStats {
            page_count: 5,
            element_count: 2,
            is_published: false,
        })
    );
}

#[test]
fn explicit_mode_only_collects_snapshot_steps() {
    let script = ReplayScript {
        opts: SessionOpts::default(),
        steps: vec![
            ReplayStep::Event {
                event: CheckpointEvent::InitialElementAdded,
            },
            ReplayStep::Register {
                category: Category::Design,
                id: CheckId::from("pageTooManyLinks"),
                failing: true,
            },
            ReplayStep::Snapshot,
        ],
    };
    let snaps = replay(&script).unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].checkpoint, Checkpoint::OnlyRecommended);
    assert_eq!(snaps[0].badge(Category::Design), 1);
    assert_eq!(snaps[0].expand, Some(Category::Design));
}

#[test]
fn every_step_mode_snapshots_after_each_step() {
    let script = ReplayScript {
        opts: SessionOpts::default(),
        steps: vec![
            ReplayStep::Event {
                event: CheckpointEvent::StoryHasTwoPages,
            },
            ReplayStep::Event {
                event: CheckpointEvent::StoryHasFivePages,
            },
        ],
    };
    let snaps = replay_with(&script, ReplayMode::EveryStep).unwrap();
    let checkpoints: Vec<_> = snaps.iter().map(|s| s.checkpoint).collect();
    assert_eq!(
        checkpoints,
        vec![Checkpoint::OnlyRecommended, Checkpoint::All]
    );
    assert_eq!(snaps[1].expand, Some(Category::Priority));
}

#[test]
fn blank_ids_and_bad_opts_are_rejected() {
    let err = ReplayScript::from_json(
        r#"{ "steps": [ { "op": "register", "category": "DESIGN", "id": "", "failing": true } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ChecklistError::Validation(_)));

    let err = ReplayScript::from_json(
        r#"{ "opts": { "observer": { "two_page_threshold": 9 } }, "steps": [] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ChecklistError::Validation(_)));
}

#[test]
fn unknown_ops_are_serde_errors() {
    let err = ReplayScript::from_json(r#"{ "steps": [ { "op": "explode" } ] }"#).unwrap_err();
    assert!(matches!(err, ChecklistError::Serde(_)));
}

use super::*;

#[test]
fn checkpoint_order_follows_progression() {
    assert!(Checkpoint::Unavailable < Checkpoint::OnlyRecommended);
    assert!(Checkpoint::OnlyRecommended < Checkpoint::All);
    assert_eq!(Checkpoint::default(), Checkpoint::Unavailable);
}

#[test]
fn names_match_serde_identifiers() {
    for cp in Checkpoint::ALL_STATES {
        let json = serde_json::to_string(&cp).unwrap();
        assert_eq!(json, format!("\"{}\"", cp.name()));
    }
    for c in Category::ALL {
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, format!("\"{c}\""));
    }
}

#[test]
fn category_index_matches_all_order() {
    for (i, c) in Category::ALL.into_iter().enumerate() {
        assert_eq!(c.index(), i);
    }
}

#[test]
fn category_set_membership_and_order() {
    let set = CategorySet::of(&[Category::Accessibility, Category::Design]);
    assert_eq!(set.len(), 2);
    assert!(set.contains(Category::Design));
    assert!(!set.contains(Category::Priority));
    assert_eq!(
        set.iter().collect::<Vec<_>>(),
        vec![Category::Design, Category::Accessibility]
    );
    assert!(CategorySet::EMPTY.is_empty());
    assert_eq!(
        serde_json::to_value(set).unwrap(),
        serde_json::json!(["DESIGN", "ACCESSIBILITY"])
    );
}

#[test]
fn blank_check_ids_are_detected() {
    assert!(CheckId::from("  ").is_blank());
    let id = CheckId::from("videoOptimization");
    assert!(!id.is_blank());
    assert_eq!(id.as_str(), "videoOptimization");
    assert_eq!(id.to_string(), "videoOptimization");
}

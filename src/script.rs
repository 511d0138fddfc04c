//! JSON replay scripts.
//!
//! A script is a list of steps fed to a fresh [`ChecklistSession`], useful for
//! reproducing checklist behaviour outside the editor:
//!
//! ```json
//! {
//!   "opts": { "sync_high_priority": true },
//!   "steps": [
//!     { "op": "event", "event": "InitialElementAdded" },
//!     { "op": "register", "category": "DESIGN", "id": "pageTooManyLinks", "failing": true },
//!     { "op": "snapshot" }
//!   ]
//! }
//! ```

use crate::checkpoint::event::CheckpointEvent;
use crate::foundation::core::{Category, CheckId};
use crate::foundation::error::{ChecklistError, ChecklistResult};
use crate::panel::PanelSnapshot;
use crate::session::{ChecklistSession, SessionOpts};
use crate::story::observer::StoryStats;

/// A session replay: options plus ordered steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplayScript {
    /// Session options.
    #[serde(default)]
    pub opts: SessionOpts,
    /// Steps applied in order.
    pub steps: Vec<ReplayStep>,
}

/// One replay step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Dispatch a lifecycle event.
    Event {
        /// Event to dispatch.
        event: CheckpointEvent,
    },
    /// Observe new story statistics.
    Story(StoryStats),
    /// Register a check result.
    Register {
        /// Check category.
        category: Category,
        /// Check identifier.
        id: CheckId,
        /// Whether the issue is present.
        failing: bool,
    },
    /// Unregister a check.
    Unregister {
        /// Check category.
        category: Category,
        /// Check identifier.
        id: CheckId,
    },
    /// User asked for a full review.
    RequestReview,
    /// Review request consumed.
    ResetReview,
    /// Explicit high-priority count report.
    ReportHighPriority {
        /// Failing priority checks.
        count: usize,
    },
    /// Capture a [`PanelSnapshot`].
    Snapshot,
}

/// Which snapshots [`replay_with`] collects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayMode {
    /// Only at explicit `snapshot` steps.
    #[default]
    Explicit,
    /// After every step, plus explicit `snapshot` steps.
    EveryStep,
}

impl ReplayScript {
    /// Parse a script from JSON.
    pub fn from_json(s: &str) -> ChecklistResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject scripts that could not run.
    pub fn validate(&self) -> ChecklistResult<()> {
        self.opts.observer.validate()?;
        for (i, step) in self.steps.iter().enumerate() {
            let id = match step {
                ReplayStep::Register { id, .. } | ReplayStep::Unregister { id, .. } => id,
                _ => continue,
            };
            if id.is_blank() {
                return Err(ChecklistError::validation(format!(
                    "step {i}: check id must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Run `script` and return the snapshots taken at `snapshot` steps.
pub fn replay(script: &ReplayScript) -> ChecklistResult<Vec<PanelSnapshot>> {
    replay_with(script, ReplayMode::Explicit)
}

/// Run `script`, collecting snapshots according to `mode`.
#[tracing::instrument(skip(script), fields(steps = script.steps.len()))]
pub fn replay_with(script: &ReplayScript, mode: ReplayMode) -> ChecklistResult<Vec<PanelSnapshot>> {
    script.validate()?;
    let mut session = ChecklistSession::new(script.opts)?;
    let mut out = Vec::new();

    for step in &script.steps {
        match step {
            ReplayStep::Event { event } => {
                session.dispatch(*event)?;
            }
            ReplayStep::Story(stats) => {
                session.observe_story(stats)?;
            }
            ReplayStep::Register {
                category,
                id,
                failing,
            } => session.register_check(*category, id.clone(), *failing)?,
            ReplayStep::Unregister { category, id } => {
                session.unregister_check(*category, id)?;
            }
            ReplayStep::RequestReview => {
                session.request_review()?;
            }
            ReplayStep::ResetReview => session.reset_review_request()?,
            ReplayStep::ReportHighPriority { count } => {
                session.report_high_priority_count(*count)?
            }
            ReplayStep::Snapshot => {
                out.push(session.snapshot()?);
                continue;
            }
        }
        if mode == ReplayMode::EveryStep {
            out.push(session.snapshot()?);
        }
    }

    session.end();
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;

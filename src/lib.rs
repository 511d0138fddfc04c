//! Pre-publish checklist engine for a web story editor.
//!
//! Two pieces of state back the checklist panel:
//!
//! 1. **[`CheckpointMachine`]**: a three-state progression
//!    (`Unavailable -> OnlyRecommended -> All`) driven by document-lifecycle
//!    [`CheckpointEvent`]s. It decides which [`Category`] of advice is unlocked.
//! 2. **[`CheckRegistry`]**: per-category map of mounted checks to "issue
//!    present" flags. Counts are a pure function of the current entries.
//!
//! Pure policy functions ([`visible_categories`], [`badge_count`],
//! [`default_expanded_category`], [`is_empty_state`], [`should_prompt_review`])
//! turn both into what the panel shows. [`ChecklistSession`] is the context
//! object that owns the state for one editor instance; [`CheckScheduler`]
//! mounts and unmounts [`Check`]s so the registry never keeps stale entries.
//!
//! Everything is synchronous. Deferred checks report through a
//! [`PendingEvaluation`] token that is discarded if the check unmounts first.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod checkpoint;
mod foundation;
mod panel;
mod policy;
mod registry;
/// JSON session replay.
pub mod script;
mod session;
mod story;

pub use checkpoint::event::CheckpointEvent;
pub use checkpoint::machine::{
    CheckpointMachine, ReviewDialogState, should_prompt_review, transition,
};
pub use foundation::core::{Category, CategorySet, CheckId, Checkpoint};
pub use foundation::error::{ChecklistError, ChecklistResult};
pub use panel::{CategoryBadge, PanelSnapshot};
pub use policy::expansion::{ExpansionTracker, default_expanded_category};
pub use policy::visibility::{badge_count, is_empty_state, visible_categories};
pub use registry::check::{Check, CheckScheduler, Evaluation, PendingEvaluation, SyncReport};
pub use registry::store::{CheckRegistry, CountsSnapshot};
pub use script::{ReplayMode, ReplayScript, ReplayStep, replay, replay_with};
pub use session::{ChecklistSession, SessionOpts};
pub use story::observer::{ObserverOpts, StoryObserver, StoryStats};

//! Checkpoint progression.
//!
//! [`transition`] is the whole transition table; [`CheckpointMachine`] wraps it
//! with the session-scoped readouts (high-priority count, review request).

use crate::checkpoint::event::CheckpointEvent;
use crate::foundation::core::Checkpoint;

/// Apply one event to a checkpoint.
///
/// Pairs missing from the table return `state` unchanged. `All` accepts no
/// events, and `Unavailable` only reaches `All` through publish events; the
/// five-page event needs `OnlyRecommended` first.
pub fn transition(state: Checkpoint, event: CheckpointEvent) -> Checkpoint {
    use Checkpoint::{All, OnlyRecommended, Unavailable};
    use CheckpointEvent::*;

    match (state, event) {
        (Unavailable, InitialElementAdded) => OnlyRecommended,
        (Unavailable, StoryHasTwoPages) => OnlyRecommended,
        (Unavailable, PublishClicked) => All,
        (Unavailable, StoryIsPublished) => All,
        (OnlyRecommended, StoryHasFivePages) => All,
        (OnlyRecommended, PublishClicked) => All,
        (OnlyRecommended, StoryIsPublished) => All,
        (s, _) => s,
    }
}

/// Whether the "review before publish" nudge should be shown.
pub fn should_prompt_review(checkpoint: Checkpoint, high_priority_count: usize) -> bool {
    high_priority_count > 0
        || matches!(
            checkpoint,
            Checkpoint::Unavailable | Checkpoint::OnlyRecommended
        )
}

/// One-shot flag raised when the user explicitly asks for a full review.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewDialogState {
    /// Set by [`CheckpointMachine::request_review`], cleared once consumed.
    pub review_requested: bool,
}

/// Session-scoped checkpoint state.
#[derive(Clone, Debug, Default)]
pub struct CheckpointMachine {
    checkpoint: Checkpoint,
    high_priority_count: usize,
    review: ReviewDialogState,
}

impl CheckpointMachine {
    /// Machine at [`Checkpoint::Unavailable`] with nothing reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current checkpoint.
    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    /// Feed one event through [`transition`] and return the resulting checkpoint.
    pub fn dispatch(&mut self, event: CheckpointEvent) -> Checkpoint {
        let from = self.checkpoint;
        let to = transition(from, event);
        if to == from {
            tracing::trace!(checkpoint = %from, %event, "checkpoint event ignored");
        } else {
            tracing::debug!(%from, %event, %to, "checkpoint advanced");
            self.checkpoint = to;
        }
        to
    }

    /// Last reported number of failing priority checks.
    pub fn high_priority_count(&self) -> usize {
        self.high_priority_count
    }

    /// Record the latest failing priority count. Does not affect transitions.
    pub fn set_high_priority_count(&mut self, count: usize) {
        self.high_priority_count = count;
    }

    /// See [`should_prompt_review`].
    pub fn should_prompt_review(&self) -> bool {
        should_prompt_review(self.checkpoint, self.high_priority_count)
    }

    /// Raise the review flag and fire [`CheckpointEvent::PublishClicked`].
    pub fn request_review(&mut self) -> Checkpoint {
        self.review.review_requested = true;
        self.dispatch(CheckpointEvent::PublishClicked)
    }

    /// Clear the review flag. The checkpoint is left untouched.
    pub fn reset_review_request(&mut self) {
        self.review.review_requested = false;
    }

    /// Whether a review request is pending.
    pub fn review_requested(&self) -> bool {
        self.review.review_requested
    }

    /// Copy of the review dialog state.
    pub fn review_state(&self) -> ReviewDialogState {
        self.review
    }
}

#[cfg(test)]
#[path = "../../tests/unit/checkpoint/machine.rs"]
mod tests;

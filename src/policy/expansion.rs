use crate::foundation::core::{Category, Checkpoint};

/// Panel that opens automatically when `checkpoint` is entered.
pub fn default_expanded_category(checkpoint: Checkpoint) -> Option<Category> {
    match checkpoint {
        Checkpoint::Unavailable => None,
        Checkpoint::OnlyRecommended => Some(Category::Design),
        Checkpoint::All => Some(Category::Priority),
    }
}

/// Fires [`default_expanded_category`] once per checkpoint change.
///
/// Repeated observations of the same checkpoint (re-renders) yield `None`.
/// The tracker compares against the last observed checkpoint only: if the
/// machine moves through several checkpoints between two observations (e.g.
/// `Unavailable -> OnlyRecommended -> All` in one story update), a single
/// expansion fires for the checkpoint observed last.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpansionTracker {
    last_seen: Checkpoint,
}

impl ExpansionTracker {
    /// Tracker that has seen [`Checkpoint::Unavailable`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Last checkpoint passed to [`ExpansionTracker::observe`].
    pub fn last_seen(&self) -> Checkpoint {
        self.last_seen
    }

    /// Record `checkpoint`; returns the category to expand if it just changed.
    pub fn observe(&mut self, checkpoint: Checkpoint) -> Option<Category> {
        if checkpoint == self.last_seen {
            return None;
        }
        self.last_seen = checkpoint;
        default_expanded_category(checkpoint)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/policy/expansion.rs"]
mod tests;

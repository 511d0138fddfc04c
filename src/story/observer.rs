//! Derives lifecycle events from coarse story statistics.

use crate::checkpoint::event::CheckpointEvent;
use crate::foundation::error::{ChecklistError, ChecklistResult};

/// The slice of story state the checkpoint machine cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoryStats {
    /// Number of pages.
    #[serde(default)]
    pub page_count: usize,
    /// Number of elements across all pages, background elements excluded.
    #[serde(default)]
    pub element_count: usize,
    /// Whether the story has been published.
    #[serde(default)]
    pub is_published: bool,
}

/// Page-count thresholds for the page events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ObserverOpts {
    /// Page count that fires [`CheckpointEvent::StoryHasTwoPages`].
    pub two_page_threshold: usize,
    /// Page count that fires [`CheckpointEvent::StoryHasFivePages`].
    pub five_page_threshold: usize,
}

impl Default for ObserverOpts {
    fn default() -> Self {
        Self {
            two_page_threshold: 2,
            five_page_threshold: 5,
        }
    }
}

impl ObserverOpts {
    /// Thresholds must be positive and strictly increasing.
    pub fn validate(&self) -> ChecklistResult<()> {
        if self.two_page_threshold == 0 {
            return Err(ChecklistError::validation("two_page_threshold must be > 0"));
        }
        if self.two_page_threshold >= self.five_page_threshold {
            return Err(ChecklistError::validation(
                "two_page_threshold must be < five_page_threshold",
            ));
        }
        Ok(())
    }
}

/// Edge detector turning [`StoryStats`] updates into [`CheckpointEvent`]s.
#[derive(Clone, Debug, Default)]
pub struct StoryObserver {
    opts: ObserverOpts,
    last: StoryStats,
}

impl StoryObserver {
    /// Observer starting from an empty, unpublished story.
    pub fn new(opts: ObserverOpts) -> ChecklistResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            last: StoryStats::default(),
        })
    }

    /// Thresholds in use.
    pub fn opts(&self) -> ObserverOpts {
        self.opts
    }

    /// Record `stats` and return the events whose condition just became true.
    ///
    /// Order: element, two pages, five pages, published. A condition that
    /// drops back to false re-arms its event.
    pub fn observe(&mut self, stats: &StoryStats) -> Vec<CheckpointEvent> {
        let prev = std::mem::replace(&mut self.last, *stats);
        let rising = |was: bool, now: bool| !was && now;
        let two = self.opts.two_page_threshold;
        let five = self.opts.five_page_threshold;

        let mut out = Vec::new();
        if rising(prev.element_count > 0, stats.element_count > 0) {
            out.push(CheckpointEvent::InitialElementAdded);
        }
        if rising(prev.page_count >= two, stats.page_count >= two) {
            out.push(CheckpointEvent::StoryHasTwoPages);
        }
        if rising(prev.page_count >= five, stats.page_count >= five) {
            out.push(CheckpointEvent::StoryHasFivePages);
        }
        if rising(prev.is_published, stats.is_published) {
            out.push(CheckpointEvent::StoryIsPublished);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/observer.rs"]
mod tests;

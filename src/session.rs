//! The checklist context object.
//!
//! One [`ChecklistSession`] per editor instance owns the checkpoint machine and
//! the check registry. Collaborators receive it by reference; nothing else
//! mutates either piece of state.

use crate::checkpoint::event::CheckpointEvent;
use crate::checkpoint::machine::CheckpointMachine;
use crate::foundation::core::{Category, CheckId, Checkpoint};
use crate::foundation::error::{ChecklistError, ChecklistResult};
use crate::panel::PanelSnapshot;
use crate::policy::expansion::ExpansionTracker;
use crate::registry::check::{CheckScheduler, PendingEvaluation, SyncReport};
use crate::registry::store::{CheckRegistry, CountsSnapshot};
use crate::story::observer::{ObserverOpts, StoryObserver, StoryStats};

/// Options for a [`ChecklistSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Page thresholds for story observation.
    pub observer: ObserverOpts,
    /// Feed the priority count back into the machine after every registry change.
    pub sync_high_priority: bool,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            observer: ObserverOpts::default(),
            sync_high_priority: true,
        }
    }
}

/// Checkpoint machine, check registry and derived policy for one editing session.
#[derive(Debug)]
pub struct ChecklistSession {
    opts: SessionOpts,
    machine: CheckpointMachine,
    registry: CheckRegistry,
    observer: StoryObserver,
    expansion: ExpansionTracker,
}

impl ChecklistSession {
    /// Start a session at [`Checkpoint::Unavailable`] with an empty registry.
    pub fn new(opts: SessionOpts) -> ChecklistResult<Self> {
        let observer = StoryObserver::new(opts.observer)?;
        tracing::debug!(?opts, "checklist session started");
        Ok(Self {
            opts,
            machine: CheckpointMachine::new(),
            registry: CheckRegistry::new(),
            observer,
            expansion: ExpansionTracker::new(),
        })
    }

    /// Options in use.
    pub fn opts(&self) -> SessionOpts {
        self.opts
    }

    /// Whether the session still accepts operations.
    pub fn is_active(&self) -> bool {
        self.registry.is_active()
    }

    /// End the session. Later operations fail with [`ChecklistError::Scope`].
    pub fn end(&mut self) {
        if self.registry.is_active() {
            tracing::debug!(checkpoint = %self.machine.checkpoint(), "checklist session ended");
        }
        self.registry.close();
    }

    fn ensure_active(&self, op: &str) -> ChecklistResult<()> {
        if self.registry.is_active() {
            return Ok(());
        }
        tracing::warn!(op, "checklist session used after it ended");
        Err(ChecklistError::scope(format!(
            "{op} called outside of an active checklist session"
        )))
    }

    /// Read-only view of the machine.
    pub fn machine(&self) -> &CheckpointMachine {
        &self.machine
    }

    /// Read-only view of the registry.
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Current checkpoint.
    pub fn checkpoint(&self) -> Checkpoint {
        self.machine.checkpoint()
    }

    // =========================================================================
    // Checkpoint
    // =========================================================================

    /// Feed a lifecycle event to the machine.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, event: CheckpointEvent) -> ChecklistResult<Checkpoint> {
        self.ensure_active("dispatch")?;
        Ok(self.machine.dispatch(event))
    }

    /// Derive lifecycle events from `stats` and dispatch them in order.
    pub fn observe_story(&mut self, stats: &StoryStats) -> ChecklistResult<Checkpoint> {
        self.ensure_active("observe_story")?;
        for event in self.observer.observe(stats) {
            self.machine.dispatch(event);
        }
        Ok(self.machine.checkpoint())
    }

    /// Raise the review flag and fire `PublishClicked`.
    pub fn request_review(&mut self) -> ChecklistResult<Checkpoint> {
        self.ensure_active("request_review")?;
        Ok(self.machine.request_review())
    }

    /// Clear the review flag once the request was acted on.
    pub fn reset_review_request(&mut self) -> ChecklistResult<()> {
        self.ensure_active("reset_review_request")?;
        self.machine.reset_review_request();
        Ok(())
    }

    /// Whether a review request is pending.
    pub fn review_requested(&self) -> bool {
        self.machine.review_requested()
    }

    /// Report the failing priority count explicitly.
    pub fn report_high_priority_count(&mut self, count: usize) -> ChecklistResult<()> {
        self.ensure_active("report_high_priority_count")?;
        self.machine.set_high_priority_count(count);
        Ok(())
    }

    /// See [`crate::should_prompt_review`].
    pub fn should_prompt_review(&self) -> bool {
        self.machine.should_prompt_review()
    }

    // =========================================================================
    // Registry
    // =========================================================================

    fn after_registry_change(&mut self) -> ChecklistResult<()> {
        if self.opts.sync_high_priority {
            let count = self.registry.category_count(Category::Priority)?;
            self.machine.set_high_priority_count(count);
        }
        Ok(())
    }

    /// Upsert a check result.
    pub fn register_check(
        &mut self,
        category: Category,
        id: impl Into<CheckId>,
        is_failing: bool,
    ) -> ChecklistResult<()> {
        self.registry.register_check(category, id, is_failing)?;
        self.after_registry_change()
    }

    /// Remove a check result. Returns whether it was present.
    pub fn unregister_check(&mut self, category: Category, id: &CheckId) -> ChecklistResult<bool> {
        let removed = self.registry.unregister_check(category, id)?;
        self.after_registry_change()?;
        Ok(removed)
    }

    /// Failing checks under `category`, visible or not.
    pub fn category_count(&self, category: Category) -> ChecklistResult<usize> {
        self.registry.category_count(category)
    }

    /// Failing checks across every category.
    pub fn total_active_count(&self) -> ChecklistResult<usize> {
        self.registry.total_active_count()
    }

    /// All counts from one registry state.
    pub fn counts(&self) -> ChecklistResult<CountsSnapshot> {
        self.registry.snapshot()
    }

    /// Mount and evaluate `scheduler`'s checks for the current checkpoint.
    pub fn sync_checks<S>(
        &mut self,
        scheduler: &mut CheckScheduler<S>,
        story: &S,
    ) -> ChecklistResult<SyncReport> {
        self.ensure_active("sync_checks")?;
        let report = scheduler.sync(self.machine.checkpoint(), story, &mut self.registry)?;
        self.after_registry_change()?;
        Ok(report)
    }

    /// Commit a deferred result through `scheduler`. Returns whether it was kept.
    pub fn resolve_async<S>(
        &mut self,
        scheduler: &CheckScheduler<S>,
        pending: PendingEvaluation,
        is_failing: bool,
    ) -> ChecklistResult<bool> {
        self.ensure_active("resolve_async")?;
        let kept = scheduler.resolve(pending, is_failing, &mut self.registry)?;
        self.after_registry_change()?;
        Ok(kept)
    }

    /// Mount one check from `scheduler`. Returns `false` if it was already mounted.
    ///
    /// The check is evaluated on the next [`ChecklistSession::sync_checks`].
    pub fn attach_check<S>(
        &mut self,
        scheduler: &mut CheckScheduler<S>,
        category: Category,
        id: &CheckId,
    ) -> ChecklistResult<bool> {
        self.ensure_active("attach_check")?;
        let attached = scheduler.attach(category, id)?;
        self.after_registry_change()?;
        Ok(attached)
    }

    /// Unmount one check from `scheduler` and drop its registry entry.
    ///
    /// Deferred results issued before the unmount are discarded when resolved.
    /// Prefer this over [`ChecklistSession::unregister_check`] for scheduled
    /// checks, which leaves the check mounted.
    pub fn detach_check<S>(
        &mut self,
        scheduler: &mut CheckScheduler<S>,
        category: Category,
        id: &CheckId,
    ) -> ChecklistResult<bool> {
        self.ensure_active("detach_check")?;
        let detached = scheduler.detach(category, id, &mut self.registry)?;
        self.after_registry_change()?;
        Ok(detached)
    }

    /// Detach every check in `scheduler` (editor teardown).
    pub fn detach_checks<S>(
        &mut self,
        scheduler: &mut CheckScheduler<S>,
    ) -> ChecklistResult<usize> {
        self.ensure_active("detach_checks")?;
        let detached = scheduler.detach_all(&mut self.registry)?;
        self.after_registry_change()?;
        Ok(detached)
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Read the panel state. The auto-expand category is reported on the first
    /// read after each checkpoint change and `None` afterwards. Several
    /// transitions between two reads report only the latest checkpoint's panel.
    pub fn snapshot(&mut self) -> ChecklistResult<PanelSnapshot> {
        let counts = self.registry.snapshot()?;
        let expand = self.expansion.observe(self.machine.checkpoint());
        Ok(PanelSnapshot::build(&self.machine, counts, expand))
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;

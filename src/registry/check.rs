//! Check evaluators and their mount lifecycle.
//!
//! A [`Check`] is declared once and mounted (attached) only while its category
//! is visible. Attaching and detaching go through [`CheckScheduler`], which
//! keeps the registry in step: a detached check never leaves an entry behind.

use std::fmt;

use crate::foundation::core::{Category, CheckId, Checkpoint};
use crate::foundation::error::{ChecklistError, ChecklistResult};
use crate::policy::visibility::visible_categories;
use crate::registry::store::CheckRegistry;

type Predicate<S> = Box<dyn Fn(&S) -> bool>;

/// How a check produces its result.
pub enum Evaluation<S> {
    /// Pure predicate over story state, re-run on every sync.
    Sync(Predicate<S>),
    /// Result arrives later through [`CheckScheduler::resolve`].
    Deferred,
}

/// A checklist check: identity, category and how it is evaluated.
pub struct Check<S> {
    id: CheckId,
    category: Category,
    evaluation: Evaluation<S>,
}

impl<S> Check<S> {
    /// Check evaluated synchronously by `predicate`; `true` means the issue is present.
    pub fn new(
        category: Category,
        id: impl Into<CheckId>,
        predicate: impl Fn(&S) -> bool + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            evaluation: Evaluation::Sync(Box::new(predicate)),
        }
    }

    /// Check whose result is reported asynchronously (network or media probes).
    pub fn deferred(category: Category, id: impl Into<CheckId>) -> Self {
        Self {
            id: id.into(),
            category,
            evaluation: Evaluation::Deferred,
        }
    }

    /// Check identifier.
    pub fn id(&self) -> &CheckId {
        &self.id
    }

    /// Check category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// True for [`Evaluation::Deferred`] checks.
    pub fn is_deferred(&self) -> bool {
        matches!(self.evaluation, Evaluation::Deferred)
    }

    /// Run the predicate. Deferred checks return `None`.
    pub fn evaluate(&self, story: &S) -> Option<bool> {
        match &self.evaluation {
            Evaluation::Sync(p) => Some(p(story)),
            Evaluation::Deferred => None,
        }
    }
}

impl<S> fmt::Debug for Check<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("deferred", &self.is_deferred())
            .finish()
    }
}

/// Token for an in-flight deferred evaluation.
///
/// Bound to the mount generation it was issued under; a result resolved after
/// the check was detached (or detached and re-attached) is discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEvaluation {
    category: Category,
    id: CheckId,
    generation: u64,
}

impl PendingEvaluation {
    /// Category of the pending check.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Identifier of the pending check.
    pub fn id(&self) -> &CheckId {
        &self.id
    }
}

/// What one [`CheckScheduler::sync`] call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Checks newly attached.
    pub attached: usize,
    /// Checks detached (and unregistered).
    pub detached: usize,
    /// Synchronous predicates run.
    pub evaluated: usize,
}

struct Slot<S> {
    check: Check<S>,
    mount: Option<u64>,
}

/// Owns declared checks and drives their attach/evaluate/detach lifecycle.
pub struct CheckScheduler<S> {
    slots: Vec<Slot<S>>,
    next_generation: u64,
}

impl<S> Default for CheckScheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for CheckScheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckScheduler")
            .field("checks", &self.slots.len())
            .field("attached", &self.attached_len())
            .finish()
    }
}

impl<S> CheckScheduler<S> {
    /// Scheduler with no declared checks.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_generation: 0,
        }
    }

    /// Declare a check. It starts detached.
    ///
    /// Identifiers must be non-empty and unique within their category.
    pub fn add(&mut self, check: Check<S>) -> ChecklistResult<()> {
        if check.id.is_blank() {
            return Err(ChecklistError::validation("check id must not be empty"));
        }
        if self.find(check.category, &check.id).is_some() {
            return Err(ChecklistError::validation(format!(
                "duplicate check '{}' in category {}",
                check.id, check.category
            )));
        }
        self.slots.push(Slot { check, mount: None });
        Ok(())
    }

    /// Builder form of [`CheckScheduler::add`].
    pub fn with(mut self, check: Check<S>) -> ChecklistResult<Self> {
        self.add(check)?;
        Ok(self)
    }

    /// Number of declared checks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no checks are declared.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of currently attached checks.
    pub fn attached_len(&self) -> usize {
        self.slots.iter().filter(|s| s.mount.is_some()).count()
    }

    /// Whether the check is currently attached.
    pub fn is_attached(&self, category: Category, id: &CheckId) -> bool {
        self.find(category, id)
            .is_some_and(|i| self.slots[i].mount.is_some())
    }

    fn find(&self, category: Category, id: &CheckId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.check.category == category && s.check.id == *id)
    }

    fn slot_index(&self, category: Category, id: &CheckId) -> ChecklistResult<usize> {
        self.find(category, id).ok_or_else(|| {
            ChecklistError::validation(format!("unknown check '{id}' in category {category}"))
        })
    }

    /// Attach one check. Returns `false` if it was already attached.
    pub fn attach(&mut self, category: Category, id: &CheckId) -> ChecklistResult<bool> {
        let i = self.slot_index(category, id)?;
        Ok(self.attach_slot(i))
    }

    fn attach_slot(&mut self, i: usize) -> bool {
        if self.slots[i].mount.is_some() {
            return false;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        let slot = &mut self.slots[i];
        slot.mount = Some(generation);
        tracing::debug!(
            check = %slot.check.id,
            category = %slot.check.category,
            generation,
            "check attached"
        );
        true
    }

    /// Detach one check and remove its registry entry.
    /// Returns `false` if it was not attached.
    pub fn detach(
        &mut self,
        category: Category,
        id: &CheckId,
        registry: &mut CheckRegistry,
    ) -> ChecklistResult<bool> {
        let i = self.slot_index(category, id)?;
        self.detach_slot(i, registry)
    }

    fn detach_slot(&mut self, i: usize, registry: &mut CheckRegistry) -> ChecklistResult<bool> {
        let slot = &mut self.slots[i];
        if slot.mount.take().is_none() {
            return Ok(false);
        }
        registry.unregister_check(slot.check.category, &slot.check.id)?;
        tracing::debug!(
            check = %slot.check.id,
            category = %slot.check.category,
            "check detached"
        );
        Ok(true)
    }

    /// Detach every attached check.
    pub fn detach_all(&mut self, registry: &mut CheckRegistry) -> ChecklistResult<usize> {
        let mut detached = 0;
        for i in 0..self.slots.len() {
            if self.detach_slot(i, registry)? {
                detached += 1;
            }
        }
        Ok(detached)
    }

    /// Re-run every attached synchronous check against `story`.
    pub fn evaluate_attached(
        &self,
        story: &S,
        registry: &mut CheckRegistry,
    ) -> ChecklistResult<usize> {
        let mut evaluated = 0;
        for slot in self.slots.iter().filter(|s| s.mount.is_some()) {
            if let Some(failing) = slot.check.evaluate(story) {
                registry.register_check(slot.check.category, slot.check.id.clone(), failing)?;
                evaluated += 1;
            }
        }
        Ok(evaluated)
    }

    /// Mount exactly the checks whose category is visible at `checkpoint`,
    /// then evaluate the mounted synchronous checks.
    pub fn sync(
        &mut self,
        checkpoint: Checkpoint,
        story: &S,
        registry: &mut CheckRegistry,
    ) -> ChecklistResult<SyncReport> {
        let visible = visible_categories(checkpoint);
        let mut report = SyncReport::default();

        for i in 0..self.slots.len() {
            if visible.contains(self.slots[i].check.category) {
                if self.attach_slot(i) {
                    report.attached += 1;
                }
            } else if self.detach_slot(i, registry)? {
                report.detached += 1;
            }
        }

        report.evaluated = self.evaluate_attached(story, registry)?;
        Ok(report)
    }

    /// Start a deferred evaluation for an attached check.
    /// Returns `None` when the check is not attached.
    pub fn begin_async(
        &self,
        category: Category,
        id: &CheckId,
    ) -> ChecklistResult<Option<PendingEvaluation>> {
        let i = self.slot_index(category, id)?;
        Ok(self.slots[i].mount.map(|generation| PendingEvaluation {
            category,
            id: id.clone(),
            generation,
        }))
    }

    /// Commit a deferred result if its check is still mounted under the same
    /// generation. Returns whether the result was registered.
    pub fn resolve(
        &self,
        pending: PendingEvaluation,
        is_failing: bool,
        registry: &mut CheckRegistry,
    ) -> ChecklistResult<bool> {
        let i = self.slot_index(pending.category, &pending.id)?;
        if self.slots[i].mount != Some(pending.generation) {
            tracing::debug!(
                check = %pending.id,
                category = %pending.category,
                "discarding late result for unmounted check"
            );
            return Ok(false);
        }
        registry.register_check(pending.category, pending.id, is_failing)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/check.rs"]
mod tests;

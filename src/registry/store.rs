//! Per-category aggregation of check results.
//!
//! Entries are keyed by `(category, check id)` with map semantics, so counts
//! depend only on the current set of entries and never on call order.

use std::collections::BTreeMap;

use crate::foundation::core::{Category, CheckId};
use crate::foundation::error::{ChecklistError, ChecklistResult};

/// One consistent read of every count in a [`CheckRegistry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountsSnapshot {
    /// Failing priority checks.
    pub priority: usize,
    /// Failing design checks.
    pub design: usize,
    /// Failing accessibility checks.
    pub accessibility: usize,
    /// Failing checks across all categories.
    pub total: usize,
}

impl CountsSnapshot {
    /// Count for one category.
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Priority => self.priority,
            Category::Design => self.design,
            Category::Accessibility => self.accessibility,
        }
    }
}

/// Registry of mounted checks and whether each currently reports an issue.
///
/// A registry is live from construction until [`CheckRegistry::close`]; every
/// operation after that returns [`ChecklistError::Scope`] instead of quietly
/// reporting zero issues.
#[derive(Clone, Debug)]
pub struct CheckRegistry {
    entries: [BTreeMap<CheckId, bool>; 3],
    active: bool,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRegistry {
    /// Empty, active registry.
    pub fn new() -> Self {
        Self {
            entries: Default::default(),
            active: true,
        }
    }

    /// Whether the registry still accepts operations.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// End the registry scope and drop every entry.
    pub fn close(&mut self) {
        for map in &mut self.entries {
            map.clear();
        }
        self.active = false;
    }

    fn ensure_active(&self, op: &str) -> ChecklistResult<()> {
        if self.active {
            return Ok(());
        }
        tracing::warn!(op, "check registry used outside of an active session");
        Err(ChecklistError::scope(format!(
            "{op} called on a closed check registry"
        )))
    }

    /// Insert or overwrite the result for `id` under `category`. Last write wins.
    ///
    /// Fails with [`ChecklistError::Scope`] on a closed registry and with
    /// [`ChecklistError::Validation`] when `id` is empty or whitespace only.
    pub fn register_check(
        &mut self,
        category: Category,
        id: impl Into<CheckId>,
        is_failing: bool,
    ) -> ChecklistResult<()> {
        self.ensure_active("register_check")?;
        let id = id.into();
        if id.is_blank() {
            return Err(ChecklistError::validation("check id must not be empty"));
        }
        self.entries[category.index()].insert(id, is_failing);
        Ok(())
    }

    /// Remove `id` from `category`. Returns whether an entry was present.
    pub fn unregister_check(&mut self, category: Category, id: &CheckId) -> ChecklistResult<bool> {
        self.ensure_active("unregister_check")?;
        Ok(self.entries[category.index()].remove(id).is_some())
    }

    /// Current result for one entry, if registered.
    pub fn entry(&self, category: Category, id: &CheckId) -> ChecklistResult<Option<bool>> {
        self.ensure_active("entry")?;
        Ok(self.entries[category.index()].get(id).copied())
    }

    /// Number of registered entries under `category`, failing or not.
    pub fn registered_len(&self, category: Category) -> ChecklistResult<usize> {
        self.ensure_active("registered_len")?;
        Ok(self.entries[category.index()].len())
    }

    /// Failing entries under `category`.
    pub fn category_count(&self, category: Category) -> ChecklistResult<usize> {
        self.ensure_active("category_count")?;
        Ok(self.failing_in(category))
    }

    /// Failing entries across every category.
    pub fn total_active_count(&self) -> ChecklistResult<usize> {
        self.ensure_active("total_active_count")?;
        Ok(Category::ALL.iter().map(|&c| self.failing_in(c)).sum())
    }

    /// All counts from the same registry state.
    pub fn snapshot(&self) -> ChecklistResult<CountsSnapshot> {
        self.ensure_active("snapshot")?;
        let priority = self.failing_in(Category::Priority);
        let design = self.failing_in(Category::Design);
        let accessibility = self.failing_in(Category::Accessibility);
        Ok(CountsSnapshot {
            priority,
            design,
            accessibility,
            total: priority + design + accessibility,
        })
    }

    fn failing_in(&self, category: Category) -> usize {
        self.entries[category.index()]
            .values()
            .filter(|failing| **failing)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/store.rs"]
mod tests;

use crate::checkpoint::machine::CheckpointMachine;
use crate::foundation::core::{Category, CategorySet, Checkpoint};
use crate::policy::visibility::{badge_count, is_empty_state, visible_categories};
use crate::registry::store::CountsSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Badge state for one category.
pub struct CategoryBadge {
    /// Category this badge belongs to.
    pub category: Category,
    /// Whether the category is unlocked at the current checkpoint.
    pub visible: bool,
    /// Count shown to the user (zero while hidden).
    pub badge: usize,
    /// Failing checks registered under the category.
    pub raw: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Everything the checklist panel renders from, read in one go.
pub struct PanelSnapshot {
    /// Current checkpoint.
    pub checkpoint: Checkpoint,
    /// Categories unlocked at `checkpoint`.
    pub visible: CategorySet,
    /// One entry per category in display order.
    pub categories: Vec<CategoryBadge>,
    /// Failing checks across all categories, visible or not.
    pub total_active: usize,
    /// Whether the "all clear" state is shown.
    pub empty_state: bool,
    /// Last failing priority count reported to the machine.
    pub high_priority_count: usize,
    /// Whether to nudge the user to review before publishing.
    pub should_prompt_review: bool,
    /// Pending explicit review request.
    pub review_requested: bool,
    /// Panel to auto-expand, set only on the first read after a checkpoint change.
    pub expand: Option<Category>,
}

impl PanelSnapshot {
    /// Assemble a snapshot from machine state and registry counts.
    pub fn build(
        machine: &CheckpointMachine,
        counts: CountsSnapshot,
        expand: Option<Category>,
    ) -> Self {
        let checkpoint = machine.checkpoint();
        let visible = visible_categories(checkpoint);
        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let raw = counts.get(category);
                CategoryBadge {
                    category,
                    visible: visible.contains(category),
                    badge: badge_count(category, checkpoint, raw),
                    raw,
                }
            })
            .collect();

        Self {
            checkpoint,
            visible,
            categories,
            total_active: counts.total,
            empty_state: is_empty_state(counts.total, checkpoint),
            high_priority_count: machine.high_priority_count(),
            should_prompt_review: machine.should_prompt_review(),
            review_requested: machine.review_requested(),
            expand,
        }
    }

    fn find(&self, category: Category) -> Option<&CategoryBadge> {
        self.categories.iter().find(|b| b.category == category)
    }

    /// User-facing badge count for `category`.
    pub fn badge(&self, category: Category) -> usize {
        self.find(category).map_or(0, |b| b.badge)
    }

    /// Registry count for `category`, ignoring visibility.
    pub fn raw(&self, category: Category) -> usize {
        self.find(category).map_or(0, |b| b.raw)
    }
}

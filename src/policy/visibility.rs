use crate::foundation::core::{Category, CategorySet, Checkpoint};

/// Categories unlocked at `checkpoint`.
pub fn visible_categories(checkpoint: Checkpoint) -> CategorySet {
    match checkpoint {
        Checkpoint::Unavailable => CategorySet::EMPTY,
        Checkpoint::OnlyRecommended => {
            CategorySet::of(&[Category::Design, Category::Accessibility])
        }
        Checkpoint::All => CategorySet::of(&Category::ALL),
    }
}

/// Badge count shown for `category`: the raw registry count when the category
/// is visible, `0` otherwise.
pub fn badge_count(category: Category, checkpoint: Checkpoint, raw_count: usize) -> usize {
    if visible_categories(checkpoint).contains(category) {
        raw_count
    } else {
        0
    }
}

/// Whether the checklist shows its "all clear" empty state.
pub fn is_empty_state(total_active_count: usize, checkpoint: Checkpoint) -> bool {
    total_active_count == 0 || checkpoint == Checkpoint::Unavailable
}

#[cfg(test)]
#[path = "../../tests/unit/policy/visibility.rs"]
mod tests;

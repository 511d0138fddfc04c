use super::*;

#[test]
fn visible_sets_per_checkpoint() {
    assert!(visible_categories(Checkpoint::Unavailable).is_empty());
    assert_eq!(
        visible_categories(Checkpoint::OnlyRecommended),
        CategorySet::of(&[Category::Design, Category::Accessibility])
    );
    let all = visible_categories(Checkpoint::All);
    assert_eq!(all.len(), 3);
    assert!(all.contains(Category::Priority));
}

#[test]
fn visibility_only_grows_with_checkpoint() {
    for pair in Checkpoint::ALL_STATES.windows(2) {
        let lo = visible_categories(pair[0]);
        let hi = visible_categories(pair[1]);
        assert!(lo.iter().all(|c| hi.contains(c)));
    }
}

#[test]
fn hidden_categories_badge_zero() {
    assert_eq!(badge_count(Category::Priority, Checkpoint::OnlyRecommended, 1), 0);
    assert_eq!(badge_count(Category::Design, Checkpoint::Unavailable, 4), 0);
    assert_eq!(badge_count(Category::Design, Checkpoint::OnlyRecommended, 4), 4);
    assert_eq!(badge_count(Category::Priority, Checkpoint::All, 1), 1);
}

#[test]
fn empty_state_rules() {
    assert!(is_empty_state(0, Checkpoint::Unavailable));
    assert!(is_empty_state(3, Checkpoint::Unavailable));
    assert!(is_empty_state(0, Checkpoint::All));
    assert!(!is_empty_state(2, Checkpoint::All));
    assert!(!is_empty_state(1, Checkpoint::OnlyRecommended));
}

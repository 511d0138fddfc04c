use super::*;

#[derive(Default)]
struct Story {
    has_title: bool,
    links_on_page: usize,
    missing_alt: usize,
}

fn scheduler() -> CheckScheduler<Story> {
    CheckScheduler::new()
        .with(Check::new(Category::Priority, "storyMissingTitle", |s: &Story| {
            !s.has_title
        }))
        .unwrap()
        .with(Check::new(Category::Design, "pageTooManyLinks", |s: &Story| {
            s.links_on_page > 3
        }))
        .unwrap()
        .with(Check::new(
            Category::Accessibility,
            "imageMissingAlt",
            |s: &Story| s.missing_alt > 0,
        ))
        .unwrap()
        .with(Check::deferred(Category::Priority, "publisherLogoSize"))
        .unwrap()
}

#[test]
fn sync_mounts_only_visible_categories() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    let story = Story {
        has_title: false,
        links_on_page: 5,
        missing_alt: 0,
    };

    let report = sched
        .sync(Checkpoint::Unavailable, &story, &mut reg)
        .unwrap();
    assert_eq!(report, SyncReport::default());
    assert_eq!(reg.total_active_count().unwrap(), 0);

    let report = sched
        .sync(Checkpoint::OnlyRecommended, &story, &mut reg)
        .unwrap();
    assert_eq!(report.attached, 2);
    assert_eq!(report.evaluated, 2);
    assert_eq!(reg.category_count(Category::Design).unwrap(), 1);
    assert_eq!(reg.registered_len(Category::Priority).unwrap(), 0);

    let report = sched.sync(Checkpoint::All, &story, &mut reg).unwrap();
    assert_eq!(report.attached, 2);
    // The deferred check is mounted but not evaluated synchronously.
    assert_eq!(report.evaluated, 3);
    assert_eq!(reg.category_count(Category::Priority).unwrap(), 1);
    assert_eq!(reg.total_active_count().unwrap(), 2);
}

#[test]
fn reevaluation_updates_results_in_place() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    let mut story = Story::default();

    sched.sync(Checkpoint::All, &story, &mut reg).unwrap();
    assert_eq!(reg.category_count(Category::Priority).unwrap(), 1);

    story.has_title = true;
    let report = sched.sync(Checkpoint::All, &story, &mut reg).unwrap();
    assert_eq!(report.attached, 0);
    assert_eq!(reg.category_count(Category::Priority).unwrap(), 0);
    assert_eq!(reg.registered_len(Category::Priority).unwrap(), 1);
}

#[test]
fn detach_removes_registry_entry() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    let story = Story {
        links_on_page: 10,
        ..Story::default()
    };
    sched.sync(Checkpoint::All, &story, &mut reg).unwrap();
    let links = CheckId::from("pageTooManyLinks");
    assert_eq!(reg.entry(Category::Design, &links).unwrap(), Some(true));

    assert!(sched.detach(Category::Design, &links, &mut reg).unwrap());
    assert!(!sched.is_attached(Category::Design, &links));
    assert_eq!(reg.entry(Category::Design, &links).unwrap(), None);
    assert!(!sched.detach(Category::Design, &links, &mut reg).unwrap());

    let detached = sched.detach_all(&mut reg).unwrap();
    assert_eq!(detached, 3);
    assert_eq!(sched.attached_len(), 0);
    assert_eq!(reg.total_active_count().unwrap(), 0);
}

#[test]
fn explicit_attach_then_evaluate() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    let alt = CheckId::from("imageMissingAlt");

    assert!(sched.attach(Category::Accessibility, &alt).unwrap());
    assert!(!sched.attach(Category::Accessibility, &alt).unwrap());

    let story = Story {
        missing_alt: 2,
        ..Story::default()
    };
    assert_eq!(sched.evaluate_attached(&story, &mut reg).unwrap(), 1);
    assert_eq!(reg.category_count(Category::Accessibility).unwrap(), 1);
}

#[test]
fn deferred_result_commits_while_mounted() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    let logo = CheckId::from("publisherLogoSize");
    sched.attach(Category::Priority, &logo).unwrap();

    let pending = sched
        .begin_async(Category::Priority, &logo)
        .unwrap()
        .unwrap();
    assert_eq!(pending.category(), Category::Priority);
    assert_eq!(pending.id(), &logo);
    assert!(sched.resolve(pending, true, &mut reg).unwrap());
    assert_eq!(reg.entry(Category::Priority, &logo).unwrap(), Some(true));
}

#[test]
fn late_result_after_unmount_is_discarded() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    let logo = CheckId::from("publisherLogoSize");
    sched.attach(Category::Priority, &logo).unwrap();
    let pending = sched
        .begin_async(Category::Priority, &logo)
        .unwrap()
        .unwrap();

    sched.detach(Category::Priority, &logo, &mut reg).unwrap();
    assert!(!sched.resolve(pending.clone(), true, &mut reg).unwrap());
    assert_eq!(reg.entry(Category::Priority, &logo).unwrap(), None);

    // Re-mounting starts a new generation; the old token stays stale.
    sched.attach(Category::Priority, &logo).unwrap();
    assert!(!sched.resolve(pending, true, &mut reg).unwrap());
    assert_eq!(reg.total_active_count().unwrap(), 0);
}

#[test]
fn begin_async_on_detached_check_yields_none() {
    let sched = scheduler();
    let logo = CheckId::from("publisherLogoSize");
    assert!(sched.begin_async(Category::Priority, &logo).unwrap().is_none());
}

#[test]
fn duplicate_and_unknown_checks_are_rejected() {
    let mut sched = scheduler();
    let err = sched
        .add(Check::new(Category::Design, "pageTooManyLinks", |_: &Story| {
            false
        }))
        .unwrap_err();
    assert!(matches!(err, ChecklistError::Validation(_)));

    // Same id in another category is fine.
    sched
        .add(Check::new(
            Category::Accessibility,
            "pageTooManyLinks",
            |_: &Story| false,
        ))
        .unwrap();
    assert_eq!(sched.len(), 5);

    assert!(sched.attach(Category::Design, &CheckId::from("missing")).is_err());
    assert!(sched.add(Check::deferred(Category::Design, "")).is_err());
}

#[test]
fn check_accessors_report_declaration() {
    let check = Check::new(Category::Design, "pageTooManyLinks", |s: &Story| {
        s.links_on_page > 3
    });
    assert_eq!(check.id().as_str(), "pageTooManyLinks");
    assert_eq!(check.category(), Category::Design);
    assert!(!check.is_deferred());
    assert_eq!(
        check.evaluate(&Story {
            links_on_page: 4,
            ..Story::default()
        }),
        Some(true)
    );
    assert_eq!(
        Check::<Story>::deferred(Category::Priority, "x").evaluate(&Story::default()),
        None
    );
}

#[test]
fn closed_registry_surfaces_scope_errors() {
    let mut sched = scheduler();
    let mut reg = CheckRegistry::new();
    reg.close();
    let err = sched
        .sync(Checkpoint::All, &Story::default(), &mut reg)
        .unwrap_err();
    assert!(err.is_scope());
}

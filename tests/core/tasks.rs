use meetnote::core::config::Config;
use meetnote::core::driver::CallbackDriver;
use meetnote::core::error::MeetnoteError;
use meetnote::core::meeting::{GroupStrategy, Meeting, MeetingQuery};
use meetnote::core::store::MeetingStore;
use meetnote::core::task::TaskQuery;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn quiet_store(root: &Path) -> MeetingStore {
    let config = Config {
        root_dir: root.to_path_buf(),
        default_domain: "default".to_string(),
        group_by: GroupStrategy::Domain,
        editor: vec!["true".to_string()],
    };
    let driver = CallbackDriver {
        callback: |_: &[PathBuf]| -> Result<(), MeetnoteError> { Ok(()) },
    };
    MeetingStore::new(&config, Box::new(driver)).unwrap()
}

fn meeting(name: &str, date: &str, domain: &str) -> Meeting {
    Meeting {
        name: name.to_string(),
        date: date.to_string(),
        domain: domain.to_string(),
        template: None,
    }
}

fn store_note(store: &MeetingStore, m: &Meeting, contents: &str) {
    let path = store.open(m.clone()).unwrap();
    fs::write(path, contents).unwrap();
}

fn all_tasks_query(complete: Option<bool>, description: &str) -> TaskQuery {
    TaskQuery::new(MeetingQuery::match_all().unwrap(), complete, description).unwrap()
}

#[test]
fn extracts_both_markers_and_filters_completeness() {
    let tmp = tempdir().unwrap();
    let store = quiet_store(tmp.path());
    let m = meeting("planning", "2026-08-30", "team");
    store_note(
        &store,
        &m,
        "# planning\n\n- [ ] write spec\n- [x] review spec\nsome prose\n",
    );

    let mut tasks = store.tasks(&all_tasks_query(None, "*")).unwrap();
    tasks.sort_by(|a, b| a.description.cmp(&b.description));

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].description, "review spec");
    assert!(tasks[0].complete);
    assert_eq!(tasks[0].meeting, m);
    assert_eq!(tasks[1].description, "write spec");
    assert!(!tasks[1].complete);

    let done = store.tasks(&all_tasks_query(Some(true), "*")).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].description, "review spec");

    let open = store.tasks(&all_tasks_query(Some(false), "*")).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].description, "write spec");
}

#[test]
fn indented_checklist_lines_are_trimmed_before_matching() {
    let tmp = tempdir().unwrap();
    let store = quiet_store(tmp.path());
    store_note(
        &store,
        &meeting("planning", "2026-08-30", "team"),
        "  - [ ] indented item\n\t- [x] tabbed item\n-[ ] not a task\n",
    );

    let mut tasks = store.tasks(&all_tasks_query(None, "*")).unwrap();
    tasks.sort_by(|a, b| a.description.cmp(&b.description));

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].description, "indented item");
    assert_eq!(tasks[1].description, "tabbed item");
}

#[test]
fn description_glob_filters_tasks() {
    let tmp = tempdir().unwrap();
    let store = quiet_store(tmp.path());
    store_note(
        &store,
        &meeting("planning", "2026-08-30", "team"),
        "- [ ] write spec\n- [ ] book room\n",
    );

    let tasks = store.tasks(&all_tasks_query(None, "*spec*")).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "write spec");
}

#[test]
fn meeting_filter_limits_which_notes_are_scanned() {
    let tmp = tempdir().unwrap();
    let store = quiet_store(tmp.path());
    store_note(
        &store,
        &meeting("planning", "2026-08-30", "team"),
        "- [ ] team item\n",
    );
    store_note(
        &store,
        &meeting("oncall", "2026-08-30", "ops"),
        "- [ ] ops item\n",
    );

    let query = TaskQuery::new(
        MeetingQuery::new("*", "ops", "*").unwrap(),
        None,
        "*",
    )
    .unwrap();
    let tasks = store.tasks(&query).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "ops item");
    assert_eq!(tasks[0].meeting.domain, "ops");
}

#[test]
fn parallel_scan_collects_tasks_from_many_meetings() {
    let tmp = tempdir().unwrap();
    let store = quiet_store(tmp.path());

    for i in 0..17 {
        store_note(
            &store,
            &meeting(&format!("meeting-{i}"), "2026-08-30", "team"),
            &format!("- [ ] item {i}\n"),
        );
    }

    let tasks = store.tasks(&all_tasks_query(None, "*")).unwrap();
    assert_eq!(tasks.len(), 17);

    let mut descriptions: Vec<&str> =
        tasks.iter().map(|t| t.description.as_str()).collect();
    descriptions.sort_unstable();
    descriptions.dedup();
    assert_eq!(descriptions.len(), 17);
}

#[test]
fn notes_without_tasks_yield_nothing() {
    let tmp = tempdir().unwrap();
    let store = quiet_store(tmp.path());
    store_note(
        &store,
        &meeting("planning", "2026-08-30", "team"),
        "just prose\n- [?] odd marker\n",
    );

    let tasks = store.tasks(&all_tasks_query(None, "*")).unwrap();
    assert!(tasks.is_empty());
}

use meetnote::core::config::Config;
use meetnote::core::driver::CallbackDriver;
use meetnote::core::error::MeetnoteError;
use meetnote::core::meeting::{GroupStrategy, Meeting, MeetingQuery};
use meetnote::core::store::{MeetingStore, Metadata};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn test_config(root: &Path, group_by: GroupStrategy) -> Config {
    Config {
        root_dir: root.to_path_buf(),
        default_domain: "default".to_string(),
        group_by,
        editor: vec!["true".to_string()],
    }
}

fn quiet_store(root: &Path, group_by: GroupStrategy) -> MeetingStore {
    let driver = CallbackDriver {
        callback: |_: &[PathBuf]| -> Result<(), MeetnoteError> { Ok(()) },
    };
    MeetingStore::new(&test_config(root, group_by), Box::new(driver)).unwrap()
}

fn meeting(name: &str, date: &str, domain: &str) -> Meeting {
    Meeting {
        name: name.to_string(),
        date: date.to_string(),
        domain: domain.to_string(),
        template: None,
    }
}

fn sorted(mut meetings: Vec<Meeting>) -> Vec<Meeting> {
    meetings.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    meetings
}

#[test]
fn migration_relocates_every_meeting_and_back() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("store");
    let mut store = quiet_store(&root, GroupStrategy::Domain);

    let stored = [
        meeting("standup", "2026-08-30", "team.backend"),
        meeting("retro", "2026-08-30", "team.frontend"),
        meeting("sync", "2026-07-01", "ops"),
    ];
    for m in &stored {
        let path = store.open(m.clone()).unwrap();
        fs::write(&path, format!("notes for {}\n", m.name)).unwrap();
    }

    store.update_group_by(GroupStrategy::Date).unwrap();

    assert_eq!(store.group_by(), GroupStrategy::Date);
    assert_eq!(
        sorted(store.list(&MeetingQuery::match_all().unwrap()).unwrap()),
        sorted(stored.to_vec())
    );
    assert_eq!(
        fs::read_to_string(root.join("2026-08-30/team/backend/standup")).unwrap(),
        "notes for standup\n"
    );
    assert!(!root.join(".backup").exists());
    assert!(!tmp.path().join("store.backup").exists());

    // The new strategy is persisted, not just in memory.
    assert_eq!(
        Metadata::load(&root, GroupStrategy::Domain).unwrap().group_by,
        GroupStrategy::Date
    );

    // Reverting reproduces the original path set.
    store.update_group_by(GroupStrategy::Domain).unwrap();
    assert!(root.join("team/backend/2026-08-30/standup").is_file());
    assert!(root.join("team/frontend/2026-08-30/retro").is_file());
    assert!(root.join("ops/2026-07-01/sync").is_file());
    assert_eq!(
        sorted(store.list(&MeetingQuery::match_all().unwrap()).unwrap()),
        sorted(stored.to_vec())
    );
}

#[test]
fn requesting_active_strategy_is_a_no_op() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("store");
    let mut store = quiet_store(&root, GroupStrategy::Domain);

    let path = store
        .open(meeting("standup", "2026-08-30", "team"))
        .unwrap();
    fs::write(&path, "untouched\n").unwrap();

    store.update_group_by(GroupStrategy::Domain).unwrap();

    assert!(path.is_file());
    assert_eq!(fs::read_to_string(&path).unwrap(), "untouched\n");
    assert!(!root.join(".backup").exists());
    assert!(!tmp.path().join("store.backup").exists());
    // No metadata write either: the file only appears after a real migration.
    assert!(!root.join(".metadata").exists());
}

#[test]
fn templates_survive_migration() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("store");
    let mut store = quiet_store(&root, GroupStrategy::Domain);

    store
        .open(meeting("standup", "2026-08-30", "team"))
        .unwrap();
    let src = tmp.path().join("daily.md");
    fs::write(&src, "# {{name}}\n").unwrap();
    store.templates().add(&[src]).unwrap();

    store.update_group_by(GroupStrategy::Date).unwrap();

    assert_eq!(store.templates().list().unwrap(), vec!["daily.md".to_string()]);
    assert_eq!(
        fs::read_to_string(root.join(".templates/daily.md")).unwrap(),
        "# {{name}}\n"
    );
}

#[test]
fn migrated_store_reloads_with_new_strategy() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("store");
    let mut store = quiet_store(&root, GroupStrategy::Domain);

    store
        .open(meeting("standup", "2026-08-30", "team"))
        .unwrap();
    store.update_group_by(GroupStrategy::Date).unwrap();

    // A fresh store constructed with the old default must read the
    // persisted strategy.
    let reopened = quiet_store(&root, GroupStrategy::Domain);
    assert_eq!(reopened.group_by(), GroupStrategy::Date);
    assert_eq!(
        reopened
            .list(&MeetingQuery::match_all().unwrap())
            .unwrap(),
        vec![meeting("standup", "2026-08-30", "team")]
    );
}

#[test]
fn colliding_targets_surface_partial_failure_with_backup_intact() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("store");
    fs::create_dir_all(&root).unwrap();

    // Two meetings that are fine under by-domain but collide under by-date:
    // `a/2026-08-30/n` wants `2026-08-30/a/n` while `2026-08-30/a` wants to
    // stay a file at `2026-08-30/a`.
    fs::create_dir_all(root.join("a/2026-08-30")).unwrap();
    fs::write(root.join("a/2026-08-30/n"), "first\n").unwrap();
    fs::create_dir_all(root.join("2026-08-30")).unwrap();
    fs::write(root.join("2026-08-30/a"), "second\n").unwrap();

    let mut store = quiet_store(&root, GroupStrategy::Domain);
    let err = store.update_group_by(GroupStrategy::Date).unwrap_err();

    match err {
        MeetnoteError::MigrationPartialFailure { backup, .. } => {
            assert!(backup.exists(), "backup must be preserved for recovery");
            assert_eq!(backup, root.join(".backup"));
        }
        other => panic!("expected partial failure, got: {other}"),
    }

    // Metadata already declares the direction of travel.
    assert_eq!(
        Metadata::load(&root, GroupStrategy::Domain).unwrap().group_by,
        GroupStrategy::Date
    );

    // Neither note's content was lost: each is either relocated or still in
    // the backup.
    let mut contents: Vec<String> = Vec::new();
    for entry in walk_files(&root) {
        contents.push(fs::read_to_string(entry).unwrap());
    }
    assert!(contents.iter().any(|c| c == "first\n"));
    assert!(contents.iter().any(|c| c == "second\n"));
}

fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files
}

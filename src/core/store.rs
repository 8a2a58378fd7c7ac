//! The meeting store: a directory tree of note files plus persisted metadata.
//!
//! Every file under the root (outside `.templates`, `.backup` and the
//! `.metadata` file) is one meeting, addressable only through the path codec
//! under the strategy recorded in metadata.

use crate::core::config::Config;
use crate::core::driver::OpenDriver;
use crate::core::error::MeetnoteError;
use crate::core::meeting::{GroupStrategy, Meeting, MeetingQuery};
use crate::core::template::TemplateStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata file at the store root. Rewritten in full after every
/// successful migration.
pub const METADATA_FILE: &str = ".metadata";
/// Template directory name, never descended into when listing.
pub const TEMPLATE_DIR: &str = ".templates";
/// Nested migration backup name, never descended into when listing.
pub const BACKUP_DIR: &str = ".backup";

/// Persisted store state: which grouping strategy laid out the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub group_by: GroupStrategy,
}

impl Metadata {
    /// Load from `<root>/.metadata`, falling back to `default` when absent.
    /// An unparseable file (including an unknown strategy value) is a
    /// `MalformedPath` error, not a panic.
    pub fn load(root: &Path, default: GroupStrategy) -> Result<Metadata, MeetnoteError> {
        let path = root.join(METADATA_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Metadata { group_by: default });
            }
            Err(e) => {
                return Err(MeetnoteError::io(
                    format!("reading metadata '{}'", path.display()),
                    e,
                ));
            }
        };

        toml::from_str(&raw)
            .map_err(|e| MeetnoteError::MalformedPath(format!("metadata '{}': {e}", path.display())))
    }

    pub fn persist(&self, root: &Path) -> Result<(), MeetnoteError> {
        let path = root.join(METADATA_FILE);
        let raw = toml::to_string(self)
            .map_err(|e| MeetnoteError::Config(format!("serializing metadata: {e}")))?;
        fs::create_dir_all(root)
            .map_err(|e| MeetnoteError::io(format!("creating '{}'", root.display()), e))?;
        fs::write(&path, raw)
            .map_err(|e| MeetnoteError::io(format!("writing metadata '{}'", path.display()), e))
    }
}

pub struct MeetingStore {
    pub(crate) root: PathBuf,
    pub(crate) default_domain: String,
    pub(crate) metadata: Metadata,
    driver: Box<dyn OpenDriver>,
    templates: TemplateStore,
}

impl MeetingStore {
    pub fn new(config: &Config, driver: Box<dyn OpenDriver>) -> Result<MeetingStore, MeetnoteError> {
        let metadata = Metadata::load(&config.root_dir, config.group_by)?;
        let templates = TemplateStore::new(config.root_dir.join(TEMPLATE_DIR));

        Ok(MeetingStore {
            root: config.root_dir.clone(),
            default_domain: config.default_domain.clone(),
            metadata,
            driver,
            templates,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn group_by(&self) -> GroupStrategy {
        self.metadata.group_by
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Resolve an empty domain to the configured default.
    pub(crate) fn fill(&self, mut meeting: Meeting) -> Meeting {
        if meeting.domain.is_empty() {
            meeting.domain = self.default_domain.clone();
        }
        meeting
    }

    fn create_meeting_file(&self, meeting: &Meeting) -> Result<PathBuf, MeetnoteError> {
        let path = meeting.path(&self.root, self.metadata.group_by);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MeetnoteError::io(format!("creating directory '{}'", parent.display()), e)
            })?;
        }

        // Re-opening never overwrites existing content.
        if !path.exists() {
            let contents = match &meeting.template {
                Some(name) => self.templates.render(name, meeting)?,
                None => String::new(),
            };
            fs::write(&path, contents).map_err(|e| {
                MeetnoteError::io(format!("creating meeting '{}'", path.display()), e)
            })?;
        }

        Ok(path)
    }

    /// Open a meeting note, creating it (from its template, if named) when it
    /// does not exist yet, then hand the path to the open driver.
    pub fn open(&self, meeting: Meeting) -> Result<PathBuf, MeetnoteError> {
        let meeting = self.fill(meeting);
        let path = self.create_meeting_file(&meeting)?;
        self.driver.open(std::slice::from_ref(&path))?;
        Ok(path)
    }

    /// All stored meetings matching `query`, in directory-walk order.
    ///
    /// Strict by design: one undecodable path fails the whole listing so
    /// that unexpected files under the root are surfaced, never dropped.
    pub fn list(&self, query: &MeetingQuery) -> Result<Vec<Meeting>, MeetnoteError> {
        // A store that never created a note has no root yet.
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut meetings = Vec::new();

        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            let skipped = entry.depth() == 1
                && entry.file_type().is_dir()
                && matches!(entry.file_name().to_str(), Some(TEMPLATE_DIR | BACKUP_DIR));
            !skipped
        });

        for entry in walker {
            let entry = entry.map_err(|e| {
                MeetnoteError::io(
                    format!("walking '{}'", self.root.display()),
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk loop")),
                )
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if entry.depth() == 1 && entry.file_name().to_str() == Some(METADATA_FILE) {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).map_err(|_| {
                MeetnoteError::MalformedPath(format!(
                    "'{}' is outside the store root",
                    entry.path().display()
                ))
            })?;

            let meeting = Meeting::from_path(self.metadata.group_by, relative)?;
            if query.matches(&meeting) {
                meetings.push(meeting);
            }
        }

        Ok(meetings)
    }

    /// Delete a meeting's file and clean up now-empty ancestor directories,
    /// stopping silently at the first non-empty one. The root itself is
    /// never removed.
    pub fn remove(&self, meeting: Meeting) -> Result<(), MeetnoteError> {
        let meeting = self.fill(meeting);
        let path = meeting.path(&self.root, self.metadata.group_by);

        if !path.exists() {
            return Err(MeetnoteError::NotFound(format!("meeting '{meeting}'")));
        }
        fs::remove_file(&path)
            .map_err(|e| MeetnoteError::io(format!("removing '{}'", path.display()), e))?;

        let mut dir = path.parent();
        while let Some(current) = dir {
            if current == self.root {
                break;
            }
            match fs::remove_dir(current) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => break,
                Err(e) => {
                    return Err(MeetnoteError::io(
                        format!("removing directory '{}'", current.display()),
                        e,
                    ));
                }
            }
            dir = current.parent();
        }

        Ok(())
    }
}

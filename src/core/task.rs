//! Checklist tasks parsed out of note contents.
//!
//! Tasks have no storage of their own — they are a view computed on demand
//! by scanning matching meetings' files, in parallel through the job pool.

use crate::core::error::MeetnoteError;
use crate::core::meeting::{GroupStrategy, Meeting, MeetingQuery};
use crate::core::pool::{JobPool, SCAN_JOBS};
use crate::core::store::MeetingStore;
use globset::{Glob, GlobMatcher};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;

pub const TASK_PREFIX: &str = "- [ ] ";
pub const TASK_COMPLETED_PREFIX: &str = "- [x] ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub meeting: Meeting,
    pub complete: bool,
    pub description: String,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.complete { "[x]" } else { "[ ]" };
        write!(f, "{marker} {}: {}", self.meeting, self.description)
    }
}

/// Meeting filter plus the task's own fields, ANDed. `complete: None`
/// matches both states.
#[derive(Debug, Clone)]
pub struct TaskQuery {
    pub meeting: MeetingQuery,
    pub complete: Option<bool>,
    pub description: GlobMatcher,
}

impl TaskQuery {
    pub fn new(
        meeting: MeetingQuery,
        complete: Option<bool>,
        description: &str,
    ) -> Result<TaskQuery, MeetnoteError> {
        Ok(TaskQuery {
            meeting,
            complete,
            description: Glob::new(description)?.compile_matcher(),
        })
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.meeting.matches(&task.meeting)
            && self.complete.is_none_or(|complete| complete == task.complete)
            && self.description.is_match(&task.description)
    }
}

/// Scan one meeting's note for checklist lines matching `query`.
fn scan_meeting(
    root: &Path,
    group_by: GroupStrategy,
    meeting: &Meeting,
    query: &TaskQuery,
) -> Result<Vec<Task>, MeetnoteError> {
    let path = meeting.path(root, group_by);
    let contents = fs::read_to_string(&path)
        .map_err(|e| MeetnoteError::io(format!("reading meeting '{}'", path.display()), e))?;

    let mut tasks = Vec::new();
    for line in contents.lines() {
        let line = line.trim();

        let task = if let Some(rest) = line.strip_prefix(TASK_PREFIX) {
            Task {
                meeting: meeting.clone(),
                complete: false,
                description: rest.to_string(),
            }
        } else if let Some(rest) = line.strip_prefix(TASK_COMPLETED_PREFIX) {
            Task {
                meeting: meeting.clone(),
                complete: true,
                description: rest.to_string(),
            }
        } else {
            continue;
        };

        if query.matches(&task) {
            tasks.push(task);
        }
    }

    Ok(tasks)
}

impl MeetingStore {
    /// All tasks in meetings matching `query.meeting`, filtered by the
    /// task-level patterns. Per-meeting scans run in parallel; result order
    /// is unspecified.
    pub fn tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, MeetnoteError> {
        let meetings = self.list(&query.meeting)?;

        let pool = JobPool::new(SCAN_JOBS);
        let query = Arc::new(query.clone());
        let root = Arc::new(self.root().to_path_buf());
        let group_by = self.group_by();
        let (tx, rx) = mpsc::channel();

        for meeting in meetings {
            let tx = tx.clone();
            let query = Arc::clone(&query);
            let root = Arc::clone(&root);
            pool.run(move || {
                let found = scan_meeting(&root, group_by, &meeting, &query);
                // The receiver hangs up early on a failed scan; nothing to
                // do with results after that.
                let _ = tx.send(found);
            });
        }
        drop(tx);

        let mut tasks = Vec::new();
        for scanned in rx {
            tasks.extend(scanned?);
        }
        Ok(tasks)
    }
}

//! Layout migration between the two grouping strategies.
//!
//! The only truly atomic step is renaming the store root aside as a backup;
//! everything after that treats the backup as the safe source of truth and
//! never deletes it until every meeting has been relocated. A failure after
//! the backup rename surfaces as `MigrationPartialFailure` carrying the
//! backup's location so an operator can finish the move by hand.

use crate::core::error::MeetnoteError;
use crate::core::meeting::{GroupStrategy, MeetingQuery};
use crate::core::store::{BACKUP_DIR, MeetingStore, TEMPLATE_DIR};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix for the sibling directory the root is renamed to in step 2.
const BACKUP_SUFFIX: &str = ".backup";

fn staging_path(root: &Path) -> PathBuf {
    let mut os = root.as_os_str().to_os_string();
    os.push(BACKUP_SUFFIX);
    PathBuf::from(os)
}

fn partial(backup: &Path, err: MeetnoteError) -> MeetnoteError {
    MeetnoteError::MigrationPartialFailure {
        backup: backup.to_path_buf(),
        reason: err.to_string(),
    }
}

impl MeetingStore {
    /// Re-map every stored meeting from the current strategy's paths to
    /// `new`'s. Requesting the active strategy is a no-op with zero
    /// filesystem mutations.
    ///
    /// Must not overlap any other operation on the same root.
    pub fn update_group_by(&mut self, new: GroupStrategy) -> Result<(), MeetnoteError> {
        if new == self.metadata.group_by {
            return Ok(());
        }
        let old = self.metadata.group_by;

        // Steps 1-3: enumerate, rename the root aside, recreate it empty.
        // Any failure here leaves the original layout fully intact.
        let meetings = self.list(&MeetingQuery::match_all()?)?;

        let staging = staging_path(&self.root);
        fs::rename(&self.root, &staging).map_err(|e| {
            MeetnoteError::io(
                format!(
                    "renaming '{}' to backup '{}'",
                    self.root.display(),
                    staging.display()
                ),
                e,
            )
        })?;
        if let Err(e) = fs::create_dir_all(&self.root) {
            // Roll the rename back; the store was not touched otherwise.
            let _ = fs::rename(&staging, &self.root);
            return Err(MeetnoteError::io(
                format!("recreating root '{}'", self.root.display()),
                e,
            ));
        }

        // Step 4: declare the new strategy before moving files, so an
        // interrupted migration reads as travelling toward `new`.
        self.metadata.group_by = new;
        if let Err(e) = self.metadata.persist(&self.root) {
            return Err(partial(&staging, e));
        }

        // Step 5: nest the backup under the new root, keeping templates and
        // any other non-meeting content recoverable.
        let backup = self.root.join(BACKUP_DIR);
        if let Err(e) = fs::rename(&staging, &backup) {
            return Err(partial(
                &staging,
                MeetnoteError::io(format!("nesting backup '{}'", staging.display()), e),
            ));
        }

        // Step 6: relocate each meeting, old-strategy path under the backup
        // to new-strategy path under the root. Rename, never copy.
        for meeting in &meetings {
            let from = meeting.path(&backup, old);
            let to = meeting.path(&self.root, new);

            if let Some(parent) = to.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    return Err(partial(
                        &backup,
                        MeetnoteError::io(format!("creating '{}'", parent.display()), e),
                    ));
                }
            }
            if let Err(e) = fs::rename(&from, &to) {
                return Err(partial(
                    &backup,
                    MeetnoteError::io(
                        format!("moving '{}' to '{}'", from.display(), to.display()),
                        e,
                    ),
                ));
            }
        }

        // Templates ride through the migration inside the backup.
        let old_templates = backup.join(TEMPLATE_DIR);
        if old_templates.exists() {
            if let Err(e) = fs::rename(&old_templates, self.root.join(TEMPLATE_DIR)) {
                return Err(partial(
                    &backup,
                    MeetnoteError::io(
                        format!("restoring templates '{}'", old_templates.display()),
                        e,
                    ),
                ));
            }
        }

        // Step 7: every meeting is in place, so the backup (old metadata and
        // emptied directories) can go.
        if let Err(e) = fs::remove_dir_all(&backup) {
            return Err(partial(
                &backup,
                MeetnoteError::io(format!("deleting backup '{}'", backup.display()), e),
            ));
        }

        Ok(())
    }
}

//! Named note templates stored under `<root>/.templates`.
//!
//! Templates are plain text with `{{name}}`, `{{date}}` and `{{domain}}`
//! placeholders — straight field substitution, no control flow.

use crate::core::error::MeetnoteError;
use crate::core::meeting::Meeting;
use std::fs;
use std::path::PathBuf;

pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: PathBuf) -> TemplateStore {
        TemplateStore { dir }
    }

    /// Copy template files in, keyed by their base name.
    pub fn add(&self, paths: &[PathBuf]) -> Result<(), MeetnoteError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| MeetnoteError::io(format!("creating '{}'", self.dir.display()), e))?;

        for src in paths {
            let base = src.file_name().ok_or_else(|| {
                MeetnoteError::Template(format!("'{}' has no file name", src.display()))
            })?;
            let dst = self.dir.join(base);
            fs::copy(src, &dst).map_err(|e| {
                MeetnoteError::io(
                    format!("copying '{}' to '{}'", src.display(), dst.display()),
                    e,
                )
            })?;
        }

        Ok(())
    }

    /// Names of stored templates. A store that never added any has no
    /// template directory, which reads as empty.
    pub fn list(&self) -> Result<Vec<String>, MeetnoteError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| MeetnoteError::io(format!("reading '{}'", self.dir.display()), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| MeetnoteError::io(format!("reading '{}'", self.dir.display()), e))?;
            if entry
                .file_type()
                .map_err(|e| MeetnoteError::io("reading template entry type", e))?
                .is_dir()
            {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    pub fn remove(&self, names: &[String]) -> Result<(), MeetnoteError> {
        for name in names {
            let path = self.dir.join(name);
            if !path.exists() {
                return Err(MeetnoteError::NotFound(format!("template '{name}'")));
            }
            fs::remove_file(&path)
                .map_err(|e| MeetnoteError::io(format!("removing '{}'", path.display()), e))?;
        }
        Ok(())
    }

    /// Render the named template for a meeting.
    pub fn render(&self, name: &str, meeting: &Meeting) -> Result<String, MeetnoteError> {
        let path = self.dir.join(name);
        let raw = fs::read_to_string(&path)
            .map_err(|e| MeetnoteError::Template(format!("could not read '{name}': {e}")))?;

        Ok(raw
            .replace("{{name}}", &meeting.name)
            .replace("{{date}}", &meeting.date)
            .replace("{{domain}}", &meeting.domain))
    }
}

//! Pluggable "open this file" drivers.
//!
//! The store never cares how a note is opened — an editor subprocess in
//! production, a callback in tests.

use crate::core::error::MeetnoteError;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait OpenDriver {
    /// Open the given files, creating any missing parent directories first.
    fn open(&self, paths: &[PathBuf]) -> Result<(), MeetnoteError>;
}

/// Runs a configured editor-like command with the paths appended as arguments.
#[derive(Debug)]
pub struct EditorDriver {
    program: PathBuf,
    args: Vec<String>,
}

impl EditorDriver {
    /// Construction fails if the command is empty or its executable cannot
    /// be resolved.
    pub fn new(command: &[String]) -> Result<EditorDriver, MeetnoteError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| MeetnoteError::Driver("editor command is empty".to_string()))?;

        Ok(EditorDriver {
            program: resolve_program(program)?,
            args: args.to_vec(),
        })
    }
}

impl OpenDriver for EditorDriver {
    fn open(&self, paths: &[PathBuf]) -> Result<(), MeetnoteError> {
        for path in paths {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    MeetnoteError::io(format!("creating directory '{}'", parent.display()), e)
                })?;
            }
        }

        let status = Command::new(&self.program)
            .args(&self.args)
            .args(paths)
            .status()
            .map_err(|e| {
                MeetnoteError::Driver(format!(
                    "could not run '{}': {e}",
                    self.program.display()
                ))
            })?;

        if !status.success() {
            return Err(MeetnoteError::Driver(format!(
                "'{}' exited with {status}",
                self.program.display()
            )));
        }

        Ok(())
    }
}

/// Resolve a program name against `PATH`, or verify an explicit path exists.
fn resolve_program(name: &str) -> Result<PathBuf, MeetnoteError> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        if candidate.is_file() {
            return Ok(candidate.to_path_buf());
        }
        return Err(MeetnoteError::Driver(format!(
            "editor '{name}' does not exist"
        )));
    }

    for dir in env::split_paths(&env::var_os("PATH").unwrap_or_default()) {
        let full = dir.join(name);
        if full.is_file() {
            return Ok(full);
        }
    }

    Err(MeetnoteError::Driver(format!(
        "could not find editor '{name}' on PATH"
    )))
}

/// Test driver that hands the paths to a closure.
pub struct CallbackDriver<F: Fn(&[PathBuf]) -> Result<(), MeetnoteError>> {
    pub callback: F,
}

impl<F: Fn(&[PathBuf]) -> Result<(), MeetnoteError>> OpenDriver for CallbackDriver<F> {
    fn open(&self, paths: &[PathBuf]) -> Result<(), MeetnoteError> {
        (self.callback)(paths)
    }
}

//! Configuration loading.
//!
//! Environment lookups (`HOME`, `EDITOR`) happen only here; the store itself
//! is handed an explicit `Config` and never reads the environment.

use crate::core::error::MeetnoteError;
use crate::core::meeting::GroupStrategy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub root_dir: PathBuf,
    pub default_domain: String,
    pub group_by: GroupStrategy,
    /// Editor command plus any leading arguments; note paths are appended.
    pub editor: Vec<String>,
}

impl Config {
    /// Defaults derived from the environment: `~/.meetnote` root, `default`
    /// domain, by-domain grouping, `$EDITOR` (or `vi`).
    pub fn from_env() -> Result<Config, MeetnoteError> {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| MeetnoteError::Config("HOME is not set".to_string()))?;

        let editor = env::var("EDITOR")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "vi".to_string());

        Ok(Config {
            root_dir: home.join(".meetnote"),
            default_domain: "default".to_string(),
            group_by: GroupStrategy::Domain,
            editor: vec![editor],
        })
    }

    /// Default config file location: `~/.config/meetnote/config.toml`.
    pub fn default_path() -> Result<PathBuf, MeetnoteError> {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| MeetnoteError::Config("HOME is not set".to_string()))?;
        Ok(home.join(".config").join("meetnote").join("config.toml"))
    }

    /// Load from a TOML file, with environment defaults filling any field
    /// the file omits. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Config, MeetnoteError> {
        let defaults = Config::from_env()?;

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(defaults),
            Err(e) => {
                return Err(MeetnoteError::io(
                    format!("reading config '{}'", path.display()),
                    e,
                ));
            }
        };

        let partial: PartialConfig = toml::from_str(&raw)
            .map_err(|e| MeetnoteError::Config(format!("'{}': {e}", path.display())))?;

        Ok(Config {
            root_dir: partial.root_dir.unwrap_or(defaults.root_dir),
            default_domain: partial.default_domain.unwrap_or(defaults.default_domain),
            group_by: partial.group_by.unwrap_or(defaults.group_by),
            editor: partial.editor.unwrap_or(defaults.editor),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PartialConfig {
    root_dir: Option<PathBuf>,
    default_domain: Option<String>,
    group_by: Option<GroupStrategy>,
    editor: Option<Vec<String>>,
}

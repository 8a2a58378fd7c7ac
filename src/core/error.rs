use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetnoteError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed meeting path: {0}")]
    MalformedPath(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("driver error: {0}")]
    Driver(String),
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("migration incomplete, backup preserved at {backup}: {reason}")]
    MigrationPartialFailure { backup: PathBuf, reason: String },
}

impl MeetnoteError {
    /// Wrap an `io::Error` with the operation and path it came from.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        MeetnoteError::Io {
            context: context.into(),
            source,
        }
    }
}

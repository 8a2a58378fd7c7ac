//! Meeting identity, grouping strategy, and the path codec.
//!
//! A meeting's on-disk identity is derived from its path, so `Meeting::path`
//! and `Meeting::from_path` must be exact inverses for any meeting whose
//! fields contain no path separators and whose domain segments are non-empty.

use crate::core::error::MeetnoteError;
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Which field forms the outer directory level.
///
/// Persisted in store metadata and exhaustively matched everywhere — an
/// unrecognized persisted value is a `MalformedPath` error at load time,
/// never a runtime panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupStrategy {
    /// `<root>/<domain segments...>/<date>/<name>`
    Domain,
    /// `<root>/<date>/<domain segments...>/<name>`
    Date,
}

impl GroupStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupStrategy::Domain => "domain",
            GroupStrategy::Date => "date",
        }
    }
}

impl fmt::Display for GroupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical identity of a stored note. Value object: no mutation after
/// construction, structural equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meeting {
    pub name: String,
    /// Canonical form `YYYY-MM-DD`.
    pub date: String,
    /// Dot-separated hierarchical segments, e.g. `team.backend`. Empty means
    /// "use the configured default domain" (filled in by the store).
    pub domain: String,
    /// Template to render on first creation, if any. Not part of the on-disk
    /// path, so decoding always yields `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Meeting {
    fn domain_segments(&self) -> impl Iterator<Item = &str> {
        self.domain.split('.').filter(|seg| !seg.is_empty())
    }

    /// Encode this meeting into its path under `root` for `strategy`.
    pub fn path(&self, root: &Path, strategy: GroupStrategy) -> PathBuf {
        let mut path = root.to_path_buf();
        match strategy {
            GroupStrategy::Domain => {
                for segment in self.domain_segments() {
                    path.push(segment);
                }
                path.push(&self.date);
            }
            GroupStrategy::Date => {
                path.push(&self.date);
                for segment in self.domain_segments() {
                    path.push(segment);
                }
            }
        }
        path.push(&self.name);
        path
    }

    /// Decode a path relative to the store root back into a meeting.
    ///
    /// The minimum valid path is `date/name` (2 components, empty domain).
    pub fn from_path(strategy: GroupStrategy, relative: &Path) -> Result<Meeting, MeetnoteError> {
        let components = relative
            .components()
            .map(|component| match component {
                Component::Normal(part) => part.to_str().ok_or_else(|| {
                    MeetnoteError::MalformedPath(format!(
                        "non-unicode component in '{}'",
                        relative.display()
                    ))
                }),
                _ => Err(MeetnoteError::MalformedPath(format!(
                    "unexpected component in '{}'",
                    relative.display()
                ))),
            })
            .collect::<Result<Vec<&str>, MeetnoteError>>()?;

        if components.len() < 2 {
            return Err(MeetnoteError::MalformedPath(format!(
                "path does not have enough components: '{}'",
                relative.display()
            )));
        }

        let name = components[components.len() - 1].to_string();
        let (date, domain) = match strategy {
            GroupStrategy::Domain => (
                components[components.len() - 2].to_string(),
                components[..components.len() - 2].join("."),
            ),
            GroupStrategy::Date => (
                components[0].to_string(),
                components[1..components.len() - 1].join("."),
            ),
        };

        Ok(Meeting {
            name,
            date,
            domain,
            template: None,
        })
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.domain, self.name)
    }
}

/// Glob patterns over a meeting's fields, combined by logical AND.
#[derive(Debug, Clone)]
pub struct MeetingQuery {
    pub name: GlobMatcher,
    pub domain: GlobMatcher,
    pub date: GlobMatcher,
}

impl MeetingQuery {
    pub fn new(name: &str, domain: &str, date: &str) -> Result<MeetingQuery, MeetnoteError> {
        Ok(MeetingQuery {
            name: Glob::new(name)?.compile_matcher(),
            domain: Glob::new(domain)?.compile_matcher(),
            date: Glob::new(date)?.compile_matcher(),
        })
    }

    /// Matches every stored meeting.
    pub fn match_all() -> Result<MeetingQuery, MeetnoteError> {
        MeetingQuery::new("*", "*", "*")
    }

    pub fn matches(&self, meeting: &Meeting) -> bool {
        self.name.is_match(&meeting.name)
            && self.domain.is_match(&meeting.domain)
            && self.date.is_match(&meeting.date)
    }
}

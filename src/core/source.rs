//! Source list parsing and classification
//!
//! A source is either a direct file URL or a repository address. The kind is
//! decided purely by the identifier's suffix.

use serde::Serialize;

use crate::config::defaults;

/// How a source is acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Fetched with an HTTP GET and installed as-is
    DirectDownload,
    /// Cloned, built, and the produced binary installed
    GitRepository,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectDownload => write!(f, "download"),
            Self::GitRepository => write!(f, "repository"),
        }
    }
}

/// A single configured source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    identifier: String,
    kind: SourceKind,
}

impl SourceSpec {
    /// Classify an identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let kind = classify(&identifier);
        Self { identifier, kind }
    }

    /// Get the raw identifier
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Get the source kind
    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

impl std::fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Classify an identifier by its suffix
pub fn classify(identifier: &str) -> SourceKind {
    if identifier.ends_with(defaults::REPOSITORY_SUFFIX) {
        SourceKind::GitRepository
    } else {
        SourceKind::DirectDownload
    }
}

/// Split a comma-separated list into sources, trimming entries and dropping blanks
pub fn parse_sources(raw: &str) -> Vec<SourceSpec> {
    raw.split(defaults::SOURCE_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(SourceSpec::new)
        .collect()
}

/// Repository name: the last path component with the repository suffix removed
///
/// Handles URL (`https://host/org/name.git`) and scp-like
/// (`git@host:org/name.git`) addresses.
pub fn repo_basename(identifier: &str) -> String {
    let trimmed = identifier.trim_end_matches('/');
    let without_suffix = trimmed
        .strip_suffix(defaults::REPOSITORY_SUFFIX)
        .unwrap_or(trimmed);

    without_suffix
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(without_suffix)
        .to_string()
}

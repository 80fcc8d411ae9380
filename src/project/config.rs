//! Load configuration: fallback include roots and archive entry filters.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::base::constants::{IDL_EXTENSION, INCLUDE_PATH_ENV};
use crate::error::ModelError;

/// Ordered fallback roots consulted after the ancestor-directory search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeConfig {
    include_paths: Vec<PathBuf>,
}

impl IncludeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fallback root. Roots are tried in insertion order.
    pub fn with_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    /// Reads the platform path list in `THRIFT_INCLUDE_PATH`.
    pub fn from_env() -> Self {
        std::env::var_os(INCLUDE_PATH_ENV)
            .map(|value| Self::from_path_list(&value))
            .unwrap_or_default()
    }

    /// Parses a platform path list (`:`-separated on Unix, `;` on Windows).
    /// Empty segments are skipped.
    pub fn from_path_list(list: &OsStr) -> Self {
        Self {
            include_paths: std::env::split_paths(list)
                .filter(|path| !path.as_os_str().is_empty())
                .collect(),
        }
    }

    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }
}

/// Selects which archive entries are IDL documents.
#[derive(Debug, Clone)]
pub enum EntryFilter {
    /// Case-insensitive file extension, without the dot.
    Extension(String),
    /// Regular expression over the full entry name.
    Pattern(Regex),
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self::Extension(IDL_EXTENSION.to_string())
    }
}

impl EntryFilter {
    pub fn pattern(pattern: &str) -> Result<Self, ModelError> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    pub fn matches(&self, entry_name: &str) -> bool {
        match self {
            Self::Extension(extension) => Path::new(entry_name)
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension)),
            Self::Pattern(regex) => regex.is_match(entry_name),
        }
    }
}

/// Options for archive bundle loads.
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    pub filter: EntryFilter,
}

impl ArchiveOptions {
    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }
}

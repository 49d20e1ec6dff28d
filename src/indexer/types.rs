//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

/// A project's translation files, as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProject {
    /// Project name from the configuration.
    pub project: String,
    /// One locale id per translation file, sorted.
    pub locales: Vec<String>,
}

/// Where a translation file belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIdentity {
    /// Name of the first project whose root prefixes the path.
    pub project: Option<String>,
    /// Path below the project root without the `.json` extension; empty when
    /// the path is not a translation file.
    pub locale: String,
}

/// Result of one ingestion attempt.
#[derive(Debug)]
pub enum IngestOutcome {
    /// The slot now holds the file's contents.
    Loaded {
        /// Project name
        project: String,
        /// Locale id
        locale: String,
    },
    /// The path is not a translation file of any configured project.
    Ignored,
    /// A newer load of the same slot finished first.
    Stale {
        /// Project name
        project: String,
        /// Locale id
        locale: String,
    },
    /// Reading or parsing failed; the slot was left untouched.
    Failed(IndexerError),
}

/// Errors raised while discovering, reading or watching translation files.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// A project root could not be listed during discovery
    #[error("Failed to list project directory {path}: {source}")]
    DirectoryUnavailable {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Error when failing to read a translation file
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file's contents are not valid JSON
    #[error("Failed to parse file {path}: {source}")]
    Parse {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
    /// The filesystem watcher could not be set up
    #[error("Failed to watch translation files: {0}")]
    Watcher(#[from] notify::Error),
}

//! Loads one translation file into the store.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use crate::config::ProjectConfig;
use crate::indexer::identity::{
    Separator,
    resolve_identity,
};
use crate::indexer::types::{
    IndexerError,
    IngestOutcome,
};
use crate::input::translation::TranslationTree;
use crate::store::{
    CommitOutcome,
    TranslationStore,
};

/// Turns file paths into store updates. Cheap to clone; clones share the store.
#[derive(Debug, Clone)]
pub struct Ingestor {
    /// Root the project paths are relative to
    workspace_root: PathBuf,
    /// Configured projects, first match wins
    projects: Arc<[ProjectConfig]>,
    /// Separator used when matching paths
    separator: Separator,
    /// Destination of every load
    store: Arc<TranslationStore>,
}

impl Ingestor {
    /// Creates an ingestor writing into `store`.
    #[must_use]
    pub const fn new(
        workspace_root: PathBuf,
        projects: Arc<[ProjectConfig]>,
        separator: Separator,
        store: Arc<TranslationStore>,
    ) -> Self {
        Self { workspace_root, projects, separator, store }
    }

    /// Reads and parses `path`, then replaces its slot in the store.
    ///
    /// Failures only affect this attempt: they are logged, and the slot keeps
    /// whatever it held before.
    pub async fn ingest(&self, path: &Path) -> IngestOutcome {
        let identity =
            resolve_identity(path, &self.workspace_root, &self.projects, self.separator);
        let Some(project) = identity.project else {
            tracing::debug!(path = %path.display(), "Not a translation file, ignoring");
            return IngestOutcome::Ignored;
        };
        if identity.locale.is_empty() {
            tracing::debug!(project = %project, path = %path.display(), "No locale in path, ignoring");
            return IngestOutcome::Ignored;
        }
        let locale = identity.locale;

        // Drawn before the read so that commits follow start order per slot.
        let ticket = self.store.ticket();

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                let error = IndexerError::FileRead { path: path.to_path_buf(), source };
                tracing::warn!(project = %project, locale = %locale, %error, "Translation file not loaded");
                return IngestOutcome::Failed(error);
            }
        };

        let tree = match TranslationTree::parse(&bytes) {
            Ok(tree) => tree,
            Err(source) => {
                let error = IndexerError::Parse { path: path.to_path_buf(), source };
                tracing::warn!(project = %project, locale = %locale, %error, "Translation file not loaded");
                return IngestOutcome::Failed(error);
            }
        };

        match self.store.commit(&project, &locale, ticket, tree) {
            CommitOutcome::Applied => {
                tracing::info!(project = %project, locale = %locale, "Translation loaded");
                IngestOutcome::Loaded { project, locale }
            }
            CommitOutcome::Stale => {
                tracing::debug!(project = %project, locale = %locale, "Newer load already applied, discarding");
                IngestOutcome::Stale { project, locale }
            }
        }
    }

    /// The store this ingestor writes into.
    #[must_use]
    pub fn store(&self) -> &TranslationStore {
        &self.store
    }
}

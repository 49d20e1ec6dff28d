//! The localization subsystem of one workspace.
use std::path::{
    Path,
    PathBuf,
};
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use crate::config::{
    ConfigError,
    HelperSettings,
    ProjectConfig,
};
use crate::ide::lookup::{
    LookupEntry,
    lookup,
};
use crate::indexer::discovery::{
    discover,
    locale_file,
    project_dir,
};
use crate::indexer::identity::Separator;
use crate::indexer::ingest::Ingestor;
use crate::indexer::types::{
    DiscoveredProject,
    IndexerError,
    IngestOutcome,
};
use crate::indexer::watcher::ChangeWatcher;
use crate::store::TranslationStore;

/// Owns the translation store of a workspace and keeps it in sync with disk.
///
/// Created per workspace; a configuration or workspace change replaces the
/// whole instance instead of mutating it.
#[derive(Debug)]
pub struct WorkspaceIndexer {
    /// Canonicalized when possible so watcher paths line up with it.
    workspace_root: PathBuf,
    /// Configured projects, in configuration order.
    projects: Arc<[ProjectConfig]>,
    /// Loaded translations.
    store: Arc<TranslationStore>,
    /// Shared with the watcher's event loop.
    ingestor: Ingestor,
    /// `None` until started and after stopping.
    watcher: Mutex<Option<ChangeWatcher>>,
}

impl WorkspaceIndexer {
    /// Builds an indexer for `workspace_root` using the platform's separator.
    ///
    /// # Errors
    /// `ConfigError::MissingProjects` when no projects are configured.
    pub fn new(workspace_root: &Path, settings: &HelperSettings) -> Result<Self, ConfigError> {
        Self::with_separator(workspace_root, settings, Separator::native())
    }

    /// Same as [`new`](Self::new) with an explicit path separator.
    ///
    /// # Errors
    /// `ConfigError::MissingProjects` when no projects are configured.
    pub fn with_separator(
        workspace_root: &Path,
        settings: &HelperSettings,
        separator: Separator,
    ) -> Result<Self, ConfigError> {
        let projects: Arc<[ProjectConfig]> = settings.projects()?.into();
        let workspace_root =
            workspace_root.canonicalize().unwrap_or_else(|_| workspace_root.to_path_buf());
        let store = Arc::new(TranslationStore::new());
        let ingestor = Ingestor::new(
            workspace_root.clone(),
            Arc::clone(&projects),
            separator,
            Arc::clone(&store),
        );

        Ok(Self { workspace_root, projects, store, ingestor, watcher: Mutex::new(None) })
    }

    /// Starts watching the project roots, then loads every discovered locale
    /// in parallel.
    ///
    /// Calling `start` on a running indexer only reloads.
    ///
    /// # Errors
    /// `IndexerError::Watcher` when the filesystem watcher cannot be created;
    /// the initial load is skipped in that case.
    pub async fn start(&self) -> Result<Vec<DiscoveredProject>, IndexerError> {
        tracing::info!(workspace_root = %self.workspace_root.display(), "Starting translation indexer");

        {
            let mut watcher = self.watcher.lock().unwrap_or_else(PoisonError::into_inner);
            if watcher.is_none() {
                let roots: Vec<PathBuf> = self
                    .projects
                    .iter()
                    .map(|project| project_dir(&self.workspace_root, project))
                    .collect();
                *watcher = Some(ChangeWatcher::start(&roots, self.ingestor.clone())?);
            }
        }

        Ok(self.load_all().await)
    }

    /// Discovers every project's locales and ingests each one.
    pub async fn load_all(&self) -> Vec<DiscoveredProject> {
        let discovered = discover(&self.workspace_root, &self.projects).await;

        let loads = self.projects.iter().zip(&discovered).flat_map(|(project, found)| {
            found.locales.iter().map(move |locale| locale_file(&self.workspace_root, project, locale))
        });
        let loads: Vec<PathBuf> = loads.collect();
        futures::future::join_all(loads.iter().map(|path| self.ingestor.ingest(path))).await;

        tracing::info!(files = loads.len(), "Initial translation load complete");
        discovered
    }

    /// Loads a single translation file, e.g. on a change the host noticed itself.
    pub async fn ingest(&self, path: &Path) -> IngestOutcome {
        self.ingestor.ingest(path).await
    }

    /// Stops the watcher. The store is kept. Safe to call repeatedly.
    pub fn stop(&self) {
        let watcher = self.watcher.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(mut watcher) = watcher {
            watcher.stop();
            tracing::info!("Translation indexer stopped");
        }
    }

    /// Whether the change watcher is running.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(ChangeWatcher::is_running)
    }

    /// Every truthy translation of `token`, see [`lookup`].
    #[must_use]
    pub fn lookup(&self, token: &str, flatten: bool) -> Vec<LookupEntry> {
        lookup(token, &self.projects, &self.store, flatten)
    }

    /// Configured projects.
    #[must_use]
    pub fn projects(&self) -> &[ProjectConfig] {
        &self.projects
    }

    /// The translation store.
    #[must_use]
    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    /// Root every project path is relative to.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}

impl Drop for WorkspaceIndexer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    fn settings(projects: Vec<ProjectConfig>) -> HelperSettings {
        HelperSettings { projects: Some(projects), flatten: false }
    }

    #[test]
    fn missing_projects_refuses_to_build() {
        let temp_dir = TempDir::new().unwrap();

        let result = WorkspaceIndexer::new(temp_dir.path(), &HelperSettings::default());

        assert!(matches!(result, Err(ConfigError::MissingProjects)));
    }

    #[tokio::test]
    async fn start_loads_discovered_locales() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("i18n")).unwrap();
        fs::write(temp_dir.path().join("i18n/en.json"), r#"{"a": "A"}"#).unwrap();
        fs::write(temp_dir.path().join("i18n/ja.json"), r#"{"a": "エー"}"#).unwrap();
        let indexer =
            WorkspaceIndexer::new(temp_dir.path(), &settings(vec![ProjectConfig::new("app", "i18n")]))
                .unwrap();

        let discovered = indexer.start().await.unwrap();

        assert_that!(discovered[0].locales, elements_are![eq("en"), eq("ja")]);
        assert_that!(indexer.store().locales("app"), elements_are![eq("en"), eq("ja")]);
        assert_that!(indexer.lookup("a", false), len(eq(2)));
        indexer.stop();
    }

    #[tokio::test]
    async fn stop_is_idempotent_and_keeps_store() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("i18n")).unwrap();
        fs::write(temp_dir.path().join("i18n/en.json"), r#"{"a": "A"}"#).unwrap();
        let indexer =
            WorkspaceIndexer::new(temp_dir.path(), &settings(vec![ProjectConfig::new("app", "i18n")]))
                .unwrap();

        indexer.stop();
        indexer.start().await.unwrap();
        assert!(indexer.is_watching());

        indexer.stop();
        indexer.stop();

        assert!(!indexer.is_watching());
        assert_that!(indexer.lookup("a", false), len(eq(1)));
    }

    #[tokio::test]
    async fn unreadable_project_does_not_block_others() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("ok")).unwrap();
        fs::write(temp_dir.path().join("ok/en.json"), r#"{"a": "A"}"#).unwrap();
        let indexer = WorkspaceIndexer::new(
            temp_dir.path(),
            &settings(vec![ProjectConfig::new("gone", "gone"), ProjectConfig::new("ok", "ok")]),
        )
        .unwrap();

        let discovered = indexer.start().await.unwrap();

        assert_that!(discovered[0].locales, is_empty());
        assert_that!(indexer.lookup("a", false), len(eq(1)));
        indexer.stop();
    }
}

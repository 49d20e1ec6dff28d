//! Finds the locales each project currently has on disk.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::ProjectConfig;
use crate::indexer::types::{
    DiscoveredProject,
    IndexerError,
};

/// Lists the locales of every project, in configured order.
///
/// Projects are scanned concurrently. A project whose root cannot be listed
/// contributes no locales; the others are unaffected.
pub async fn discover(workspace_root: &Path, projects: &[ProjectConfig]) -> Vec<DiscoveredProject> {
    let scans = projects.iter().map(|project| {
        let root = project_dir(workspace_root, project);
        let name = project.name.clone();
        async move {
            let locales = match tokio::task::spawn_blocking(move || scan_locales(&root)).await {
                Ok(Ok(locales)) => locales,
                Ok(Err(error)) => {
                    tracing::warn!(project = %name, %error, "Project directory unavailable");
                    Vec::new()
                }
                Err(error) => {
                    tracing::warn!(project = %name, %error, "Discovery task failed");
                    Vec::new()
                }
            };
            tracing::debug!(project = %name, locales = ?locales, "Discovered locales");
            DiscoveredProject { project: name, locales }
        }
    });

    futures::future::join_all(scans).await
}

/// Absolute root directory of `project`.
#[must_use]
pub fn project_dir(workspace_root: &Path, project: &ProjectConfig) -> PathBuf {
    workspace_root.join(&project.path)
}

/// Path of the translation file backing `locale` in `project`.
#[must_use]
pub fn locale_file(workspace_root: &Path, project: &ProjectConfig, locale: &str) -> PathBuf {
    project_dir(workspace_root, project).join(format!("{locale}.json"))
}

/// Collects one locale id per `*.json` file below `root`, sorted.
///
/// Files directly under the root give plain ids (`en`); nested files keep
/// their directories (`common/en`).
fn scan_locales(root: &Path) -> Result<Vec<String>, IndexerError> {
    std::fs::read_dir(root)
        .map_err(|source| IndexerError::DirectoryUnavailable { path: root.to_path_buf(), source })?;

    let mut locales = Vec::new();
    for result in WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Some(locale) = relative.to_string_lossy().strip_suffix(".json") {
            locales.push(locale.to_string());
        }
    }

    locales.sort();
    Ok(locales)
}

//! Workspace-related handlers.

use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeWorkspaceFoldersParams,
};

use super::super::backend::Backend;

/// `workspace/didChangeConfiguration` 通知を処理
///
/// 設定を検証して差し替え、翻訳インデクサーを作り直す。
pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    let mut config_manager = backend.config_manager.lock().await;
    match config_manager.apply_client_change(params.settings) {
        Ok(true) => {
            drop(config_manager);
            tracing::info!("configuration updated successfully");

            backend.start_indexer().await;
        }
        Ok(false) => {}
        Err(error) => {
            tracing::error!(%error, "configuration rejected, keeping current settings");
        }
    }
}

/// `workspace/didChangeWorkspaceFolders` 通知を処理
pub async fn handle_did_change_workspace_folders(
    backend: &Backend,
    params: DidChangeWorkspaceFoldersParams,
) {
    tracing::info!(
        added = params.event.added.len(),
        removed = params.event.removed.len(),
        "workspace folders changed"
    );

    let workspace_root = match backend.get_workspace_folders().await {
        Ok(folders) => folders.first().and_then(|folder| Backend::uri_to_path(&folder.uri)),
        Err(error) => {
            tracing::warn!(%error, "Failed to fetch workspace folders");
            params.event.added.first().and_then(|folder| Backend::uri_to_path(&folder.uri))
        }
    };

    let has_root = workspace_root.is_some();
    let mut config_manager = backend.config_manager.lock().await;
    if let Err(error) = config_manager.switch_workspace(workspace_root) {
        tracing::error!(%error, "Configuration error after workspace change");
    }
    drop(config_manager);

    if has_root {
        backend.start_indexer().await;
    } else {
        backend.stop_indexer().await;
    }
}

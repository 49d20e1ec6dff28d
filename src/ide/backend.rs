//! LSP Backend 実装

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidChangeWorkspaceFoldersParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    Hover,
    HoverParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    Url,
    WorkspaceFolder,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use crate::config::ConfigManager;
use crate::ide::state::ServerState;
use crate::indexer::workspace::WorkspaceIndexer;

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    /// LSP クライアント
    pub client: Client,
    /// 設定管理
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// 共有状態
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// 新しい Backend を作成
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            state: ServerState::new(),
        }
    }

    /// ワークスペースフォルダを取得
    ///
    /// フォルダが設定されていない場合は空のVecを返します。
    ///
    /// # Errors
    /// クライアントとの通信に失敗した場合
    pub(crate) async fn get_workspace_folders(&self) -> Result<Vec<WorkspaceFolder>> {
        self.client.workspace_folders().await.map(Option::unwrap_or_default)
    }

    /// URI をファイルパスに変換
    pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
        uri.to_file_path().ok().or_else(|| {
            tracing::warn!("Failed to convert URI to file path: {}", uri);
            None
        })
    }

    /// 現在の設定で翻訳インデクサーを作り直して起動する
    ///
    /// 既存のインデクサーは停止・破棄される。`projects` が設定されていない場合は
    /// ユーザーに一度通知し、起動しない。
    ///
    /// # Returns
    /// 起動できたかどうか
    pub async fn start_indexer(&self) -> bool {
        let (workspace_root, settings) = {
            let config_manager = self.config_manager.lock().await;
            (config_manager.workspace_root().cloned(), config_manager.get_settings().clone())
        };

        let Some(workspace_root) = workspace_root else {
            tracing::debug!("No workspace root, translation indexer not started");
            self.state.replace_indexer(None).await;
            return false;
        };

        let indexer = match WorkspaceIndexer::new(&workspace_root, &settings) {
            Ok(indexer) => Arc::new(indexer),
            Err(error) => {
                tracing::error!(%error, "Translation indexer not started");
                self.state.replace_indexer(None).await;
                self.client.show_message(MessageType::INFO, error.to_string()).await;
                return false;
            }
        };

        // 読み込み途中でもホバーできるよう、起動前に差し替える
        self.state.replace_indexer(Some(Arc::clone(&indexer))).await;

        match indexer.start().await {
            Ok(discovered) => {
                tracing::info!(projects = discovered.len(), "i18n helper is now active");
                true
            }
            Err(error) => {
                tracing::error!(%error, "Failed to start translation indexer");
                self.client
                    .log_message(MessageType::ERROR, format!("Failed to start translation indexer: {error}"))
                    .await;
                false
            }
        }
    }

    /// 翻訳インデクサーを停止・破棄する（何度呼んでもよい）
    pub async fn stop_indexer(&self) {
        self.state.replace_indexer(None).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown(self).await
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        handlers::workspace::handle_did_change_workspace_folders(self, params).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        handlers::features::handle_hover(self, params).await
    }
}

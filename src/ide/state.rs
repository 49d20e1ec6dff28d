//! LSP サーバーの共有状態

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;

use crate::indexer::workspace::WorkspaceIndexer;

/// LSP サーバーの共有状態
///
/// `Backend` から状態管理の責務を分離し、ハンドラー間で共有可能にします。
///
/// # ロック順序
///
/// 複数のロックを同時に取得する場合は、以下の順序を厳守してください：
/// 1. `indexer`
/// 2. `documents`
#[derive(Clone, Default)]
pub struct ServerState {
    /// 現在のワークスペースの翻訳インデクサー（未起動なら `None`）
    pub indexer: Arc<Mutex<Option<Arc<WorkspaceIndexer>>>>,
    /// 開いているドキュメントの内容（URI → テキスト）
    pub documents: Arc<Mutex<HashMap<Url, String>>>,
}

impl ServerState {
    /// 新しい `ServerState` を作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在のインデクサーを取得（ロックはすぐに解放される）
    pub async fn current_indexer(&self) -> Option<Arc<WorkspaceIndexer>> {
        self.indexer.lock().await.clone()
    }

    /// インデクサーを差し替え、古いものを停止する
    pub async fn replace_indexer(&self, indexer: Option<Arc<WorkspaceIndexer>>) {
        let previous = std::mem::replace(&mut *self.indexer.lock().await, indexer);
        if let Some(previous) = previous {
            previous.stop();
        }
    }

    /// 指定行のテキストを取得
    pub async fn line(&self, uri: &Url, line: u32) -> Option<String> {
        let documents = self.documents.lock().await;
        let text = documents.get(uri)?;
        text.lines().nth(usize::try_from(line).ok()?).map(str::to_string)
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("indexer", &"<Option<WorkspaceIndexer>>")
            .field("documents", &"<HashMap<Url, String>>")
            .finish()
    }
}

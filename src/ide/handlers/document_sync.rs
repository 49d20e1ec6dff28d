//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
};

use super::super::backend::Backend;

/// `textDocument/didOpen` 通知を処理
pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    tracing::debug!(uri = %uri, "file opened");

    backend.state.documents.lock().await.insert(uri, params.text_document.text);
}

/// `textDocument/didChange` 通知を処理
pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    // FULL sync なので最後の変更が全文
    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };

    backend.state.documents.lock().await.insert(uri, change.text);
}

/// `textDocument/didClose` 通知を処理
pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    tracing::debug!(uri = %uri, "file closed");

    backend.state.documents.lock().await.remove(&uri);
}

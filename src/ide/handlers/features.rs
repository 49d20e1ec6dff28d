//! LSP 機能ハンドラー
//!
//! `hover` の処理を担当します。

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    Hover,
    HoverContents,
    HoverParams,
    MarkupContent,
    MarkupKind,
};

use super::super::backend::Backend;
use crate::ide::hover::{
    extract_key,
    generate_hover_content,
};

/// `textDocument/hover` リクエストを処理
pub async fn handle_hover(backend: &Backend, params: HoverParams) -> Result<Option<Hover>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    tracing::debug!(uri = %uri, line = position.line, character = position.character, "Hover request");

    let Some(line) = backend.state.line(&uri, position.line).await else {
        tracing::debug!("Document not open: {}", uri);
        return Ok(None);
    };

    let character = usize::try_from(position.character).unwrap_or(usize::MAX);
    let Some(key) = extract_key(&line, character) else {
        tracing::debug!("No translation key found at position");
        return Ok(None);
    };

    let Some(indexer) = backend.state.current_indexer().await else {
        tracing::debug!("Translation indexer not running");
        return Ok(None);
    };

    let flatten = backend.config_manager.lock().await.get_settings().flatten;
    let entries = indexer.lookup(&key, flatten);
    let Some(hover_text) = generate_hover_content(indexer.projects(), &entries) else {
        tracing::debug!("No translations found for key: {}", key);
        return Ok(None);
    };

    tracing::debug!(key = %key, entries = entries.len(), "Generated hover content");

    Ok(Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: hover_text,
        }),
        range: None,
    }))
}

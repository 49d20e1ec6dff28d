//! i18n-helper-language-server
//!
//! プロジェクト・ロケールごとの翻訳 JSON を読み込み、ドット区切りのキーに
//! 対応する翻訳をホバーで表示する Language Server Protocol (LSP) 実装

pub mod config;
pub mod ide;
pub mod indexer;
pub mod input;
pub mod store;

// Backend を再エクスポート
pub use ide::backend::Backend;

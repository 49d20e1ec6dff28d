//! LSP handler modules (internal to `ide::backend`).

#![allow(unreachable_pub)]

pub mod document_sync;
pub mod features;
pub mod lifecycle;
pub mod workspace;

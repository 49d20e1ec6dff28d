//! Translation indexer: maps translation files to projects and locales,
//! loads them into the store and keeps the store in sync with the disk.

pub mod discovery;
pub mod identity;
pub mod ingest;
pub mod types;
pub mod watcher;
pub mod workspace;

//! Filesystem watcher feeding add/change events into ingestion.
//!
//! `notify` delivers events on its own thread; they cross into the tokio
//! runtime through an unbounded channel and every affected path is ingested
//! in its own task. Repeated events for one path are harmless because each
//! ingestion replaces the whole slot.

use std::path::PathBuf;

use notify::event::{
    ModifyKind,
    RenameMode,
};
use notify::{
    Event,
    EventKind,
    RecommendedWatcher,
    RecursiveMode,
    Watcher,
};
use tokio::sync::mpsc;
use tokio::task::{
    JoinHandle,
    JoinSet,
};

use crate::indexer::ingest::Ingestor;
use crate::indexer::types::IndexerError;

/// Handle to a running watch over the project roots.
pub struct ChangeWatcher {
    /// Dropping the watcher releases the OS watches.
    watcher: Option<RecommendedWatcher>,
    /// Task dispatching events to the ingestor.
    event_loop: Option<JoinHandle<()>>,
}

impl ChangeWatcher {
    /// Watches every root recursively. Must be called inside a tokio runtime.
    ///
    /// Roots that cannot be watched (e.g. missing directories) are logged and
    /// skipped.
    ///
    /// # Errors
    /// `IndexerError::Watcher` when the platform watcher cannot be created.
    pub fn start(roots: &[PathBuf], ingestor: Ingestor) -> Result<Self, IndexerError> {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        tracing::debug!("Watcher event dropped, event loop has stopped");
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "Filesystem watcher error");
                }
            })?;

        for root in roots {
            match watcher.watch(root, RecursiveMode::Recursive) {
                Ok(()) => tracing::debug!(root = %root.display(), "Watching translation directory"),
                Err(error) => {
                    tracing::warn!(root = %root.display(), %error, "Failed to watch translation directory");
                }
            }
        }

        let event_loop = tokio::spawn(run_event_loop(rx, ingestor));

        Ok(Self { watcher: Some(watcher), event_loop: Some(event_loop) })
    }

    /// Releases the OS watches and stops dispatching. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            drop(watcher);
            tracing::debug!("Watcher closed");
        }
        if let Some(event_loop) = self.event_loop.take() {
            event_loop.abort();
        }
    }

    /// Whether the OS watches are still held.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.watcher.is_some()
    }
}

impl std::fmt::Debug for ChangeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeWatcher")
            .field("watcher", &self.watcher.as_ref().map(|_| "<RecommendedWatcher>"))
            .field("event_loop", &self.event_loop)
            .finish()
    }
}

impl Drop for ChangeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Whether `kind` means a file was added or its contents changed.
fn is_add_or_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_) | ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Ingests every added or changed path until the sender side is dropped.
async fn run_event_loop(mut rx: mpsc::UnboundedReceiver<Event>, ingestor: Ingestor) {
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    break;
                };
                if !is_add_or_change(&event.kind) {
                    continue;
                }
                for path in event.paths {
                    let ingestor = ingestor.clone();
                    tasks.spawn(async move { ingestor.ingest(&path).await });
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(error) = joined {
                    tracing::warn!(%error, "Ingestion task failed");
                }
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(error) = joined {
            tracing::warn!(%error, "Ingestion task failed");
        }
    }
}

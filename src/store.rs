//! Shared `project → locale → translations` store.
//!
//! Each `(project, locale)` slot is replaced wholesale by a single assignment
//! under the write lock, so readers see either the previous tree or the new
//! one. Writers draw a [`Ticket`] before their first suspension point; a
//! commit carrying a ticket older than the slot's current version is dropped,
//! which keeps each slot in start order even when reads finish out of order.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
};

use crate::input::translation::TranslationTree;

/// Position of one ingestion attempt in the store-wide write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// One loaded translation file.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Ticket of the write that produced this slot.
    pub version: Ticket,
    /// Parsed file contents.
    pub tree: Arc<TranslationTree>,
}

/// Result of [`TranslationStore::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The slot now holds the committed tree.
    Applied,
    /// A newer write already landed; the tree was discarded.
    Stale,
}

/// Locales of a single project, in locale order.
pub type ProjectSlots = BTreeMap<String, Slot>;

/// Loaded translations of every project, keyed by project then locale.
#[derive(Debug, Default)]
pub struct TranslationStore {
    /// Source of monotonically increasing tickets.
    next_ticket: AtomicU64,
    /// project name → locale → slot
    projects: RwLock<HashMap<String, ProjectSlots>>,
}

impl TranslationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next write ticket.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Replaces the `(project, locale)` slot with `tree` unless a write with a
    /// newer ticket has already been committed there.
    pub fn commit(
        &self,
        project: &str,
        locale: &str,
        ticket: Ticket,
        tree: TranslationTree,
    ) -> CommitOutcome {
        let mut projects = self.projects.write().unwrap_or_else(PoisonError::into_inner);
        let locales = projects.entry(project.to_string()).or_default();

        if let Some(current) = locales.get(locale)
            && current.version > ticket
        {
            return CommitOutcome::Stale;
        }

        locales.insert(locale.to_string(), Slot { version: ticket, tree: Arc::new(tree) });
        CommitOutcome::Applied
    }

    /// Returns the tree currently held by the `(project, locale)` slot.
    #[must_use]
    pub fn get(&self, project: &str, locale: &str) -> Option<Arc<TranslationTree>> {
        self.read().get(project)?.get(locale).map(|slot| Arc::clone(&slot.tree))
    }

    /// Locales currently loaded for `project`, in enumeration order.
    #[must_use]
    pub fn locales(&self, project: &str) -> Vec<String> {
        self.read().get(project).map(|locales| locales.keys().cloned().collect()).unwrap_or_default()
    }

    /// Read access for lookups that need a consistent view across slots.
    pub fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ProjectSlots>> {
        self.projects.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether no slot has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    fn tree(value: serde_json::Value) -> TranslationTree {
        TranslationTree::from(value)
    }

    #[rstest]
    fn new_store_is_empty() {
        let store = TranslationStore::new();

        assert_that!(store.is_empty(), eq(true));
        assert_that!(store.get("app", "en"), none());
        assert_that!(store.locales("app"), is_empty());
    }

    #[rstest]
    fn tickets_increase() {
        let store = TranslationStore::new();

        let first = store.ticket();
        let second = store.ticket();

        assert!(first < second);
    }

    #[rstest]
    fn commit_overwrites_whole_slot() {
        let store = TranslationStore::new();
        let first = store.ticket();
        let second = store.ticket();

        store.commit("app", "en", first, tree(json!({"a": "1", "b": "2"})));
        let outcome = store.commit("app", "en", second, tree(json!({"a": "3"})));

        assert_eq!(outcome, CommitOutcome::Applied);
        let slot = store.get("app", "en").unwrap();
        assert_eq!(*slot, tree(json!({"a": "3"})));
        assert_that!(slot.leaf_at(["b"]), none());
    }

    #[rstest]
    fn older_ticket_is_discarded() {
        let store = TranslationStore::new();
        let older = store.ticket();
        let newer = store.ticket();

        store.commit("app", "en", newer, tree(json!({"v": "new"})));
        let outcome = store.commit("app", "en", older, tree(json!({"v": "old"})));

        assert_eq!(outcome, CommitOutcome::Stale);
        assert_eq!(*store.get("app", "en").unwrap(), tree(json!({"v": "new"})));
    }

    #[rstest]
    fn slots_are_independent() {
        let store = TranslationStore::new();
        let newer = {
            let older = store.ticket();
            let newer = store.ticket();
            store.commit("app", "fr", newer, tree(json!({"v": "fr"})));
            store.commit("app", "en", older, tree(json!({"v": "en"})));
            newer
        };

        assert!(store.get("app", "en").is_some());
        assert_eq!(store.read()["app"]["fr"].version, newer);
    }

    #[rstest]
    fn locales_are_ordered() {
        let store = TranslationStore::new();
        for locale in ["fr", "common/en", "en"] {
            let ticket = store.ticket();
            store.commit("app", locale, ticket, tree(json!({})));
        }

        assert_that!(store.locales("app"), elements_are![eq("common/en"), eq("en"), eq("fr")]);
    }
}

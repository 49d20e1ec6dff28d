//! Resolves a dotted translation key against every loaded project and locale.

use crate::config::ProjectConfig;
use crate::input::translation::Scalar;
use crate::store::TranslationStore;

/// Key separator for non-flattened lookups.
const KEY_SEPARATOR: char = '.';

/// One translation found for a key.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupEntry {
    /// Project name
    pub project: String,
    /// Locale identifier, e.g. `en` or `docs/fr`
    pub locale: String,
    /// The leaf found at the key
    pub value: Scalar,
}

/// Finds `token` in every slot of the store.
///
/// Projects are visited in configured order and locales in the store's
/// order for that project. With `flatten` the whole token is a single
/// top-level key; otherwise it is split on `.` and walked. Unloaded slots,
/// partial paths and paths ending on a mapping are non-matches, and falsy
/// values (`""`, `0`, `false`, `null`) are skipped.
///
/// Never touches the filesystem; holds the store's read lock for the
/// duration of the walk.
#[must_use]
pub fn lookup(
    token: &str,
    projects: &[ProjectConfig],
    store: &TranslationStore,
    flatten: bool,
) -> Vec<LookupEntry> {
    let path: Vec<&str> =
        if flatten { vec![token] } else { token.split(KEY_SEPARATOR).collect() };

    let slots = store.read();
    let mut entries = Vec::new();

    for project in projects {
        let Some(locales) = slots.get(&project.name) else {
            continue;
        };
        for (locale, slot) in locales {
            let Some(value) = slot.tree.leaf_at(path.iter().copied()) else {
                continue;
            };
            if value.is_truthy() {
                entries.push(LookupEntry {
                    project: project.name.clone(),
                    locale: locale.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    entries
}

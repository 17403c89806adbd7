// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog reconciliation against the extracted key set

use crate::catalog::Catalog;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// The catalog differs from what was loaded and must be saved.
    pub changed: bool,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Keys from the key set whose message is empty, in key-set order.
    pub untranslated: Vec<String>,
}

/// Align `catalog` with `keys`.
///
/// Missing keys are appended with an empty message. With
/// `remove_empty_orphans`, empty entries whose key is not in `keys` are
/// dropped. Translated entries are never removed, orphaned or not.
pub fn reconcile(keys: &[String], catalog: &mut Catalog, remove_empty_orphans: bool) -> Reconciliation {
    let mut outcome = Reconciliation::default();

    for key in keys {
        if !catalog.contains_key(key) {
            catalog.insert(key.as_str(), "");
            outcome.added.push(key.clone());
        }
        if !catalog.is_translated(key) {
            outcome.untranslated.push(key.clone());
        }
    }

    if remove_empty_orphans {
        let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
        let removed = &mut outcome.removed;
        catalog.retain(|key, message| {
            let orphan = message.is_empty() && !wanted.contains(key);
            if orphan {
                removed.push(key.to_string());
            }
            !orphan
        });
    }

    outcome.changed = !outcome.added.is_empty() || !outcome.removed.is_empty();
    outcome
}

/// Entries whose key no template references, translated or not.
pub fn orphans<'a>(keys: &[String], catalog: &'a Catalog) -> Vec<&'a str> {
    let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
    catalog.keys().filter(|key| !wanted.contains(key)).collect()
}

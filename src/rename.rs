// SPDX-License-Identifier: PMPL-1.0-or-later

//! Key rename propagation
//!
//! `keys.csv` lists every key with an empty second column. Filling that
//! column with a new key name asks for a rename: on the next run every
//! `[[old]]` placeholder in the templates becomes `[[new]]` and every locale
//! catalog moves its translation from `old` to `new`.

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::extract::placeholder;
use crate::sources::TemplateSource;
use crate::types::RenameOutcome;
use anyhow::Result;
use indexmap::IndexMap;
use std::path::Path;

/// `old → new` key pairs in canonical catalog order.
pub type RenameMap = IndexMap<String, String>;

/// Rows whose value is non-empty and differs from the key.
pub fn detect_renames(keys_catalog: &Catalog) -> RenameMap {
    keys_catalog
        .iter()
        .filter(|(key, value)| !value.is_empty() && key != value)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Read the canonical key catalog. A missing file means no renames.
pub fn load_renames(path: &Path) -> Result<RenameMap> {
    if !path.exists() {
        return Ok(RenameMap::new());
    }
    Ok(detect_renames(&catalog::load(path)?))
}

/// Rewrite placeholders of renamed keys. Returns `None` when the text has
/// none of them, so the file can be left untouched.
pub fn rename_in_template(text: &str, renames: &RenameMap) -> Option<String> {
    let mut current = text.to_string();
    let mut changed = false;
    for (old, new) in renames {
        let old_placeholder = placeholder(old);
        if current.contains(&old_placeholder) {
            current = current.replace(&old_placeholder, &placeholder(new));
            changed = true;
        }
    }
    changed.then_some(current)
}

/// Move translated entries to their new keys. Returns the number moved.
pub fn rename_in_catalog(catalog: &mut Catalog, renames: &RenameMap) -> usize {
    let mut moved = 0;
    for (old, new) in renames {
        if catalog.rename(old, new) {
            moved += 1;
        }
    }
    moved
}

/// Apply the renames listed in `keys.csv` to every template and every
/// non-default locale catalog.
pub fn run(config: &Config, sources: &[TemplateSource]) -> Result<RenameOutcome> {
    let renames = load_renames(&config.keys_catalog_path())?;
    let mut outcome = RenameOutcome::default();
    if renames.is_empty() {
        tracing::debug!("no key renames requested");
        return Ok(outcome);
    }

    tracing::info!(count = renames.len(), "changes detected in keys");
    for (old, new) in &renames {
        tracing::info!("  {} ==> {}", old, new);
    }

    for source in sources {
        if !source.path.is_file() {
            tracing::warn!(path = %source.path.display(), "template not found, skipping");
            continue;
        }
        let (text, bom) = catalog::read_text_with_bom(&source.path)?;
        if let Some(updated) = rename_in_template(&text, &renames) {
            tracing::info!(path = %source.path.display(), "updating keys in template");
            catalog::write_text(&source.path, &updated, bom)?;
            outcome.templates_updated.push(source.path.clone());
        }
    }

    for locale in config.translated_locales() {
        let Some(path) = config.catalog_path(locale) else {
            continue;
        };
        let mut messages = catalog::load(&path)?;
        if rename_in_catalog(&mut messages, &renames) > 0 {
            tracing::info!(path = %path.display(), "updating keys in catalog");
            catalog::save(&path, &messages)?;
            outcome.catalogs_updated.push(path);
        }
    }

    outcome.renames = renames.into_iter().collect();
    Ok(outcome)
}

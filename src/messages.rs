// SPDX-License-Identifier: PMPL-1.0-or-later

//! Messages stage: keep catalogs in sync with template keys
//!
//! Collects the keys of every template, reconciles each non-default locale
//! catalog against them, exports JSON catalogs, writes the untranslated-keys
//! report and regenerates `keys.csv` with blank rename columns.

use crate::catalog::{self, write_atomic, Catalog};
use crate::config::Config;
use crate::extract::collect_keys;
use crate::reconcile::reconcile;
use crate::report::untranslated;
use crate::sources::TemplateSource;
use crate::types::{MessagesOutcome, UntranslatedEntry};
use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Keys found in the templates that are present on disk. Missing templates
/// are logged and returned separately.
pub fn collect_template_keys(sources: &[TemplateSource]) -> Result<(Vec<String>, Vec<PathBuf>)> {
    let mut keys = IndexSet::new();
    let mut missing = Vec::new();
    for source in sources {
        if !source.path.is_file() {
            tracing::warn!(path = %source.path.display(), "template not found, skipping");
            missing.push(source.path.clone());
            continue;
        }
        let text = catalog::read_text(&source.path)?;
        collect_keys(&text, &mut keys);
    }
    Ok((keys.into_iter().collect(), missing))
}

pub fn run(config: &Config, sources: &[TemplateSource]) -> Result<MessagesOutcome> {
    let report_path = config.untranslated_report_path();
    untranslated::clear(&report_path)?;

    let (keys, missing_templates) = collect_template_keys(sources)?;
    let mut outcome = MessagesOutcome {
        keys: keys.len(),
        missing_templates,
        ..MessagesOutcome::default()
    };

    for locale in config.translated_locales() {
        let Some(path) = config.catalog_path(locale) else {
            continue;
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "catalog will be created");
        }

        let mut messages = catalog::load(&path)?;
        let reconciliation = reconcile(&keys, &mut messages, config.remove_empty_keys);
        if reconciliation.changed {
            tracing::info!(
                path = %path.display(),
                added = reconciliation.added.len(),
                removed = reconciliation.removed.len(),
                "creating/updating catalog"
            );
            catalog::save(&path, &messages)?;
            outcome.catalogs_written.push(path.clone());
        }

        outcome
            .untranslated
            .extend(reconciliation.untranslated.into_iter().map(|key| UntranslatedEntry {
                catalog: path.clone(),
                key,
            }));

        if let Some(json_path) = config.json_export_path(locale) {
            export_json(&json_path, &keys, &messages)?;
            outcome.json_exports.push(json_path);
        }
    }

    if untranslated::write(&report_path, &outcome.untranslated)? {
        outcome.untranslated_report = Some(report_path);
    }

    outcome.keys_catalog = regenerate_keys_catalog(config, &keys)?;
    Ok(outcome)
}

/// Write `{key: message}` for every extracted key, in key order, indented
/// with four spaces.
pub fn export_json(path: &Path, keys: &[String], messages: &Catalog) -> Result<()> {
    let data: IndexMap<&str, &str> = keys
        .iter()
        .map(|key| (key.as_str(), messages.get(key).unwrap_or_default()))
        .collect();

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)
        .with_context(|| format!("serializing {}", path.display()))?;
    let json = String::from_utf8(buffer).context("JSON output is not valid UTF-8")?;

    tracing::info!(path = %path.display(), "generating JSON catalog");
    write_atomic(path, &json)
}

/// Replace `keys.csv` with one blank-valued row per key. The file is removed
/// and not recreated when there is no default locale or no key.
pub fn regenerate_keys_catalog(config: &Config, keys: &[String]) -> Result<Option<PathBuf>> {
    let path = config.keys_catalog_path();
    if path.exists() {
        std::fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
    }
    if config.default_locale.is_none() || keys.is_empty() {
        return Ok(None);
    }

    let rows: Catalog = keys.iter().map(|key| (key.as_str(), "")).collect();
    catalog::save(&path, &rows)?;
    Ok(Some(path))
}

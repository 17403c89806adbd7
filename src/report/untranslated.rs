// SPDX-License-Identifier: PMPL-1.0-or-later

//! Untranslated-keys report (`empty_messages.log`)

use crate::catalog::write_atomic;
use crate::types::UntranslatedEntry;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

const TITLE: &str = "LIST OF MESSAGE KEYS WITH NO TRANSLATION";

/// Delete the report if present.
pub fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("removing {}", path.display()))?;
    }
    Ok(())
}

/// Replace the report with one listing `entries`. Nothing is written when
/// there are no entries. Returns true when a report was written.
pub fn write(path: &Path, entries: &[UntranslatedEntry]) -> Result<bool> {
    clear(path)?;
    if entries.is_empty() {
        return Ok(false);
    }
    write_atomic(path, &format(entries, Local::now()))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "wrote untranslated keys report");
    Ok(true)
}

/// Render the report text. Consecutive entries of the same catalog share a
/// `* FILE:` block.
pub fn format(entries: &[UntranslatedEntry], generated_at: DateTime<Local>) -> String {
    let mut content = format!(
        "{}\nThis file is automatically generated by {}\nGenerated on {}\n",
        TITLE,
        env!("CARGO_PKG_NAME"),
        generated_at.format("%a %b %d %Y %H:%M:%S %z")
    );

    let mut current: Option<&Path> = None;
    for entry in entries {
        if current != Some(entry.catalog.as_path()) {
            content.push_str(&format!("\n\n\n* FILE: {}\n\n", entry.catalog.display()));
            current = Some(entry.catalog.as_path());
        }
        content.push_str(&entry.key);
        content.push('\n');
    }
    content
}

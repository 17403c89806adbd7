// SPDX-License-Identifier: PMPL-1.0-or-later

//! Destination paths for rendered templates

use crate::config::TransformRule;
use anyhow::{bail, Result};
use regex::Regex;
use std::path::{Component, Path, PathBuf};

/// `dest_root / locale / relative`, where `relative` is the template path
/// with `base_path` stripped when the template lives under it.
///
/// Only normal components of the relative part are kept, so an absolute or
/// `..`-laden template path still lands inside the destination root.
pub fn destination_path(
    template: &Path,
    base_path: Option<&Path>,
    dest_root: &Path,
    locale: &str,
) -> PathBuf {
    let relative = base_path
        .and_then(|base| template.strip_prefix(base).ok())
        .unwrap_or(template);

    let mut destination = dest_root.join(locale);
    for component in relative.components() {
        if let Component::Normal(part) = component {
            destination.push(part);
        }
    }
    destination
}

/// Rewrites a computed destination path before the file is written.
pub trait DestTransform {
    fn transform(&self, destination: &Path) -> Result<PathBuf>;
}

impl<F> DestTransform for F
where
    F: Fn(&Path) -> PathBuf,
{
    fn transform(&self, destination: &Path) -> Result<PathBuf> {
        Ok(self(destination))
    }
}

/// Regex rewrite of the destination path, configured through
/// `transformDestFile`.
#[derive(Debug, Clone)]
pub struct RegexTransform {
    pattern: Regex,
    replacement: String,
}

impl RegexTransform {
    pub fn new(rule: &TransformRule) -> Result<Self> {
        Ok(Self {
            pattern: rule.compile()?,
            replacement: rule.replacement.clone(),
        })
    }
}

impl DestTransform for RegexTransform {
    fn transform(&self, destination: &Path) -> Result<PathBuf> {
        let original = destination.to_string_lossy();
        let rewritten = self
            .pattern
            .replace_all(&original, self.replacement.as_str());
        if rewritten.trim().is_empty() {
            bail!(
                "transformDestFile turned {} into an empty path",
                destination.display()
            );
        }
        Ok(PathBuf::from(rewritten.into_owned()))
    }
}

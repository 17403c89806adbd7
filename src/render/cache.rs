// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-locale catalog cache for one render pass

use crate::catalog::{self, Catalog};
use crate::config::Config;
use anyhow::Result;
use filetime::FileTime;
use std::path::PathBuf;

/// Lazily loaded catalog of a single locale.
///
/// Created at the start of a locale's pass and dropped before the next
/// locale, so catalogs never leak across locales. The default locale has no
/// catalog path and never loads anything.
#[derive(Debug)]
pub struct CatalogCache {
    path: Option<PathBuf>,
    catalog: Option<Catalog>,
}

impl CatalogCache {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            catalog: None,
        }
    }

    pub fn for_locale(config: &Config, locale: &str) -> Self {
        Self::new(config.catalog_path(locale))
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Modification time of the catalog file, if the locale has one on disk.
    pub fn modified(&self) -> Result<Option<FileTime>> {
        match &self.path {
            Some(path) => catalog::modified(path),
            None => Ok(None),
        }
    }

    /// The locale's catalog, loading it on first use.
    pub fn get(&mut self) -> Result<Option<&Catalog>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if self.catalog.is_none() {
            tracing::debug!(path = %path.display(), "loading catalog");
            self.catalog = Some(catalog::load(path)?);
        }
        Ok(self.catalog.as_ref())
    }
}

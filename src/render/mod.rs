// SPDX-License-Identifier: PMPL-1.0-or-later

//! Incremental template rendering
//!
//! For every locale, each template is rendered to
//! `dest-root/locale/relative-path` when the output is missing or older than
//! the template or the locale catalog. Placeholders resolve to the catalog
//! message, falling back to the key itself.

pub mod cache;
pub mod destination;

use crate::catalog::{self, escape_html, Catalog};
use crate::config::Config;
use crate::extract::{tokenize, Segment};
use crate::sources::TemplateSource;
use crate::types::RenderOutcome;
use anyhow::{Context, Result};
use filetime::FileTime;
use std::fs;
use std::path::Path;

pub use cache::CatalogCache;
pub use destination::{destination_path, DestTransform, RegexTransform};

/// Modification times that decide whether an output is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    pub template: FileTime,
    /// `None` when the locale has no catalog file.
    pub catalog: Option<FileTime>,
    /// `None` when the output does not exist yet.
    pub destination: Option<FileTime>,
}

pub fn needs_render(force_refresh: bool, stamps: &Timestamps) -> bool {
    if force_refresh {
        return true;
    }
    let Some(destination) = stamps.destination else {
        return true;
    };
    if stamps.catalog.is_some_and(|catalog| catalog > destination) {
        return true;
    }
    stamps.template > destination
}

/// Message for `key`, or the key itself when the catalog has no text for it.
pub fn resolve<'a>(key: &'a str, catalog: Option<&'a Catalog>) -> &'a str {
    catalog
        .and_then(|messages| messages.get(key))
        .filter(|message| !message.is_empty())
        .unwrap_or(key)
}

/// Substitute every placeholder of `template` in a single pass.
pub fn render_text(template: &str, catalog: Option<&Catalog>, html_escape: bool) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in tokenize(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(key) => {
                let message = resolve(key, catalog);
                if html_escape {
                    out.push_str(&escape_html(message));
                } else {
                    out.push_str(message);
                }
            }
        }
    }
    out
}

/// Render one template file to `destination`, creating parent directories.
/// The output keeps the template's byte order mark and encoding.
pub fn render_file(
    template: &Path,
    destination: &Path,
    catalog: Option<&Catalog>,
    html_escape: bool,
) -> Result<()> {
    let (text, bom) = catalog::read_text_with_bom(template)?;
    let rendered = render_text(&text, catalog, html_escape);
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    catalog::write_text(destination, &rendered, bom)
}

/// Render every template for every locale.
pub fn run(
    config: &Config,
    sources: &[TemplateSource],
    transform: Option<&dyn DestTransform>,
) -> Result<RenderOutcome> {
    let mut outcome = RenderOutcome::default();

    for locale in &config.locales {
        // A fresh cache per locale; the previous locale's catalog is dropped here.
        let mut cache = CatalogCache::for_locale(config, locale);
        let catalog_mtime = cache.modified()?;

        for source in sources {
            let Some(template_mtime) = catalog::modified(&source.path)? else {
                tracing::warn!(path = %source.path.display(), "template not found, skipping");
                outcome.missing_templates += 1;
                continue;
            };

            let mut destination = destination_path(
                &source.path,
                config.base_path.as_deref(),
                &source.dest_root,
                locale,
            );
            if let Some(transform) = transform {
                destination = transform
                    .transform(&destination)
                    .with_context(|| format!("transforming destination {}", destination.display()))?;
            }

            let stamps = Timestamps {
                template: template_mtime,
                catalog: catalog_mtime,
                destination: catalog::modified(&destination)?,
            };
            if !needs_render(config.force_refresh, &stamps) {
                tracing::debug!(path = %destination.display(), "up to date");
                outcome.up_to_date += 1;
                continue;
            }

            tracing::info!(locale = locale.as_str(), path = %destination.display(), "generating");
            render_file(&source.path, &destination, cache.get()?, config.html_escape)?;
            outcome.rendered.push(destination);
        }
    }

    Ok(outcome)
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Stage sequencing
//!
//! A run always walks the stages in [`Stage::ORDER`]: renames first, because
//! key extraction and rendering must see the rewritten templates and
//! catalogs, then catalog reconciliation, then rendering. Each stage can be
//! switched off through its skip flag.

use crate::catalog;
use crate::config::Config;
use crate::messages::{self, collect_template_keys};
use crate::reconcile::{orphans, reconcile};
use crate::render::{self, destination_path, needs_render, DestTransform, RegexTransform, Timestamps};
use crate::rename;
use crate::sources::{self, TemplateSource};
use crate::types::{LocaleStatus, RunSummary, Stage};
use anyhow::{Context, Result};

pub struct Pipeline {
    config: Config,
    transform: Option<Box<dyn DestTransform>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl Pipeline {
    /// Validate the configuration and compile its destination transform.
    pub fn new(config: Config) -> Result<Self> {
        let config = config.normalized();
        config.validate().context("invalid configuration")?;
        let transform = match &config.transform_dest_file {
            Some(rule) => Some(Box::new(RegexTransform::new(rule)?) as Box<dyn DestTransform>),
            None => None,
        };
        Ok(Self { config, transform })
    }

    /// Replace the configured destination transform with a custom one.
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: DestTransform + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Rename => !self.config.skip_key_runner,
            Stage::Messages => !self.config.skip_messages_runner,
            Stage::Render => !self.config.skip_template_runner,
        }
    }

    pub fn sources(&self) -> Result<Vec<TemplateSource>> {
        sources::collect(&self.config.templates)
    }

    pub fn run(&self) -> Result<RunSummary> {
        let sources = self.sources()?;
        let mut summary = RunSummary {
            created_at: chrono::Utc::now().to_rfc3339(),
            ..RunSummary::default()
        };

        for stage in Stage::ORDER {
            if !self.is_enabled(stage) {
                tracing::debug!(%stage, "stage skipped");
                continue;
            }
            let span = tracing::info_span!("stage", name = stage.name());
            let _guard = span.enter();

            match stage {
                Stage::Rename => {
                    summary.rename = Some(
                        rename::run(&self.config, &sources).context("propagating key renames")?,
                    );
                }
                Stage::Messages => {
                    summary.messages = Some(
                        messages::run(&self.config, &sources).context("updating message catalogs")?,
                    );
                }
                Stage::Render => {
                    summary.render = Some(
                        render::run(&self.config, &sources, self.transform.as_deref())
                            .context("rendering templates")?,
                    );
                }
            }
            summary.stages_run.push(stage);
        }

        Ok(summary)
    }

    /// Keys referenced by the configured templates.
    pub fn keys(&self) -> Result<Vec<String>> {
        let (keys, _) = collect_template_keys(&self.sources()?)?;
        Ok(keys)
    }

    /// Per-locale sync state, computed without writing anything.
    pub fn status(&self) -> Result<Vec<LocaleStatus>> {
        let sources = self.sources()?;
        let (keys, _) = collect_template_keys(&sources)?;
        let mut statuses = Vec::new();

        for locale in &self.config.locales {
            let catalog_path = self.config.catalog_path(locale);
            let (missing, untranslated, orphaned) = match &catalog_path {
                Some(path) => {
                    let mut messages = catalog::load(path)?;
                    let orphaned = orphans(&keys, &messages).len();
                    let reconciliation = reconcile(&keys, &mut messages, false);
                    (
                        reconciliation.added.len(),
                        reconciliation.untranslated.len(),
                        orphaned,
                    )
                }
                None => (0, 0, 0),
            };

            let catalog_mtime = match &catalog_path {
                Some(path) => catalog::modified(path)?,
                None => None,
            };
            let mut stale_outputs = 0;
            for source in &sources {
                let Some(template_mtime) = catalog::modified(&source.path)? else {
                    continue;
                };
                let mut destination = destination_path(
                    &source.path,
                    self.config.base_path.as_deref(),
                    &source.dest_root,
                    locale,
                );
                if let Some(transform) = &self.transform {
                    destination = transform.transform(&destination)?;
                }
                let stamps = Timestamps {
                    template: template_mtime,
                    catalog: catalog_mtime,
                    destination: catalog::modified(&destination)?,
                };
                if needs_render(self.config.force_refresh, &stamps) {
                    stale_outputs += 1;
                }
            }

            statuses.push(LocaleStatus {
                locale: locale.clone(),
                catalog: catalog_path,
                missing,
                untranslated,
                orphaned,
                stale_outputs,
            });
        }

        Ok(statuses)
    }
}

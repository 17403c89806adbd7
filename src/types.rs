// SPDX-License-Identifier: PMPL-1.0-or-later

//! Shared result types for the pipeline stages

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pipeline stages, in the order they always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Propagate key renames from `keys.csv` into templates and catalogs.
    Rename,
    /// Reconcile catalogs with the keys found in templates.
    Messages,
    /// Render templates into per-locale output files.
    Render,
}

impl Stage {
    pub const ORDER: [Stage; 3] = [Stage::Rename, Stage::Messages, Stage::Render];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Rename => "rename",
            Stage::Messages => "messages",
            Stage::Render => "render",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A key left without a translation in one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UntranslatedEntry {
    pub catalog: PathBuf,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutcome {
    /// `(old, new)` pairs read from the canonical key catalog.
    pub renames: Vec<(String, String)>,
    pub templates_updated: Vec<PathBuf>,
    pub catalogs_updated: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesOutcome {
    pub keys: usize,
    pub catalogs_written: Vec<PathBuf>,
    pub untranslated: Vec<UntranslatedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untranslated_report: Option<PathBuf>,
    pub json_exports: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys_catalog: Option<PathBuf>,
    pub missing_templates: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutcome {
    pub rendered: Vec<PathBuf>,
    pub up_to_date: usize,
    pub missing_templates: usize,
}

/// Everything a pipeline run did, stage by stage. Skipped stages stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub created_at: String,
    pub stages_run: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<RenameOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<MessagesOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderOutcome>,
}

/// Read-only view of how far one locale is from being in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleStatus {
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Keys used by templates but absent from the catalog.
    pub missing: usize,
    /// Keys used by templates whose message is empty or absent.
    pub untranslated: usize,
    /// Catalog entries no template references any more.
    pub orphaned: usize,
    /// Outputs that a render run would regenerate.
    pub stale_outputs: usize,
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration
//!
//! Every recognised option is listed here with its default. Configuration is
//! read from YAML or JSON with camelCase keys and validated once, before any
//! stage touches the filesystem.

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "i18n-template.yaml";

/// Canonical key catalog used to detect key renames.
pub const KEYS_CATALOG_FILE: &str = "keys.csv";

/// Report listing keys that have no translation yet.
pub const UNTRANSLATED_REPORT_FILE: &str = "empty_messages.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Config {
    /// Locales to process, in order.
    pub locales: Vec<String>,
    /// Locale whose messages are the keys themselves. It has no catalog file.
    pub default_locale: Option<String>,
    /// Directory holding the catalogs, `keys.csv` and the untranslated report.
    pub messages_path: PathBuf,
    pub messages_file_prefix: String,
    /// Render every template regardless of timestamps.
    pub force_refresh: bool,
    pub skip_key_runner: bool,
    pub skip_messages_runner: bool,
    pub skip_template_runner: bool,
    /// Prefix stripped from template paths before they are placed under the
    /// destination root.
    pub base_path: Option<PathBuf>,
    /// Directory for per-locale JSON exports.
    pub json_path: Option<PathBuf>,
    /// Drop empty catalog entries whose key no longer appears in any template.
    pub remove_empty_keys: bool,
    pub html_escape: bool,
    pub transform_dest_file: Option<TransformRule>,
    pub templates: Vec<TemplateSet>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string()],
            default_locale: Some("en".to_string()),
            messages_path: PathBuf::from("messages"),
            messages_file_prefix: "messages_".to_string(),
            force_refresh: false,
            skip_key_runner: false,
            skip_messages_runner: false,
            skip_template_runner: false,
            base_path: None,
            json_path: None,
            remove_empty_keys: true,
            html_escape: true,
            transform_dest_file: None,
            templates: Vec::new(),
        }
    }
}

/// A group of template sources rendered under one destination root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplateSet {
    /// Template files, or directories walked recursively.
    pub src: Vec<PathBuf>,
    pub dest: PathBuf,
    /// Extensions kept when walking a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl TemplateSet {
    pub fn new(src: Vec<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src,
            dest: dest.into(),
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

/// Regex rewrite applied to every computed destination path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransformRule {
    pub pattern: String,
    /// Replacement text; `$1`, `${name}` refer to capture groups.
    pub replacement: String,
}

impl TransformRule {
    pub fn compile(&self) -> Result<Regex> {
        Regex::new(&self.pattern)
            .with_context(|| format!("invalid transformDestFile pattern {:?}", self.pattern))
    }
}

impl Config {
    /// Load a configuration file. `.json` is parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Config = if is_json {
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing JSON configuration {}", path.display()))?
        } else {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("parsing YAML configuration {}", path.display()))?
        };
        Ok(config.normalized())
    }

    /// Treat an empty `defaultLocale` the same as an unset one.
    pub fn normalized(mut self) -> Self {
        if self
            .default_locale
            .as_deref()
            .is_some_and(|locale| locale.trim().is_empty())
        {
            self.default_locale = None;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            bail!("locales must list at least one locale");
        }
        if let Some(blank) = self.locales.iter().position(|l| l.trim().is_empty()) {
            bail!("locale #{} is blank", blank + 1);
        }
        for (index, set) in self.templates.iter().enumerate() {
            if set.src.is_empty() {
                return Err(anyhow!(
                    "template set #{} (dest {}) has no sources",
                    index + 1,
                    set.dest.display()
                ));
            }
        }
        if let Some(rule) = &self.transform_dest_file {
            rule.compile()?;
        }
        if let Some(default) = self.default_locale.as_deref() {
            if !self.locales.iter().any(|l| l == default) {
                tracing::warn!(
                    default_locale = default,
                    "default locale is not listed in locales; it will not be rendered"
                );
            }
        }
        Ok(())
    }

    pub fn is_default_locale(&self, locale: &str) -> bool {
        self.default_locale.as_deref() == Some(locale)
    }

    /// Locales that own a catalog file.
    pub fn translated_locales(&self) -> impl Iterator<Item = &str> {
        self.locales
            .iter()
            .map(String::as_str)
            .filter(|locale| !self.is_default_locale(locale))
    }

    /// `{messagesPath}/{messagesFilePrefix}{locale}.csv`, or `None` for the
    /// default locale.
    pub fn catalog_path(&self, locale: &str) -> Option<PathBuf> {
        if self.is_default_locale(locale) {
            return None;
        }
        Some(
            self.messages_path
                .join(format!("{}{}.csv", self.messages_file_prefix, locale)),
        )
    }

    pub fn json_export_path(&self, locale: &str) -> Option<PathBuf> {
        self.json_path
            .as_ref()
            .map(|dir| dir.join(format!("{}{}.json", self.messages_file_prefix, locale)))
    }

    pub fn keys_catalog_path(&self) -> PathBuf {
        self.messages_path.join(KEYS_CATALOG_FILE)
    }

    pub fn untranslated_report_path(&self) -> PathBuf {
        self.messages_path.join(UNTRANSLATED_REPORT_FILE)
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! i18n-template: localized rendering of `[[key]]` templates.
//!
//! Keeps per-locale CSV message catalogs aligned with the placeholder keys
//! used by a set of templates and renders one output tree per locale.
//!
//! STAGES (always in this order):
//! 1. **Rename**: key renames requested in `keys.csv` are propagated into
//!    templates and every locale catalog.
//! 2. **Messages**: catalogs gain the keys the templates use, lose empty
//!    orphans, and untranslated keys are reported.
//! 3. **Render**: stale outputs are regenerated with placeholders replaced
//!    by catalog messages, falling back to the key text.

pub mod catalog;
pub mod config;
pub mod extract;
pub mod messages;
pub mod pipeline;
pub mod reconcile;
pub mod rename;
pub mod render;
pub mod report;
pub mod sources;
pub mod types;

pub use config::Config;
pub use pipeline::Pipeline;

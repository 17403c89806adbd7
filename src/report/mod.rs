// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reporting: the untranslated-keys log and terminal summaries

pub mod formatter;
pub mod untranslated;

use crate::types::{LocaleStatus, RunSummary};

pub use formatter::ReportFormatter;

/// Print a run summary to the console
pub fn print_summary(summary: &RunSummary) {
    ReportFormatter::new().print_summary(summary);
}

/// Print per-locale status to the console
pub fn print_status(statuses: &[LocaleStatus]) {
    ReportFormatter::new().print_status(statuses);
}

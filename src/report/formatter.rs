// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal formatting for run summaries

use crate::types::*;
use colored::*;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        println!("\n{}", "=== I18N-TEMPLATE RUN ===".bold().cyan());
        println!();

        if let Some(rename) = &summary.rename {
            self.print_rename(rename);
            println!();
        }
        if let Some(messages) = &summary.messages {
            self.print_messages(messages);
            println!();
        }
        if let Some(render) = &summary.render {
            self.print_render(render);
            println!();
        }

        if summary.stages_run.is_empty() {
            println!("{}", "All stages skipped".dimmed());
        }
    }

    fn print_rename(&self, rename: &RenameOutcome) {
        println!("{}", "KEY RENAMES".bold().yellow());
        if rename.renames.is_empty() {
            println!("  {}", "No renames requested in keys.csv".green());
            return;
        }
        for (old, new) in &rename.renames {
            println!("  {} ==> {}", old, new.bold());
        }
        println!("  Templates updated: {}", rename.templates_updated.len());
        println!("  Catalogs updated: {}", rename.catalogs_updated.len());
    }

    fn print_messages(&self, messages: &MessagesOutcome) {
        println!("{}", "MESSAGE CATALOGS".bold().yellow());
        println!("  Keys found: {}", messages.keys);
        println!("  Catalogs written: {}", messages.catalogs_written.len());
        for path in &messages.catalogs_written {
            println!("    - {}", path.display());
        }
        if !messages.json_exports.is_empty() {
            println!("  JSON exports: {}", messages.json_exports.len());
        }
        if !messages.missing_templates.is_empty() {
            println!(
                "  Missing templates: {}",
                messages.missing_templates.len().to_string().red().bold()
            );
        }

        if messages.untranslated.is_empty() {
            println!("  {}", "Every key is translated".green());
        } else {
            println!(
                "  Untranslated entries: {}",
                messages.untranslated.len().to_string().yellow().bold()
            );
            if let Some(report) = &messages.untranslated_report {
                println!("    See {}", report.display().to_string().dimmed());
            }
        }
    }

    fn print_render(&self, render: &RenderOutcome) {
        println!("{}", "RENDERING".bold().yellow());
        println!("  Generated: {}", render.rendered.len());
        println!("  Up to date: {}", render.up_to_date);
        if render.missing_templates > 0 {
            println!(
                "  Missing templates: {}",
                render.missing_templates.to_string().red().bold()
            );
        }
    }

    pub fn print_status(&self, statuses: &[LocaleStatus]) {
        println!("\n{}", "=== LOCALE STATUS ===".bold().cyan());
        println!(
            "  {:<10} {:>8} {:>13} {:>9} {:>7}",
            "Locale", "Missing", "Untranslated", "Orphaned", "Stale"
        );
        println!("  {}", "-".repeat(51));

        for status in statuses {
            let untranslated = format!("{:>13}", status.untranslated);
            let untranslated = if status.untranslated == 0 {
                untranslated.green()
            } else {
                untranslated.yellow()
            };
            let locale = if status.catalog.is_none() {
                format!("{} *", status.locale)
            } else {
                status.locale.clone()
            };
            println!(
                "  {:<10} {:>8} {} {:>9} {:>7}",
                locale, status.missing, untranslated, status.orphaned, status.stale_outputs
            );
        }

        if statuses.iter().any(|s| s.catalog.is_none()) {
            println!("\n  {}", "* default locale, no catalog".dimmed());
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! i18n-template: keep message catalogs in sync with `[[key]]` templates
//! and render one localized output tree per locale.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use i18n_template::config::DEFAULT_CONFIG_FILE;
use i18n_template::{report, Config, Pipeline};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "i18n-template")]
#[command(version)]
#[command(about = "Synchronize translation catalogs with template keys and render localized files")]
#[command(long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArg {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate renames, update catalogs and render templates
    Run {
        #[command(flatten)]
        config: ConfigArg,

        /// Render every template regardless of timestamps
        #[arg(short, long)]
        force: bool,

        /// Skip key rename propagation
        #[arg(long)]
        skip_keys: bool,

        /// Skip catalog reconciliation
        #[arg(long)]
        skip_messages: bool,

        /// Skip template rendering
        #[arg(long)]
        skip_templates: bool,

        /// Insert messages without HTML escaping
        #[arg(long)]
        no_html_escape: bool,

        /// Keep empty catalog entries that no template uses
        #[arg(long)]
        keep_empty_keys: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the keys used by the configured templates
    Keys {
        #[command(flatten)]
        config: ConfigArg,
    },

    /// Show per-locale catalog and output status without writing anything
    Status {
        #[command(flatten)]
        config: ConfigArg,

        /// Print status as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            force,
            skip_keys,
            skip_messages,
            skip_templates,
            no_html_escape,
            keep_empty_keys,
            json,
        } => {
            let mut config = load_config(&config.config)?;
            config.force_refresh |= force;
            config.skip_key_runner |= skip_keys;
            config.skip_messages_runner |= skip_messages;
            config.skip_template_runner |= skip_templates;
            if no_html_escape {
                config.html_escape = false;
            }
            if keep_empty_keys {
                config.remove_empty_keys = false;
            }

            let summary = Pipeline::new(config)?.run()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                report::print_summary(&summary);
            }
        }

        Commands::Keys { config } => {
            let pipeline = Pipeline::new(load_config(&config.config)?)?;
            for key in pipeline.keys()? {
                println!("{}", key);
            }
        }

        Commands::Status { config, json } => {
            let pipeline = Pipeline::new(load_config(&config.config)?)?;
            let statuses = pipeline.status()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                report::print_status(&statuses);
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| {
        format!(
            "loading configuration (create {} or pass --config)",
            DEFAULT_CONFIG_FILE
        )
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

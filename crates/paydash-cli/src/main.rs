//! paydash command-line overview
//!
//! Computes the admin payment overview (revenue buckets, status counts and
//! conversion rate) from a JSON file of users and payments.

#![forbid(unsafe_code)]

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use commands::Overrides;
use paydash_core::{Config, Locale, context_error::Result, init_logging};
use paydash_metrics::ChartRegistry;
use std::path::PathBuf;
use tracing::info;

/// Command line interface for paydash
#[derive(Parser)]
#[command(
    name = "paydash",
    version = env!("CARGO_PKG_VERSION"),
    about = "Payment revenue and conversion overview",
    long_about = "Computes revenue per period, transaction counts per status and the buyer conversion rate from a JSON file of users and payments, together with chart configurations for the admin panel."
)]
struct Cli {
    /// Configuration file path (defaults to ./paydash.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Print the overview document as JSON
    Overview {
        /// Input file with `users` and `payments`
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to today in the reporting time zone
        #[arg(long, value_name = "DATE")]
        today: Option<NaiveDate>,

        /// Label language (vi, en)
        #[arg(long)]
        locale: Option<Locale>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print a plain-text summary table
    Summary {
        /// Input file with `users` and `payments`
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to today in the reporting time zone
        #[arg(long, value_name = "DATE")]
        today: Option<NaiveDate>,

        /// Label language (vi, en)
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Inspect the configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging)?;

    let registry = ChartRegistry::standard();

    let output = match cli.command {
        Commands::Overview {
            input,
            today,
            locale,
            pretty,
        } => commands::overview(
            &config,
            &registry,
            &input,
            Overrides { today, locale },
            pretty,
        )?,
        Commands::Summary {
            input,
            today,
            locale,
        } => commands::summary(&config, &registry, &input, Overrides { today, locale })?,
        Commands::Config { show } => {
            if !show {
                info!("Configuration is valid");
                return Ok(());
            }
            commands::show_config(&config)?
        }
    };

    println!("{output}");
    Ok(())
}

//! `almanac` CLI: format, parse and compare proleptic-Gregorian dates.
//!
//! ## Usage
//!
//! ```sh
//! # Format the current UTC time
//! almanac format "%A, %B %d, %Y"
//!
//! # Format a fixed instant
//! almanac format "%I:%M %p" --at 2006-04-17T20:49:00
//!
//! # Parse text against a pattern (optionally as JSON)
//! almanac parse "%B-%d-%y %l:%M%p" "April-17-06 8:49PM" --json
//!
//! # Elapsed time between two dates
//! almanac diff 2005-04-07 2005-04-17
//!
//! # Every projected field of a date
//! almanac info 2000-02-29
//!
//! # Two-digit years below 70 land in the 2000s
//! almanac --century-pivot 70 parse "%y" 69
//! ```

mod logging;
mod report;

use almanac_core::{DateFormatter, DateTime, NameCatalog, ParseOptions};
use anyhow::{Context, Result};
use chrono::{Datelike, Timelike, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use report::{DateReport, DurationReport};

#[derive(Parser)]
#[command(
    name = "almanac",
    version,
    about = "Format, parse and compare proleptic-Gregorian dates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with parse options (`century_pivot`, `default_year`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Two-digit years below this value are read as 20xx, others as 19xx
    #[arg(long, global = true)]
    century_pivot: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a date through a pattern
    Format {
        /// Pattern such as "%Y-%m-%d %H:%M:%S"
        pattern: String,
        /// Instant to render, YYYY-MM-DDTHH:MM:SS (defaults to now, UTC)
        #[arg(long)]
        at: Option<String>,
    },
    /// Parse text against a pattern
    Parse {
        pattern: String,
        text: String,
        /// Print every projected field as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the elapsed time between two dates
    Diff {
        from: String,
        to: String,
        /// Print the units as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every projected field of a date
    Info {
        date: String,
        /// Print the fields as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = load_options(cli.config.as_deref(), cli.century_pivot)?;
    debug!(?options, "parse options");
    let catalog = Arc::new(NameCatalog::default());

    match cli.command {
        Commands::Format { pattern, at } => {
            let formatter = DateFormatter::with_catalog(&pattern, catalog.clone())
                .with_context(|| format!("Invalid pattern: '{}'", pattern))?;
            let date = match at {
                Some(text) => parse_instant(&text)?,
                None => now()?,
            };
            println!("{}", formatter.format(&date));
        }
        Commands::Parse {
            pattern,
            text,
            json,
        } => {
            let formatter = DateFormatter::with_catalog(&pattern, catalog.clone())
                .with_context(|| format!("Invalid pattern: '{}'", pattern))?
                .with_options(options);
            let date = formatter
                .parse(&text)
                .with_context(|| format!("Failed to parse '{}' with '{}'", text, pattern))?;
            info!(%date, "parsed");
            if json {
                print_json(&date_report(&date, &catalog)?)?;
            } else {
                println!("{}", date);
            }
        }
        Commands::Diff { from, to, json } => {
            let from = parse_instant(&from)?;
            let to = parse_instant(&to)?;
            let report = DurationReport::from(to - from);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", report);
            }
        }
        Commands::Info { date, json } => {
            let date = parse_instant(&date)?;
            let report = date_report(&date, &catalog)?;
            if json {
                print_json(&report)?;
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

/// Read options from `--config`, then apply `--century-pivot` on top.
fn load_options(config: Option<&Path>, century_pivot: Option<u32>) -> Result<ParseOptions> {
    let mut options = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => ParseOptions::default(),
    };
    if let Some(pivot) = century_pivot {
        options.century_pivot = pivot;
    }
    Ok(options)
}

/// Parse a command-line instant (`YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`).
fn parse_instant(text: &str) -> Result<DateTime> {
    text.parse::<DateTime>().with_context(|| {
        format!(
            "Invalid date '{}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            text
        )
    })
}

/// The current UTC time, truncated to whole seconds.
fn now() -> Result<DateTime> {
    let now = Utc::now();
    DateTime::from_ymd_hms(
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
    )
    .context("Current time is outside the supported calendar")
}

fn date_report(date: &DateTime, catalog: &Arc<NameCatalog>) -> Result<DateReport> {
    let weekday = DateFormatter::with_catalog("%A", catalog.clone())?;
    let month_name = DateFormatter::with_catalog("%B", catalog.clone())?;
    Ok(DateReport::new(date, &weekday, &month_name))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", pretty);
    Ok(())
}

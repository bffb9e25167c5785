//! well-credits - Orphan well carbon credit economics
//!
//! Evaluates a well table and prints the results as pretty JSON on stdout.
//! Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate the built-in sample wells at the configured price
//! well-credits evaluate
//!
//! # Evaluate a CSV well table at $25/t
//! well-credits --wells wells.csv --token-price 25 evaluate
//!
//! # Milestone timeline from a fixed reference date
//! well-credits timeline --reference-date 2025-03-01
//!
//! # Token price x fee sweep, A/B comparison, single credit breakdown
//! well-credits sensitivity
//! well-credits compare --b-token-price 30
//! well-credits credits 15
//! ```
//!
//! # Environment Variables
//!
//! - `WELL_CREDITS_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use well_credits::config::EngineConfig;
use well_credits::economics::sensitivity_sweep;
use well_credits::scenario::{compare_scenarios, sample_wells, Scenario, ScenarioStore};
use well_credits::{build_timeline, compute_credits, ingest, WellRecord};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "well-credits")]
#[command(about = "Orphan well plugging carbon credit economics")]
#[command(version)]
struct CliArgs {
    /// Well table CSV (default: built-in sample wells)
    #[arg(long, global = true, value_name = "CSV")]
    wells: Option<PathBuf>,

    /// Config file (default: $WELL_CREDITS_CONFIG, then ./well_credits.toml)
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Override the configured token price ($/tCO2e)
    #[arg(long, global = true)]
    token_price: Option<f64>,

    /// Override the configured platform fee rate (0.02 = 2%)
    #[arg(long, global = true)]
    fee_rate: Option<f64>,

    /// Override the configured discount rate (0.08 = 8%)
    #[arg(long, global = true)]
    discount_rate: Option<f64>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Per-well economics, portfolio summary, cash flow and NPV
    Evaluate,

    /// Milestone events for every well
    Timeline {
        /// Baseline date for wells without one (default: earliest in table, else today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        reference_date: Option<NaiveDate>,
    },

    /// Total profit over the configured token price x fee rate grid
    Sensitivity,

    /// Compare the base pricing (A) against alternative pricing (B)
    Compare {
        /// Scenario B token price (default: A's price + $5)
        #[arg(long)]
        b_token_price: Option<f64>,

        /// Scenario B fee rate (default: A's fee rate)
        #[arg(long)]
        b_fee_rate: Option<f64>,
    },

    /// Credit breakdown for a single leak rate
    Credits {
        /// Leak rate in liters per minute
        leak_rate_lpm: f64,
    },
}

// ============================================================================
// Helpers
// ============================================================================

fn init_logging(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_config(args: &CliArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::load(),
    };

    if let Some(price) = args.token_price {
        config.pricing.token_price = price;
    }
    if let Some(fee) = args.fee_rate {
        config.pricing.path_fee_rate = fee;
    }
    if let Some(rate) = args.discount_rate {
        config.pricing.discount_rate = rate;
    }
    config.validate().context("Invalid pricing overrides")?;
    Ok(config)
}

fn load_wells(path: Option<&Path>) -> Result<Vec<WellRecord>> {
    let Some(path) = path else {
        info!("No --wells given, using the built-in sample wells");
        return Ok(sample_wells());
    };
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    ingest::read_wells(BufReader::new(file))
        .with_context(|| format!("Failed to read well table {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_format);

    let config = load_config(&args)?;
    let pricing = &config.pricing;
    let schedule = config.cash_flow.schedule();

    match &args.command {
        SubCommand::Evaluate => {
            let wells = load_wells(args.wells.as_deref())?;
            let scenario = Scenario::new("A", wells, pricing.token_price, pricing.path_fee_rate);
            let evaluation = scenario
                .evaluate(pricing.discount_rate, schedule)
                .context("Evaluation failed")?;
            info!(
                wells = evaluation.summary.well_count,
                profit = evaluation.summary.total_profit,
                npv = evaluation.npv,
                "Portfolio evaluated"
            );
            print_json(&evaluation)?;
        }

        SubCommand::Timeline { reference_date } => {
            let wells = load_wells(args.wells.as_deref())?;
            print_json(&build_timeline(&wells, *reference_date))?;
        }

        SubCommand::Sensitivity => {
            let wells = load_wells(args.wells.as_deref())?;
            let report = sensitivity_sweep(&wells, &config.sensitivity.grid())
                .context("Sensitivity sweep failed")?;
            match report.breakeven_token_price {
                Some(price) => info!("Portfolio breaks even at ${price:.2}/t"),
                None => info!("No breakeven token price inside the swept range"),
            }
            print_json(&report)?;
        }

        SubCommand::Compare { b_token_price, b_fee_rate } => {
            let wells = load_wells(args.wells.as_deref())?;
            let mut store =
                ScenarioStore::for_comparison(wells, pricing.token_price, pricing.path_fee_rate);

            if let Some(b) = store.get_mut("B") {
                if let Some(price) = b_token_price {
                    b.token_price = *price;
                }
                if let Some(fee) = b_fee_rate {
                    b.path_fee_rate = *fee;
                }
            }

            let a = store.get("A").context("Scenario A missing from store")?;
            let b = store.get("B").context("Scenario B missing from store")?;
            let eval_a = a.evaluate(pricing.discount_rate, schedule).context("Scenario A failed")?;
            let eval_b = b.evaluate(pricing.discount_rate, schedule).context("Scenario B failed")?;
            print_json(&compare_scenarios(a, &eval_a, b, &eval_b))?;
        }

        SubCommand::Credits { leak_rate_lpm } => {
            let breakdown = compute_credits(
                *leak_rate_lpm,
                config.credits.gwp,
                config.credits.crediting_period_years,
            );
            print_json(&breakdown)?;
        }
    }

    Ok(())
}

// In app/src/main.rs

use analytics::AnalyticsEngine;
use anyhow::{Context, Result};
use app_config::Settings;
use backtester::{Backtester, JsonFilePriceProvider, PriceProvider};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use core_types::{StrategyId, Symbol};
use std::path::PathBuf;
use store::{InMemoryStore, StrategyStatus};
use tracing_subscriber::prelude::*;
use zoo::{Zoo, ZooFilter};

mod analyzer;
use crate::analyzer::{SynthOutput, ZooOutput};

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Deterministic performance metrics for synthetic and backtested strategies.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates one strategy's synthetic returns and reports its metrics.
    Synth {
        /// The strategy identifier (e.g., "EA-00042"). Its digits seed the generator.
        #[arg(long)]
        id: String,

        /// The annualized Sharpe ratio the generator aims for.
        #[arg(long, allow_negative_numbers = true)]
        target_sharpe: f64,

        /// Number of daily periods. Defaults to `engine.periods`.
        #[arg(long)]
        periods: Option<usize>,

        /// Daily volatility. Defaults to `engine.daily_std`.
        #[arg(long)]
        daily_std: Option<f64>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Seeds the strategy zoo, optionally evolves it, and shows the leaderboard.
    Zoo {
        /// Append one evolution batch before ranking.
        #[arg(long)]
        evolve: bool,

        /// Only show strategies with at least this out-of-sample Sharpe.
        #[arg(long, allow_negative_numbers = true)]
        min_sharpe: Option<f64>,

        /// Only show strategies with these statuses (repeatable).
        #[arg(long = "status")]
        statuses: Vec<StrategyStatus>,

        /// Case-insensitive text to look for in the causal edge.
        #[arg(long)]
        search: Option<String>,

        /// Size of the leaderboard. Defaults to `zoo.top_n`.
        #[arg(long)]
        top: Option<usize>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Runs every configured signal rule over daily closes from a JSON file.
    Backtest {
        /// Path to the price file.
        #[arg(long)]
        prices: PathBuf,

        /// The symbol to trade (e.g., "SPY").
        #[arg(short, long)]
        symbol: String,

        /// Benchmark symbol for `pair_correlation`.
        #[arg(long)]
        benchmark: Option<String>,

        /// First date to include, in YYYY-MM-DD format.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date to include, in YYYY-MM-DD format.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings from config/")?;
    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, "Settings loaded.");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Synth {
            id,
            target_sharpe,
            periods,
            daily_std,
            json,
        } => handle_synth(&settings, id, target_sharpe, periods, daily_std, json)?,
        Commands::Zoo {
            evolve,
            min_sharpe,
            statuses,
            search,
            top,
            json,
        } => {
            let filter = ZooFilter {
                min_sharpe,
                statuses,
                search,
            };
            handle_zoo(&settings, evolve, &filter, top, json)?
        }
        Commands::Backtest {
            prices,
            symbol,
            benchmark,
            start,
            end,
            json,
        } => handle_backtest(&settings, prices, symbol, benchmark, start, end, json)?,
    }

    Ok(())
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Synth" Subcommand Logic ---

fn handle_synth(
    settings: &Settings,
    id: String,
    target_sharpe: f64,
    periods: Option<usize>,
    daily_std: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut params = settings.engine.synthetic_params();
    if let Some(periods) = periods {
        params.periods = periods;
    }
    if let Some(daily_std) = daily_std {
        anyhow::ensure!(
            daily_std.is_finite() && daily_std >= 0.0,
            "--daily-std must be a non-negative number, got {daily_std}"
        );
        params.daily_std = daily_std;
    }
    anyhow::ensure!(target_sharpe.is_finite(), "--target-sharpe must be a finite number");

    let id = StrategyId::new(id);
    let seed = id.seed();
    let returns = params.generate(seed, target_sharpe);
    tracing::debug!(%id, seed, periods = returns.len(), "Generated synthetic returns.");

    let engine = AnalyticsEngine::new();
    let output = SynthOutput {
        id,
        seed,
        target_sharpe,
        report: engine.report(&returns),
        split: engine.evaluate_split(&returns, settings.engine.in_sample_fraction),
    };

    if json {
        println!("{}", analyzer::to_json(&output)?);
    } else {
        print!("{}", analyzer::render_synth(&output));
    }
    Ok(())
}

// --- "Zoo" Subcommand Logic ---

fn handle_zoo(settings: &Settings, evolve: bool, filter: &ZooFilter, top: Option<usize>, json: bool) -> Result<()> {
    // --- 1. Build the zoo ---
    let mut zoo = Zoo::new(InMemoryStore::new(), settings.engine.synthetic_params());
    let seeded = zoo.seed(settings.zoo.initial_size).context("Failed to seed the strategy zoo")?;
    tracing::info!(seeded, "Strategy zoo seeded.");

    if evolve {
        let evolved = zoo
            .evolve(settings.zoo.evolve_batch)
            .context("Failed to evolve the strategy zoo")?;
        tracing::info!(evolved = evolved.len(), "Evolution cycle complete.");
    }

    // --- 2. Filter and rank ---
    let records = zoo.filter(filter);
    let top_n = top.unwrap_or(settings.zoo.top_n);
    let summary = zoo
        .summary(top_n, settings.zoo.portfolio_size)
        .context("Failed to summarize the strategy zoo")?;

    // --- 3. Present ---
    if json {
        let output = ZooOutput { records, summary };
        println!("{}", analyzer::to_json(&output)?);
    } else {
        print!("{}", analyzer::render_zoo(&records, &summary));
    }
    Ok(())
}

// --- "Backtest" Subcommand Logic ---

fn handle_backtest(
    settings: &Settings,
    prices_path: PathBuf,
    symbol: String,
    benchmark: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    // --- 1. Load prices ---
    let provider = JsonFilePriceProvider::new(&prices_path);
    let symbol = Symbol(symbol);
    let (prices, benchmark) = match benchmark {
        // The benchmark is paired with the asset day by day, so both are
        // trimmed to the dates they share.
        Some(name) => {
            let benchmark_symbol = Symbol(name);
            let mut aligned = provider
                .aligned_closes(&[symbol.clone(), benchmark_symbol.clone()], start, end)
                .with_context(|| {
                    format!(
                        "Failed to load {} and benchmark {} from {}",
                        symbol,
                        benchmark_symbol,
                        prices_path.display()
                    )
                })?
                .into_iter();
            match (aligned.next(), aligned.next()) {
                (Some(prices), Some(benchmark)) => (prices, Some(benchmark)),
                _ => anyhow::bail!("Price provider returned fewer series than requested"),
            }
        }
        None => {
            let prices = provider
                .closes(&symbol, start, end)
                .with_context(|| format!("Failed to load {} from {}", symbol, prices_path.display()))?;
            (prices, None)
        }
    };

    // --- 2. Run every configured rule ---
    let backtester = Backtester::from_configs(
        &settings.backtest.rules,
        benchmark.as_ref(),
        settings.engine.in_sample_fraction,
    )?;
    let reports = backtester.run(&symbol, &prices)?;

    // --- 3. Present ---
    if json {
        println!("{}", analyzer::to_json(&reports)?);
    } else {
        print!("{}", analyzer::render_backtest(&reports));
    }
    Ok(())
}

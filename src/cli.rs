//! CLI definition and dispatch.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store_adapter::JsonStoreAdapter;
use crate::domain::config::BacktestConfig;
use crate::domain::engine;
use crate::domain::error::CandlelabError;
use crate::domain::strategies;
use crate::ports::data_port::DataPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "candlelab", about = "Crypto trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        /// Strategy identifier (see `strategies`)
        #[arg(short, long)]
        strategy: String,
        /// Directory holding {symbol}_{timeframe}.csv files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, default_value = "BTC-USDT")]
        symbol: String,
        #[arg(long, default_value = "15m")]
        timeframe: String,
        /// Inclusive start, RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// Inclusive end, RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// INI config file; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory for the result JSON; skipped when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List available strategy identifiers
    Strategies,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            strategy,
            data_dir,
            symbol,
            timeframe,
            start,
            end,
            config,
            output,
        } => match run_backtest(
            &strategy, &data_dir, &symbol, &timeframe, start, end, config, output,
        ) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                (&e).into()
            }
        },
        Command::Strategies => {
            for id in strategies::STRATEGY_IDS {
                println!("{id}");
            }
            ExitCode::SUCCESS
        }
    }
}

/// Accepts RFC 3339 timestamps and bare dates (midnight UTC).
fn parse_moment(raw: &str, flag: &str) -> Result<DateTime<Utc>, CandlelabError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or_else(|| CandlelabError::InvalidRange {
            reason: format!("cannot parse --{flag} value {:?}", raw),
        })
}

#[allow(clippy::too_many_arguments)]
fn run_backtest(
    strategy_id: &str,
    data_dir: &PathBuf,
    symbol: &str,
    timeframe: &str,
    start: Option<String>,
    end: Option<String>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), CandlelabError> {
    let strategy =
        strategies::from_id(strategy_id).ok_or_else(|| CandlelabError::UnknownStrategy {
            id: strategy_id.to_string(),
        })?;

    let start = start.map(|s| parse_moment(&s, "start")).transpose()?;
    let end = end.map(|s| parse_moment(&s, "end")).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if e <= s {
            return Err(CandlelabError::InvalidRange {
                reason: format!("end {} is not after start {}", e, s),
            });
        }
    }

    let config = match &config_path {
        Some(path) => FileConfigAdapter::from_file(path)?.backtest_config()?,
        None => BacktestConfig::default(),
    };

    let data = CsvAdapter::new(data_dir.clone());
    let bars = data.fetch_ohlcv(symbol, timeframe, start, end)?;
    if bars.is_empty() {
        return Err(CandlelabError::NoData {
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
        });
    }

    let result = engine::run(&bars, strategy.as_ref(), &config, start, end)?;

    let json = serde_json::to_string_pretty(&result.metrics).map_err(|e| CandlelabError::Store {
        reason: format!("metrics serialization failed: {}", e),
    })?;
    println!("{json}");

    // Persistence failure never invalidates a completed run.
    if let Some(dir) = output {
        let store = JsonStoreAdapter::new(dir);
        match store.save(&result, strategy.name(), symbol) {
            Ok(path) => eprintln!("result written to {}", path.display()),
            Err(e) => warn!(error = %e, "failed to store result"),
        }
    }

    Ok(())
}

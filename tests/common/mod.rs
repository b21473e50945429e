#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use candlelab::domain::bar::PriceBar;
use candlelab::domain::config::BacktestConfig;
use candlelab::domain::error::CandlelabError;
use candlelab::domain::signal::{Signal, Strategy, StrategyError};
use candlelab::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        _timeframe: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<PriceBar>, CandlelabError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CandlelabError::Data {
                reason: reason.clone(),
            });
        }
        let bars = self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|b| start.is_none_or(|s| b.time >= s) && end.is_none_or(|e| b.time <= e))
            .collect();
        Ok(bars)
    }
}

pub fn bar_time(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(15 * i as i64)
}

pub fn make_bar(i: usize, close: f64) -> PriceBar {
    PriceBar {
        time: bar_time(i),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1000.0,
    }
}

/// Constant-price series; no stop can fire, no drawdown can occur.
pub fn flat_series(count: usize, close: f64) -> Vec<PriceBar> {
    (0..count).map(|i| make_bar(i, close)).collect()
}

/// Steady linear trend starting at `first`, stepping by `step` per bar.
pub fn trending_series(count: usize, first: f64, step: f64) -> Vec<PriceBar> {
    (0..count)
        .map(|i| make_bar(i, first + step * i as f64))
        .collect()
}

/// Costless config with stops far out of reach.
pub fn frictionless_config() -> BacktestConfig {
    BacktestConfig {
        commission_rate: 0.0,
        slippage_rate: 0.0,
        use_atr_stops: false,
        stop_loss_pct: 0.9,
        take_profit_pct: 0.9,
        ..Default::default()
    }
}

/// Replays a fixed script of signals, one per simulated bar, HOLD after.
pub struct ScriptedStrategy {
    pub warmup: usize,
    pub signals: Vec<Signal>,
}

impl ScriptedStrategy {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            warmup: candlelab::domain::engine::WARMUP_BARS,
            signals,
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn signal(&self, window: &[PriceBar]) -> Result<Signal, StrategyError> {
        let step = window.len().saturating_sub(self.warmup + 1);
        Ok(self.signals.get(step).copied().unwrap_or(Signal::Hold))
    }
}

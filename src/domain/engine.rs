//! Backtest replay engine.
//!
//! Replays a price series bar by bar: exit checks first, then the strategy
//! signal, then entries/exits, then an equity mark. The replay is long-only:
//! a BUY opens a long, a SELL flattens. All per-run state lives in an
//! [`EngineState`] value owned by exactly one run, so independent runs can
//! execute in parallel without sharing anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::bar::{clip, PriceBar};
use super::config::{BacktestConfig, PositionSizing};
use super::error::CandlelabError;
use super::indicator::atr;
use super::metrics::Metrics;
use super::signal::{Signal, Strategy};
use super::trade::{ExitReason, Side, Trade};

/// Bars skipped at the start of every run so indicators have history.
pub const WARMUP_BARS: usize = 50;

/// Period of the ATR series backing ATR-scaled stops.
pub const ATR_PERIOD: usize = 14;

/// Everything a completed run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    /// Total equity per bar; index 0 is the initial capital before the
    /// first simulated bar.
    pub equity_curve: Vec<f64>,
    pub metrics: Metrics,
    pub config: BacktestConfig,
}

/// Mutable per-run state. Reset at the start of `run`, frozen at the end.
struct EngineState {
    cash: f64,
    open_trades: Vec<Trade>,
    closed_trades: Vec<Trade>,
    equity_curve: Vec<f64>,
}

impl EngineState {
    fn new(initial_capital: f64) -> Self {
        EngineState {
            cash: initial_capital,
            open_trades: Vec::new(),
            closed_trades: Vec::new(),
            equity_curve: vec![initial_capital],
        }
    }

    /// cash + mark-to-market value of every open position.
    fn mark_equity(&mut self, close: f64) {
        let open_value: f64 = self.open_trades.iter().map(|t| t.market_value(close)).sum();
        self.equity_curve.push(self.cash + open_value);
    }
}

/// Replay `strategy` over `series`, optionally clipped to `start..=end`.
///
/// Returns `Err` only for an invalid config. An empty clipped series yields
/// an empty result with zeroed metrics. Given identical inputs the result is
/// bit-identical across calls.
pub fn run(
    series: &[PriceBar],
    strategy: &dyn Strategy,
    config: &BacktestConfig,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<BacktestResult, CandlelabError> {
    config.validate()?;

    let bars = clip(series, start, end);
    info!(
        strategy = strategy.name(),
        bars = bars.len(),
        "starting backtest"
    );

    if bars.is_empty() {
        let equity_curve = vec![config.initial_capital];
        return Ok(BacktestResult {
            trades: Vec::new(),
            metrics: Metrics::compute(&[], &equity_curve, config.initial_capital, None),
            equity_curve,
            config: config.clone(),
        });
    }

    let atr_series = config.use_atr_stops.then(|| atr(&bars, ATR_PERIOD));
    let mut state = EngineState::new(config.initial_capital);

    for i in WARMUP_BARS..bars.len() {
        let bar = &bars[i];
        let atr_value = atr_series.as_ref().map(|a| a[i]);

        check_exits(&mut state, bar, atr_value, config);

        let signal = match strategy.signal(&bars[..=i]) {
            Ok(signal) => signal,
            Err(err) => {
                // One bad bar must not invalidate the rest of the run.
                warn!(strategy = strategy.name(), error = %err, "signal error, holding");
                Signal::Hold
            }
        };

        match signal {
            Signal::Buy if state.open_trades.len() < config.max_positions => {
                open_position(&mut state, bar, config);
            }
            Signal::Sell if !state.open_trades.is_empty() => {
                close_all(&mut state, bar.close, bar.time, ExitReason::Signal, config);
            }
            _ => {}
        }

        state.mark_equity(bar.close);
    }

    // Unrealized PnL must not survive the run as an open position.
    if let Some(last) = bars.last() {
        close_all(&mut state, last.close, last.time, ExitReason::EndOfData, config);
    }

    let span = bars.first().zip(bars.last()).map(|(f, l)| (f.time, l.time));
    let metrics = Metrics::compute(
        &state.closed_trades,
        &state.equity_curve,
        config.initial_capital,
        span,
    );

    info!(
        strategy = strategy.name(),
        total_trades = state.closed_trades.len(),
        final_capital = metrics.final_capital,
        "backtest completed"
    );

    Ok(BacktestResult {
        trades: state.closed_trades,
        equity_curve: state.equity_curve,
        metrics,
        config: config.clone(),
    })
}

/// Quantity for a new entry at `price`, per the configured sizing mode.
/// Evaluated once at entry, never re-evaluated.
fn position_quantity(state: &EngineState, price: f64, config: &BacktestConfig) -> f64 {
    let capital = match config.position_sizing {
        PositionSizing::Fixed => config.initial_capital,
        PositionSizing::Percentage => state.cash,
    };
    config.position_size * capital / price
}

fn open_position(state: &mut EngineState, bar: &PriceBar, config: &BacktestConfig) {
    let quantity = position_quantity(state, bar.close, config);
    if quantity <= 0.0 {
        return;
    }

    // Slippage worsens the fill: a buy pays up.
    let entry_price = bar.close * (1.0 + config.slippage_rate);
    let entry_commission = quantity * entry_price * config.commission_rate;
    let required = quantity * entry_price + entry_commission;
    if required > state.cash {
        debug!(required, cash = state.cash, "entry rejected: insufficient cash");
        return;
    }

    state.cash -= required;
    state.open_trades.push(Trade {
        side: Side::Long,
        entry_time: bar.time,
        entry_price,
        quantity,
        entry_commission,
        exit: None,
    });
    debug!(price = entry_price, quantity, "opened long position");
}

/// Settle one trade at `fill_price` and move it to the closed ledger.
fn close_trade(
    state: &mut EngineState,
    mut trade: Trade,
    fill_price: f64,
    time: DateTime<Utc>,
    reason: ExitReason,
    config: &BacktestConfig,
) {
    // Slippage worsens the fill: a sale receives less.
    let exit_price = fill_price * (1.0 - config.slippage_rate);
    let exit_commission = trade.quantity * exit_price * config.commission_rate;

    // Cash moves by exactly the exit notional minus commission; the entry
    // notional already left on open.
    state.cash += trade.quantity * exit_price - exit_commission;

    trade.close(exit_price, exit_commission, time, reason);
    if let Some(exit) = &trade.exit {
        debug!(price = exit.price, pnl = exit.pnl, reason = ?exit.reason, "closed position");
    }
    state.closed_trades.push(trade);
}

fn close_all(
    state: &mut EngineState,
    fill_price: f64,
    time: DateTime<Utc>,
    reason: ExitReason,
    config: &BacktestConfig,
) {
    while let Some(trade) = state.open_trades.pop() {
        close_trade(state, trade, fill_price, time, reason, config);
    }
}

/// Stop/target prices below/above the entry. ATR-scaled when the ATR
/// series is active and defined here, fixed-percentage otherwise.
fn stop_and_target(trade: &Trade, atr_value: Option<f64>, config: &BacktestConfig) -> (f64, f64) {
    match atr_value {
        Some(a) if a.is_finite() => (
            trade.entry_price - a * config.atr_stop_multiplier,
            trade.entry_price + a * config.atr_profit_multiplier,
        ),
        _ => (
            trade.entry_price * (1.0 - config.stop_loss_pct),
            trade.entry_price * (1.0 + config.take_profit_pct),
        ),
    }
}

/// Fill price and reason if this bar breaches the trade's stop or target.
/// Stop-loss is checked first: when one bar spans both levels, the
/// conservative outcome wins.
fn exit_trigger(
    trade: &Trade,
    bar: &PriceBar,
    atr_value: Option<f64>,
    config: &BacktestConfig,
) -> Option<(f64, ExitReason)> {
    let (stop, target) = stop_and_target(trade, atr_value, config);
    if bar.low <= stop {
        Some((stop, ExitReason::StopLoss))
    } else if bar.high >= target {
        Some((target, ExitReason::TakeProfit))
    } else {
        None
    }
}

/// Runs before the signal is consulted, every bar.
fn check_exits(
    state: &mut EngineState,
    bar: &PriceBar,
    atr_value: Option<f64>,
    config: &BacktestConfig,
) {
    let mut i = 0;
    while i < state.open_trades.len() {
        match exit_trigger(&state.open_trades[i], bar, atr_value, config) {
            Some((fill_price, reason)) => {
                let trade = state.open_trades.remove(i);
                close_trade(state, trade, fill_price, bar.time, reason, config);
            }
            None => i += 1,
        }
    }
}

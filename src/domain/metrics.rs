//! Summary statistics over a completed run.
//!
//! Computed once from the closed-trade ledger and equity curve. Every value
//! is a plain finite number: degenerate inputs (no trades, zero deviation,
//! zero gross loss, zero elapsed days) resolve to 0, never to infinity or
//! NaN, so a result always serializes cleanly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trade::Trade;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// (final equity − initial capital) / initial capital × 100.
    pub total_return: f64,
    /// (1 + total return)^(365/days) − 1, as a percentage.
    pub annualized_return: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Winning trades / total trades × 100.
    pub win_rate: f64,
    /// Gross profit / |gross loss|; 0 when there are no losses.
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Largest peak-to-trough equity decline, as a percentage of the peak.
    pub max_drawdown: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub avg_trade_duration_hours: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub final_capital: f64,
}

impl Metrics {
    /// Aggregate a frozen run. `span` is the first/last timestamp of the
    /// replayed series, used only for annualization.
    pub fn compute(
        trades: &[Trade],
        equity_curve: &[f64],
        initial_capital: f64,
        span: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Self {
        let final_capital = equity_curve.last().copied().unwrap_or(initial_capital);

        let total_return = if initial_capital > 0.0 {
            (final_capital - initial_capital) / initial_capital * 100.0
        } else {
            0.0
        };
        let annualized_return = annualize(total_return / 100.0, span);

        let mut winning_trades = 0usize;
        let mut losing_trades = 0usize;
        let mut gross_profit = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut best_trade = 0.0_f64;
        let mut worst_trade = 0.0_f64;
        let mut total_duration_hours = 0.0_f64;

        for trade in trades {
            let Some(exit) = &trade.exit else { continue };
            if exit.pnl > 0.0 {
                winning_trades += 1;
                gross_profit += exit.pnl;
            } else if exit.pnl < 0.0 {
                losing_trades += 1;
                gross_loss += exit.pnl.abs();
            }
            best_trade = best_trade.max(exit.pnl);
            worst_trade = worst_trade.min(exit.pnl);
            total_duration_hours +=
                (exit.time - trade.entry_time).num_seconds() as f64 / 3600.0;
        }

        let total_trades = trades.iter().filter(|t| t.exit.is_some()).count();
        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };
        // Zero gross loss maps to 0, not infinity, to keep the value finite
        // and comparable across runs.
        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else {
            0.0
        };
        let avg_win = if winning_trades > 0 {
            gross_profit / winning_trades as f64
        } else {
            0.0
        };
        let avg_loss = if losing_trades > 0 {
            -(gross_loss / losing_trades as f64)
        } else {
            0.0
        };
        let avg_trade_duration_hours = if total_trades > 0 {
            total_duration_hours / total_trades as f64
        } else {
            0.0
        };

        let returns = bar_returns(equity_curve);
        let sharpe_ratio = sharpe(&returns);
        let sortino_ratio = sortino(&returns);
        let max_drawdown = max_drawdown_pct(equity_curve);

        Metrics {
            total_return,
            annualized_return,
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            profit_factor,
            sharpe_ratio,
            sortino_ratio,
            max_drawdown,
            avg_win,
            avg_loss,
            avg_trade_duration_hours,
            best_trade,
            worst_trade,
            final_capital,
        }
    }
}

fn annualize(total_return: f64, span: Option<(DateTime<Utc>, DateTime<Utc>)>) -> f64 {
    let Some((start, end)) = span else { return 0.0 };
    let days = (end - start).num_days();
    if days <= 0 || !total_return.is_finite() || total_return <= -1.0 {
        return 0.0;
    }
    ((1.0 + total_return).powf(365.0 / days as f64) - 1.0) * 100.0
}

/// Bar-over-bar fractional equity changes.
fn bar_returns(equity_curve: &[f64]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

/// Sample standard deviation (N−1).
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

fn sharpe(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let std = sample_std(returns);
    if std > 0.0 {
        mean / std * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

fn sortino(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_std = sample_std(&downside);
    if downside_std > 0.0 {
        mean / downside_std * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        } else if peak > 0.0 {
            let dd = (peak - equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd * 100.0
}

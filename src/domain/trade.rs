//! One simulated position's lifecycle: open, then optionally closed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    Signal,
    StopLoss,
    TakeProfit,
    EndOfData,
}

/// Exit-side fields of a trade. Held behind an `Option` so a trade is either
/// fully open or fully closed, never in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeExit {
    pub time: DateTime<Utc>,
    /// Post-slippage fill price.
    pub price: f64,
    pub commission: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    pub reason: ExitReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    /// Post-slippage fill price.
    pub entry_price: f64,
    pub quantity: f64,
    pub entry_commission: f64,
    pub exit: Option<TradeExit>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.exit.is_none()
    }

    /// Mark-to-market value of a long holding at `price`. The replay engine
    /// only opens longs; short records carry their value in realized PnL.
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    /// Realized PnL net of both commissions. Long profits when exit > entry,
    /// short profits when exit < entry.
    fn realized_pnl(&self, exit_price: f64, exit_commission: f64) -> f64 {
        let price_pnl = match self.side {
            Side::Long => (exit_price - self.entry_price) * self.quantity,
            Side::Short => (self.entry_price - exit_price) * self.quantity,
        };
        price_pnl - self.entry_commission - exit_commission
    }

    /// Close the trade. All exit fields are set atomically.
    pub fn close(
        &mut self,
        exit_price: f64,
        exit_commission: f64,
        time: DateTime<Utc>,
        reason: ExitReason,
    ) {
        let pnl = self.realized_pnl(exit_price, exit_commission);
        let notional = self.entry_price * self.quantity;
        let pnl_percent = if notional > 0.0 {
            pnl / notional * 100.0
        } else {
            0.0
        };
        self.exit = Some(TradeExit {
            time,
            price: exit_price,
            commission: exit_commission,
            pnl,
            pnl_percent,
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_trade(side: Side) -> Trade {
        Trade {
            side,
            entry_time: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            entry_price: 100.0,
            quantity: 10.0,
            entry_commission: 1.0,
            exit: None,
        }
    }

    fn exit_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap()
    }

    #[test]
    fn new_trade_is_open() {
        assert!(sample_trade(Side::Long).is_open());
    }

    #[test]
    fn close_sets_all_exit_fields() {
        let mut trade = sample_trade(Side::Long);
        trade.close(110.0, 1.1, exit_time(), ExitReason::Signal);

        assert!(!trade.is_open());
        let exit = trade.exit.unwrap();
        assert_eq!(exit.reason, ExitReason::Signal);
        assert_eq!(exit.time, exit_time());
        assert!((exit.price - 110.0).abs() < f64::EPSILON);
        assert!((exit.commission - 1.1).abs() < f64::EPSILON);
    }

    #[test]
    fn long_pnl_profits_when_exit_above_entry() {
        let mut trade = sample_trade(Side::Long);
        trade.close(110.0, 1.1, exit_time(), ExitReason::TakeProfit);

        // (110 - 100) * 10 - 1.0 - 1.1
        let exit = trade.exit.unwrap();
        assert!((exit.pnl - 97.9).abs() < 1e-9);
        assert!((exit.pnl_percent - 97.9 / 1000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn long_pnl_loses_when_exit_below_entry() {
        let mut trade = sample_trade(Side::Long);
        trade.close(90.0, 0.9, exit_time(), ExitReason::StopLoss);
        assert!(trade.exit.unwrap().pnl < 0.0);
    }

    #[test]
    fn short_pnl_profits_when_exit_below_entry() {
        let mut trade = sample_trade(Side::Short);
        trade.close(90.0, 0.9, exit_time(), ExitReason::Signal);

        // (100 - 90) * 10 - 1.0 - 0.9
        assert!((trade.exit.unwrap().pnl - 98.1).abs() < 1e-9);
    }

    #[test]
    fn short_pnl_loses_when_exit_above_entry() {
        let mut trade = sample_trade(Side::Short);
        trade.close(110.0, 1.1, exit_time(), ExitReason::Signal);
        assert!(trade.exit.unwrap().pnl < 0.0);
    }

    #[test]
    fn market_value_at_current_price() {
        let trade = sample_trade(Side::Long);
        assert!((trade.market_value(105.0) - 1050.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_exit_costs_both_commissions() {
        let mut trade = sample_trade(Side::Long);
        trade.close(100.0, 1.0, exit_time(), ExitReason::EndOfData);
        assert!((trade.exit.unwrap().pnl - (-2.0)).abs() < 1e-9);
    }
}

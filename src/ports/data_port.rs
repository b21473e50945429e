//! Historical price data access port trait.

use chrono::{DateTime, Utc};

use crate::domain::bar::PriceBar;
use crate::domain::error::CandlelabError;

pub trait DataPort {
    /// Fetch bars for `symbol` at `timeframe`, ascending by time, optionally
    /// restricted to the inclusive `start..=end` window.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<PriceBar>, CandlelabError>;
}

//! CSV file data adapter.
//!
//! Reads `{symbol}_{timeframe}.csv` files with a
//! `time,open,high,low,close,volume` header, timestamps in RFC 3339.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use csv::StringRecord;

use crate::domain::bar::PriceBar;
use crate::domain::error::CandlelabError;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", symbol, timeframe))
    }
}

fn parse_price(record: &StringRecord, index: usize, name: &str) -> Result<f64, CandlelabError> {
    record
        .get(index)
        .ok_or_else(|| CandlelabError::Data {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| CandlelabError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<PriceBar>, CandlelabError> {
        let path = self.csv_path(symbol, timeframe);
        let content = fs::read_to_string(&path).map_err(|e| CandlelabError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CandlelabError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let time_str = record.get(0).ok_or_else(|| CandlelabError::Data {
                reason: "missing time column".into(),
            })?;
            let time = DateTime::parse_from_rfc3339(time_str)
                .map_err(|e| CandlelabError::Data {
                    reason: format!("invalid timestamp {:?}: {}", time_str, e),
                })?
                .with_timezone(&Utc);

            if start.is_some_and(|s| time < s) || end.is_some_and(|e| time > e) {
                continue;
            }

            bars.push(PriceBar {
                time,
                open: parse_price(&record, 1, "open")?,
                high: parse_price(&record, 2, "high")?,
                low: parse_price(&record, 3, "low")?,
                close: parse_price(&record, 4, "close")?,
                volume: parse_price(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.time);
        Ok(bars)
    }
}

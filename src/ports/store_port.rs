//! Result persistence port trait.

use std::path::PathBuf;

use crate::domain::engine::BacktestResult;
use crate::domain::error::CandlelabError;

pub trait StorePort {
    /// Persist a completed run, returning the path it was written to.
    fn save(
        &self,
        result: &BacktestResult,
        strategy: &str,
        symbol: &str,
    ) -> Result<PathBuf, CandlelabError>;
}

//! JSON file result store adapter.
//!
//! Writes one `{strategy}_{symbol}.json` per run, overwriting any previous
//! result for the same pair.

use std::fs;
use std::path::PathBuf;

use crate::domain::engine::BacktestResult;
use crate::domain::error::CandlelabError;
use crate::ports::store_port::StorePort;

pub struct JsonStoreAdapter {
    base_path: PathBuf,
}

impl JsonStoreAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }
}

impl StorePort for JsonStoreAdapter {
    fn save(
        &self,
        result: &BacktestResult,
        strategy: &str,
        symbol: &str,
    ) -> Result<PathBuf, CandlelabError> {
        fs::create_dir_all(&self.base_path).map_err(|e| CandlelabError::Store {
            reason: format!("failed to create {}: {}", self.base_path.display(), e),
        })?;

        let path = self.base_path.join(format!("{}_{}.json", strategy, symbol));
        let json = serde_json::to_string_pretty(result).map_err(|e| CandlelabError::Store {
            reason: format!("serialization failed: {}", e),
        })?;
        fs::write(&path, json).map_err(|e| CandlelabError::Store {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;
        Ok(path)
    }
}

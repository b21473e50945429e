//! Domain error types.

/// Top-level error type for candlelab.
#[derive(Debug, thiserror::Error)]
pub enum CandlelabError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value for {field}: {reason}")]
    ConfigInvalid { field: String, reason: String },

    #[error("invalid date range: {reason}")]
    InvalidRange { reason: String },

    #[error("unknown strategy: {id}")]
    UnknownStrategy { id: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol} on timeframe {timeframe}")]
    NoData { symbol: String, timeframe: String },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CandlelabError> for std::process::ExitCode {
    fn from(err: &CandlelabError) -> Self {
        let code: u8 = match err {
            CandlelabError::Io(_) => 1,
            CandlelabError::ConfigParse { .. }
            | CandlelabError::ConfigMissing { .. }
            | CandlelabError::ConfigInvalid { .. } => 2,
            CandlelabError::InvalidRange { .. } | CandlelabError::UnknownStrategy { .. } => 3,
            CandlelabError::Data { .. } | CandlelabError::NoData { .. } => 4,
            CandlelabError::Store { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

//! INI file configuration adapter.
//!
//! Only the `[backtest]` section is meaningful today; every key falls back
//! to the built-in default when absent or unparseable.

use std::path::Path;

use configparser::ini::Ini;

use crate::domain::config::{BacktestConfig, PositionSizing};
use crate::domain::error::CandlelabError;
use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CandlelabError> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|e| CandlelabError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason: e,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, CandlelabError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| CandlelabError::ConfigParse {
                file: "<inline>".to_string(),
                reason: e,
            })?;
        Ok(Self { config })
    }

    /// Assemble a [`BacktestConfig`] from the `[backtest]` section,
    /// validated before return.
    pub fn backtest_config(&self) -> Result<BacktestConfig, CandlelabError> {
        let defaults = BacktestConfig::default();
        let sizing = match self.get_string("backtest", "position_sizing") {
            Some(raw) => match raw.to_lowercase().as_str() {
                "fixed" => PositionSizing::Fixed,
                "percentage" => PositionSizing::Percentage,
                other => {
                    return Err(CandlelabError::ConfigInvalid {
                        field: "position_sizing".to_string(),
                        reason: format!("unknown sizing mode {:?}", other),
                    });
                }
            },
            None => defaults.position_sizing,
        };

        let config = BacktestConfig {
            initial_capital: self.get_double("backtest", "initial_capital", defaults.initial_capital),
            commission_rate: self.get_double("backtest", "commission_rate", defaults.commission_rate),
            slippage_rate: self.get_double("backtest", "slippage_rate", defaults.slippage_rate),
            position_sizing: sizing,
            position_size: self.get_double("backtest", "position_size", defaults.position_size),
            max_positions: self.get_int("backtest", "max_positions", defaults.max_positions as i64)
                as usize,
            stop_loss_pct: self.get_double("backtest", "stop_loss_pct", defaults.stop_loss_pct),
            take_profit_pct: self.get_double("backtest", "take_profit_pct", defaults.take_profit_pct),
            use_atr_stops: self.get_bool("backtest", "use_atr_stops", defaults.use_atr_stops),
            atr_stop_multiplier: self.get_double(
                "backtest",
                "atr_stop_multiplier",
                defaults.atr_stop_multiplier,
            ),
            atr_profit_multiplier: self.get_double(
                "backtest",
                "atr_profit_multiplier",
                defaults.atr_profit_multiplier,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

//! Technical indicator library.
//!
//! Every function maps an input series to an output series of identical
//! length. Positions with insufficient history hold the `f64::NAN` sentinel
//! instead of raising. Output index `i` depends only on input `[0..=i]` —
//! never on later bars.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod bollinger;
pub mod atr;
pub mod adx;

pub use adx::adx;
pub use atr::{atr, true_range};
pub use bollinger::{bollinger, Bands};
pub use ema::ema;
pub use rsi::rsi;
pub use sma::sma;

//! Core domain types and logic.

pub mod bar;
pub mod config;
pub mod trade;
pub mod engine;
pub mod metrics;
pub mod signal;
pub mod strategies;
pub mod indicator;
pub mod error;

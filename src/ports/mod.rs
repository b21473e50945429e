//! Port traits decoupling the domain from storage and configuration.

pub mod config_port;
pub mod data_port;
pub mod store_port;

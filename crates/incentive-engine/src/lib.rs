pub mod config;
pub mod error;
pub mod payouts;
pub mod telemetry;

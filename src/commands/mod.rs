//! CLI command implementations.

pub mod monitor;

pub use monitor::MonitorCommand;

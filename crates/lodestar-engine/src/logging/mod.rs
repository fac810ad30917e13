//! Logging utilities.
//!
//! The UI core only uses the `log` facade; this module wires up `env_logger`
//! for hosts and tools that do not bring their own backend.

mod init;

pub use init::{init_logging, LoggingConfig};

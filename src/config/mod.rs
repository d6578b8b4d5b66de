//! Configuration management for dirwatcher.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables (logging options only)
//! - Built-in defaults (lowest priority)

mod cli;
mod settings;

pub use cli::Cli;
pub use settings::{Config, DEFAULT_EXTENSION, DEFAULT_POLLING_SECS};

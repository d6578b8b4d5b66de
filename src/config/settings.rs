//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extension filter applied when none is given.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Seconds between polls when none is given.
pub const DEFAULT_POLLING_SECS: f64 = 1.0;

/// Main configuration for the directory watcher.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to poll.
    pub dir: PathBuf,

    /// Substring searched for in tracked files.
    pub magic: String,

    /// File extension filter without the leading dot. Empty tracks every file.
    pub extension: String,

    /// Seconds between polls.
    pub polling_secs: f64,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of plain text.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            magic: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            polling_secs: DEFAULT_POLLING_SECS,
            log_level: "debug".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Create a configuration watching `dir` for `magic` with defaults elsewhere.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, magic: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            magic: magic.into(),
            ..Self::default()
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.magic.is_empty() {
            return Err(Error::config("magic text cannot be empty"));
        }

        if self.dir.as_os_str().is_empty() {
            return Err(Error::config("watch directory cannot be empty"));
        }

        self.polling_interval()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Interval between polls.
    ///
    /// # Errors
    ///
    /// Returns an error unless the polling time converts to a non-zero
    /// [`Duration`]. Negative, non-finite, overflowing and sub-nanosecond
    /// values are all rejected.
    pub fn polling_interval(&self) -> Result<Duration> {
        let invalid = || {
            Error::config(format!(
                "polling time must be a positive number of seconds, got {}",
                self.polling_secs
            ))
        };
        let interval = Duration::try_from_secs_f64(self.polling_secs).map_err(|_| invalid())?;
        if interval.is_zero() {
            return Err(invalid());
        }
        Ok(interval)
    }

    /// The watch directory resolved against the current working directory.
    ///
    /// The directory itself does not have to exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn absolute_dir(&self) -> Result<PathBuf> {
        absolutize(&self.dir)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

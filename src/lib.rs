//! dirwatcher
//!
//! Polls a directory, reports files appearing and disappearing, and logs
//! every new line that contains a magic text.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod shutdown;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};

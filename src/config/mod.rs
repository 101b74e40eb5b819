//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoint, timeouts, file names)
//! - The library-level [`Config`] and registry [`Credentials`]
//! - CLI option parsing ([`Cli`])

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, CliError};
pub use constants::*;
pub use types::{Config, Credentials, LogFormat, LogLevel};

//! Configuration types.
//!
//! This module defines enums and structs used for configuration, independent
//! of how they were obtained (CLI, environment, or code).

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_ENDPOINT, DEFAULT_NAMESPACE, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use crate::registry::OperationKind;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages (includes progress lines)
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Registry credentials.
///
/// Held by the SOAP client and sent with every request. Never logged: the
/// `Debug` impl masks the API key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Web service API key issued by the registry
    pub api_key: String,
    /// MaStR number of the market actor owning the key (`marktakteurMastrNummer`)
    pub actor_number: String,
}

impl Credentials {
    /// Credentials from an API key and actor number.
    pub fn new(api_key: impl Into<String>, actor_number: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            actor_number: actor_number.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("actor_number", &self.actor_number)
            .finish()
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use mastr_export::Config;
///
/// let config = Config {
///     categories: vec!["Windeinheit".to_string()],
///     stand: "2024-01-31".to_string(),
///     max_rows: Some(100),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Unit categories to export, by canonical or English name
    pub categories: Vec<String>,

    /// Dataset version tag ("Stand")
    pub stand: String,

    /// Explicit identifiers; bypasses the master listing when set
    pub identifiers: Option<Vec<String>>,

    /// Record kinds to write; empty means every kind the category supports
    pub kinds: Vec<OperationKind>,

    /// Process at most this many identifiers per category
    pub max_rows: Option<usize>,

    /// Directory holding `<stand>_alleEinheiten.csv`
    pub listing_dir: PathBuf,

    /// Root of the output tree (`<output_dir>/<stand>/<category>/`)
    pub output_dir: PathBuf,

    /// SOAP endpoint URL
    pub endpoint: String,

    /// XML namespace of request elements
    pub namespace: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Retries per fetch for transient failures
    pub retries: usize,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Registry credentials
    pub credentials: Credentials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            stand: String::new(),
            identifiers: None,
            kinds: Vec::new(),
            max_rows: None,
            listing_dir: PathBuf::from("./alleEinheiten"),
            output_dir: PathBuf::from("./Einheiten"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            credentials: Credentials::default(),
        }
    }
}

//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{
    ALL_CATEGORIES, DEFAULT_ENDPOINT, DEFAULT_NAMESPACE, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS,
    ENV_ACTOR_NUMBER, ENV_API_KEY, ENV_ENDPOINT,
};
use crate::config::types::{Config, Credentials, LogFormat, LogLevel};
use crate::error_handling::{InitializationError, ListingError};
use crate::listing::read_identifier_file;
use crate::registry::{OperationKind, UnitCategory, UnknownCategory};

/// Export unit records from the MaStR registry into partitioned CSV files.
#[derive(Debug, Parser)]
#[command(name = "mastr_export", version, about)]
pub struct Cli {
    /// Unit categories to export (e.g. Windeinheit, Biomasse) or `all`
    #[arg(required = true, num_args = 1..)]
    pub categories: Vec<String>,

    /// Dataset version tag ("Stand"), e.g. 2024-01-31
    #[arg(long)]
    pub stand: String,

    /// Explicit unit identifiers (comma-separated); skips the master listing
    #[arg(long, value_delimiter = ',', conflicts_with = "ids_file")]
    pub ids: Option<Vec<String>>,

    /// File with one unit identifier per line; skips the master listing
    #[arg(long)]
    pub ids_file: Option<PathBuf>,

    /// Record kinds to write (Einheit, AnlageEEG, Lokation, AnlageKwk); default all
    #[arg(long, value_delimiter = ',')]
    pub kinds: Vec<OperationKind>,

    /// Process at most this many identifiers per category
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Directory holding `<stand>_alleEinheiten.csv`
    #[arg(long, default_value = "./alleEinheiten")]
    pub listing_dir: PathBuf,

    /// Root directory for output files
    #[arg(long, default_value = "./Einheiten")]
    pub output_dir: PathBuf,

    /// SOAP endpoint of the registry
    #[arg(long, env = ENV_ENDPOINT, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// XML namespace of request elements
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Retries per fetch for transient failures
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: usize,

    /// Registry API key
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// MaStR number of the market actor owning the API key
    #[arg(long, env = ENV_ACTOR_NUMBER)]
    pub actor_number: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Category names with `all` expanded to every known category.
    pub fn category_names(&self) -> Vec<String> {
        use strum::IntoEnumIterator;

        if self
            .categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(ALL_CATEGORIES))
        {
            UnitCategory::iter()
                .map(|c| c.canonical_name().to_string())
                .collect()
        } else {
            self.categories.clone()
        }
    }

    /// Resolves categories, credentials and the identifier file into a
    /// [`Config`], in that order.
    ///
    /// # Errors
    ///
    /// Fails if a category name is unknown, the API key or actor number is
    /// missing, or `--ids-file` cannot be read.
    pub fn into_config(self) -> Result<Config, CliError> {
        let categories = self
            .category_names()
            .iter()
            .map(|name| name.parse::<UnitCategory>())
            .map(|category| category.map(|c| c.canonical_name().to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(InitializationError::MissingCredentialError(ENV_API_KEY))?;
        let actor_number = self
            .actor_number
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or(InitializationError::MissingCredentialError(ENV_ACTOR_NUMBER))?;

        let identifiers = match (&self.ids, &self.ids_file) {
            (Some(ids), _) => Some(ids.clone()),
            (None, Some(path)) => Some(read_identifier_file(path)?),
            (None, None) => None,
        };

        Ok(Config {
            categories,
            stand: self.stand,
            identifiers,
            kinds: self.kinds,
            max_rows: self.max_rows,
            listing_dir: self.listing_dir,
            output_dir: self.output_dir,
            endpoint: self.endpoint,
            namespace: self.namespace,
            timeout_seconds: self.timeout_seconds,
            retries: self.retries,
            log_level: self.log_level,
            log_format: self.log_format,
            credentials: Credentials::new(api_key, actor_number),
        })
    }
}

/// Errors turning command-line options into a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A category name is unknown
    #[error(transparent)]
    Category(#[from] UnknownCategory),
    /// Missing credentials
    #[error(transparent)]
    Initialization(#[from] InitializationError),
    /// The identifier file could not be read
    #[error(transparent)]
    Identifiers(#[from] ListingError),
}

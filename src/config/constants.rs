//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: registry
//! endpoint, timeouts, retry backoff, and the names of input and output files.

/// Default SOAP endpoint of the registry's unit service.
pub const DEFAULT_ENDPOINT: &str = "https://www.marktstammdatenregister.de/MaStRAPI/Anlage";

/// XML namespace of the unit service request elements.
pub const DEFAULT_NAMESPACE: &str =
    "https://www.marktstammdatenregister.de/Services/Public/1_2/Anlage";

/// Per-request timeout in seconds.
///
/// The registry occasionally hangs instead of failing; without a bound a
/// single stuck request would stall the whole run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Retries per fetch for transient failures. Zero keeps one attempt per record.
pub const DEFAULT_RETRIES: usize = 0;

// Retry strategy
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;

// Environment variables
/// API key of the registry web service user
pub const ENV_API_KEY: &str = "MASTR_API_KEY";
/// MaStR number of the market actor owning the API key
pub const ENV_ACTOR_NUMBER: &str = "MASTR_ACTOR_NUMBER";
/// Overrides the SOAP endpoint
pub const ENV_ENDPOINT: &str = "MASTR_ENDPOINT";

// Master listing
/// Listing file name is `<stand>` followed by this suffix.
pub const LISTING_FILE_SUFFIX: &str = "_alleEinheiten.csv";
/// Listing column naming the unit category
pub const LISTING_CATEGORY_COLUMN: &str = "Einheittyp";
/// Listing column holding the unit identifier
pub const LISTING_IDENTIFIER_COLUMN: &str = "EinheitMastrNummer";

/// Field separator for the listing and all output files.
pub const FIELD_SEPARATOR: u8 = b';';

/// Placeholder accepted on the command line for "every unit category".
pub const ALL_CATEGORIES: &str = "all";

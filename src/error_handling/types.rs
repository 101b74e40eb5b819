//! Error type definitions.
//!
//! This module defines the fatal errors that abort a run and the per-record
//! fetch errors that are recovered into error partitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::registry::UnknownCategory;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A required credential is neither configured nor present in the environment.
    #[error("Missing credential: set {0}")]
    MissingCredentialError(&'static str),
}

/// Errors reading the master listing.
#[derive(Error, Debug)]
pub enum ListingError {
    /// The listing file for the requested stand does not exist or cannot be opened.
    #[error("Cannot open master listing {path}: {source}")]
    Open {
        /// Listing file path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The listing lacks a required column.
    #[error("Master listing {path} has no column '{column}'")]
    MissingColumn {
        /// Listing file path
        path: String,
        /// Name of the absent column
        column: &'static str,
    },

    /// A row could not be parsed.
    #[error("Cannot parse master listing {path}: {source}")]
    Parse {
        /// Listing file path
        path: String,
        /// Underlying CSV error
        source: csv::Error,
    },
}

/// Fatal errors of an export run.
///
/// Anything in here aborts the run. Per-record failures are [`FetchError`]s
/// and never surface as an `ExportError`.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The caller named a unit category that does not exist.
    #[error(transparent)]
    InvalidCategory(#[from] UnknownCategory),

    /// Neither explicit identifiers nor a readable master listing are available.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// An output file or directory could not be created or written.
    #[error("Output error for {path}: {source}")]
    Io {
        /// File or directory path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A row could not be written to an output partition.
    #[error("Cannot write row to {path}: {source}")]
    Write {
        /// Partition file path
        path: String,
        /// Underlying CSV error
        source: csv::Error,
    },
}

/// Per-record failures. Each one becomes a row in an error partition.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The registry answered with a non-success status and no SOAP fault.
    #[error("Registry returned HTTP status {0}")]
    Status(u16),

    /// The registry answered with a SOAP fault.
    #[error("SOAP fault: {0}")]
    Fault(String),

    /// The response was not a usable SOAP payload.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The unit record does not carry the identifier a dependent fetch needs.
    #[error("Unit record has no value for {0}")]
    MissingCrossReference(&'static str),
}

impl FetchError {
    /// Whether a retry might succeed.
    ///
    /// Only transport failures and server-side statuses (5xx, 429) are
    /// transient; faults and malformed payloads are answers, not outages.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            FetchError::Status(status) => *status == 429 || (500..600).contains(status),
            FetchError::Fault(_)
            | FetchError::Malformed(_)
            | FetchError::MissingCrossReference(_) => false,
        }
    }

    /// How this failure is counted in the export statistics.
    pub fn outcome(&self) -> Outcome {
        match self {
            FetchError::MissingCrossReference(_) => Outcome::Skipped,
            _ => Outcome::Failed,
        }
    }
}

/// Outcome of one fetch attempt, counted per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Outcome {
    /// Record fetched and, if the kind is active, written
    Succeeded,
    /// Fetch failed; identifier written to the error partition
    Failed,
    /// Dependent fetch not attempted because the unit record lacks its identifier
    Skipped,
}

impl Outcome {
    /// Lowercase label used in log summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Error handling and export statistics.
//!
//! This module provides:
//! - Error type definitions (fatal run errors and per-record fetch errors)
//! - Per-kind outcome statistics
//! - Retry strategy configuration
//!
//! Only [`ExportError`] and [`InitializationError`] abort a run. A
//! [`FetchError`] is always recovered at record granularity.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::get_retry_strategy;
pub use stats::ExportStats;
pub use types::{ExportError, FetchError, InitializationError, ListingError, Outcome};

//! Main application modules.
//!
//! This module provides progress logging and the end-of-run summary used by
//! the exporter and the binary.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use statistics::log_export_statistics;

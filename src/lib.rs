//! mastr_export library: export of MaStR registry records into CSV partitions
//!
//! This library fetches unit, EEG, location and CHP detail records from the
//! MaStR SOAP API and appends them to `;`-separated files, one success and one
//! error file per record kind, per unit category and dataset version ("Stand").
//!
//! # Example
//!
//! ```no_run
//! use mastr_export::{run_export, Config, Credentials};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     categories: vec!["Biomasse".to_string()],
//!     stand: "2024-01-31".to_string(),
//!     max_rows: Some(10),
//!     credentials: Credentials::new("api-key", "SOM123456789012"),
//!     ..Default::default()
//! };
//!
//! let report = run_export(config).await?;
//! println!("Processed {} units", report.processed());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod listing;
pub mod registry;

// Re-export public API
pub use config::{Cli, Config, Credentials, LogFormat, LogLevel};
pub use error_handling::{ExportError, FetchError, Outcome};
pub use export::{ExportReport, ExportRequest, Exporter};
pub use registry::{OperationKind, RegistryClient, SoapClient, UnitCategory};
pub use run::{run_export, run_export_with, RunReport};

// Internal run module (drives one export per configured category)
mod run {
    use anyhow::{Context, Result};
    use log::info;

    use crate::app::log_export_statistics;
    use crate::config::Config;
    use crate::error_handling::{ExportError, ExportStats};
    use crate::export::{ExportReport, ExportRequest, Exporter};
    use crate::initialization::init_client;
    use crate::registry::{RegistryClient, UnitCategory};

    /// Results of a run over one or more categories.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// One report per category, in run order
        pub reports: Vec<ExportReport>,
        /// Outcome counters summed over all categories
        pub stats: ExportStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl RunReport {
        /// Identifiers processed over all categories.
        pub fn processed(&self) -> usize {
            self.reports.iter().map(|r| r.processed).sum()
        }
    }

    /// Runs an export with the provided configuration.
    ///
    /// Builds the SOAP client from the configuration and exports every
    /// configured category in order.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - A category name is unknown (checked before any I/O)
    /// - The HTTP client cannot be initialized
    /// - A master listing cannot be read or an output file cannot be written
    pub async fn run_export(config: Config) -> Result<RunReport> {
        let categories = parse_categories(&config)?;
        let client = init_client(&config).context("Failed to initialize registry client")?;
        export_categories(client, &config, &categories).await
    }

    /// Like [`run_export`], but with a caller-supplied registry client.
    pub async fn run_export_with<C: RegistryClient>(client: C, config: Config) -> Result<RunReport> {
        let categories = parse_categories(&config)?;
        export_categories(client, &config, &categories).await
    }

    fn parse_categories(config: &Config) -> Result<Vec<UnitCategory>, ExportError> {
        config
            .categories
            .iter()
            .map(|name| name.parse().map_err(ExportError::from))
            .collect()
    }

    async fn export_categories<C: RegistryClient>(
        client: C,
        config: &Config,
        categories: &[UnitCategory],
    ) -> Result<RunReport> {
        let start = std::time::Instant::now();
        let exporter = Exporter::new(client, &config.listing_dir, &config.output_dir);
        let mut reports = Vec::with_capacity(categories.len());
        let mut stats = ExportStats::new();

        for category in categories {
            info!("Exporting {} (Stand {})", category, config.stand);
            let mut request = ExportRequest::new(*category, config.stand.clone())
                .with_kinds(config.kinds.clone())
                .with_max_rows(config.max_rows);
            if let Some(identifiers) = &config.identifiers {
                request = request.with_identifiers(identifiers.clone());
            }

            let report = exporter
                .export(&request)
                .await
                .with_context(|| format!("Export of {} failed", category))?;
            log_export_statistics(&report);
            stats.merge(&report.stats);
            reports.push(report);
        }

        Ok(RunReport {
            reports,
            stats,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}

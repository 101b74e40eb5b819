//! The per-category export loop.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, warn};

use super::cleanup::remove_empty_files;
use super::partition::{category_dir, PartitionWriters};
use crate::app::log_progress;
use crate::error_handling::{ExportError, ExportStats, FetchError, Outcome};
use crate::listing::{listing_path, read_master_listing};
use crate::registry::{
    Operation, OperationKind, OperationSet, Record, RegistryClient, UnitCategory,
};

/// Parameters of one export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Category to export
    pub category: UnitCategory,
    /// Dataset version tag ("Stand")
    pub stand: String,
    /// Explicit worklist; the master listing is not read when set
    pub identifiers: Option<Vec<String>>,
    /// Kinds to write; empty means every supported kind
    pub kinds: Vec<OperationKind>,
    /// Process at most this many identifiers
    pub max_rows: Option<usize>,
}

impl ExportRequest {
    /// Request for every supported kind over the master listing.
    pub fn new(category: UnitCategory, stand: impl Into<String>) -> Self {
        Self {
            category,
            stand: stand.into(),
            identifiers: None,
            kinds: Vec::new(),
            max_rows: None,
        }
    }

    /// Builds a request from a category name.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidCategory` if `category` names no known
    /// unit category.
    pub fn parse(category: &str, stand: impl Into<String>) -> Result<Self, ExportError> {
        Ok(Self::new(category.parse()?, stand))
    }

    /// Uses an explicit worklist instead of the master listing.
    pub fn with_identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.identifiers = Some(identifiers);
        self
    }

    /// Restricts the written kinds; empty means all.
    pub fn with_kinds(mut self, kinds: Vec<OperationKind>) -> Self {
        self.kinds = kinds;
        self
    }

    /// Limits the number of processed identifiers.
    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Whether rows of `kind` are written in this request.
    pub fn is_active(&self, kind: OperationKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

/// Summary of one export call. The data itself lives in the partition files.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Exported category
    pub category: UnitCategory,
    /// Dataset version tag
    pub stand: String,
    /// Length of the resolved worklist
    pub worklist_len: usize,
    /// Identifiers actually processed (after `max_rows`)
    pub processed: usize,
    /// Outcome counters of this call
    pub stats: ExportStats,
    /// Zero-byte files removed after the run
    pub removed_files: usize,
    /// Directory holding this category's partitions
    pub output_dir: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Exports registry records for one category at a time.
///
/// Processing is strictly sequential: one identifier is fetched and written
/// completely before the next one starts.
pub struct Exporter<C> {
    client: C,
    listing_dir: PathBuf,
    output_dir: PathBuf,
}

impl<C: RegistryClient> Exporter<C> {
    /// Creates an exporter reading listings from `listing_dir` and writing below `output_dir`.
    pub fn new(client: C, listing_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            listing_dir: listing_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// The registry client in use.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Root directory for output files.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs one export.
    ///
    /// Per-record fetch failures are written to the error partitions and never
    /// abort the run. After the loop every zero-byte file below the category
    /// directory is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the master listing cannot be read (when no explicit
    /// identifiers are given) or an output file cannot be created or written.
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportReport, ExportError> {
        let start = Instant::now();
        let worklist = self.resolve_worklist(request)?;
        let total = request
            .max_rows
            .map_or(worklist.len(), |max| max.min(worklist.len()));
        let dir = category_dir(&self.output_dir, &request.stand, request.category);
        let operations = request.category.operations();
        let mut stats = ExportStats::new();

        debug!(
            "Exporting {} of {} {} units into {}",
            total,
            worklist.len(),
            request.category,
            dir.display()
        );

        {
            let mut writers = PartitionWriters::open(&dir)?;
            for (index, identifier) in worklist.iter().take(total).enumerate() {
                self.export_unit(
                    request,
                    &operations,
                    identifier,
                    (index + 1, total),
                    &mut writers,
                    &mut stats,
                )
                .await?;
            }
        }

        let removed_files = remove_empty_files(&dir)?;

        Ok(ExportReport {
            category: request.category,
            stand: request.stand.clone(),
            worklist_len: worklist.len(),
            processed: total,
            stats,
            removed_files,
            output_dir: dir,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }

    fn resolve_worklist(&self, request: &ExportRequest) -> Result<Vec<String>, ExportError> {
        match &request.identifiers {
            Some(identifiers) => Ok(identifiers.clone()),
            None => {
                let path = listing_path(&self.listing_dir, &request.stand);
                Ok(read_master_listing(&path, request.category)?)
            }
        }
    }

    /// Fetches one unit and its dependent records.
    ///
    /// The unit fetch always happens because it carries the identifiers of the
    /// dependent records. If it fails, the dependents are not attempted.
    async fn export_unit(
        &self,
        request: &ExportRequest,
        operations: &OperationSet,
        identifier: &str,
        position: (usize, usize),
        writers: &mut PartitionWriters,
        stats: &mut ExportStats,
    ) -> Result<(), ExportError> {
        let fetched = self.client.fetch(operations.unit, identifier).await;
        let (current, total) = position;
        log_progress(request.category, identifier, current, total);

        let unit = match fetched {
            Ok(record) => record,
            Err(e) => {
                warn!("{} {}: {}", operations.unit.name, identifier, e);
                stats.record(OperationKind::Unit, e.outcome());
                return writers.append_error(OperationKind::Unit, identifier);
            }
        };
        stats.record(OperationKind::Unit, Outcome::Succeeded);
        if request.is_active(OperationKind::Unit) {
            writers.append_record(OperationKind::Unit, &unit)?;
        }

        for operation in operations
            .dependents()
            .filter(|op| request.is_active(op.kind))
        {
            self.export_dependent(operation, identifier, &unit, writers, stats)
                .await?;
        }
        Ok(())
    }

    async fn export_dependent(
        &self,
        operation: Operation,
        unit_identifier: &str,
        unit: &Record,
        writers: &mut PartitionWriters,
        stats: &mut ExportStats,
    ) -> Result<(), ExportError> {
        let Some(field) = operation.kind.cross_reference_field() else {
            return Ok(());
        };
        let Some(target) = unit.identifier(field) else {
            let missing = FetchError::MissingCrossReference(field);
            debug!(
                "{} {}: {}; skipping {}",
                operation.name, unit_identifier, missing, operation.kind
            );
            stats.record(operation.kind, missing.outcome());
            return Ok(());
        };

        match self.client.fetch(operation, target).await {
            Ok(record) => {
                stats.record(operation.kind, Outcome::Succeeded);
                writers.append_record(operation.kind, &record)
            }
            Err(e) => {
                warn!("{} {} (unit {}): {}", operation.name, target, unit_identifier, e);
                stats.record(operation.kind, e.outcome());
                writers.append_error(operation.kind, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parse_rejects_unknown_category() {
        let err = ExportRequest::parse("Fusion", "2024").unwrap_err();
        assert!(matches!(err, ExportError::InvalidCategory(_)));
    }

    #[test]
    fn test_request_active_kinds() {
        let all = ExportRequest::new(UnitCategory::Biomass, "s");
        assert!(all.is_active(OperationKind::CombinedHeatPower));

        let units_only = all.with_kinds(vec![OperationKind::Unit]);
        assert!(units_only.is_active(OperationKind::Unit));
        assert!(!units_only.is_active(OperationKind::FeedInTariff));
    }
}

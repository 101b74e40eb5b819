//! End-of-run statistics logging.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::Outcome;
use crate::export::ExportReport;
use crate::registry::OperationKind;

/// Logs the per-kind outcome counts of one category export.
///
/// Kinds without any recorded outcome (unsupported by the category or not
/// requested) are left out.
pub fn log_export_statistics(report: &ExportReport) {
    info!(
        "{} (Stand {}): processed {} of {} identifiers in {:.1}s, removed {} empty file{}",
        report.category,
        report.stand,
        report.processed,
        report.worklist_len,
        report.elapsed_seconds,
        report.removed_files,
        if report.removed_files == 1 { "" } else { "s" }
    );
    for kind in OperationKind::iter() {
        let counts: Vec<String> = Outcome::iter()
            .map(|outcome| (outcome, report.stats.count(kind, outcome)))
            .filter(|(_, count)| *count > 0)
            .map(|(outcome, count)| format!("{count} {outcome}"))
            .collect();
        if !counts.is_empty() {
            info!("   {}: {}", kind, counts.join(", "));
        }
    }
}

//! Progress logging utilities.

use log::info;

use crate::registry::UnitCategory;

/// Share of the worklist processed so far, in percent, rounded to two decimals.
pub fn progress_percentage(current: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    // Worklists are far below 2^53 entries, so the cast is exact.
    #[allow(clippy::cast_precision_loss)]
    let pct = current as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Logs one progress line after a unit fetch attempt.
///
/// # Arguments
///
/// * `category` - Category being exported
/// * `identifier` - Unit identifier just attempted
/// * `current` - 1-based position of `identifier` in the worklist
/// * `total` - Number of identifiers this run processes
pub fn log_progress(category: UnitCategory, identifier: &str, current: usize, total: usize) {
    info!(
        "{} {}: {:.2} %; Anzahl: {} von {}",
        category.canonical_name(),
        identifier,
        progress_percentage(current, total),
        current,
        total
    );
}

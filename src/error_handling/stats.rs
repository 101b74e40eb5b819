//! Export statistics tracking.
//!
//! Counts fetch outcomes per record kind during one export run.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::types::Outcome;
use crate::registry::OperationKind;

/// Per-kind outcome counters for one export run.
///
/// Every (kind, outcome) pair is initialized to zero on creation, so lookups
/// never miss. The exporter is sequential, so plain counters suffice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStats {
    counts: HashMap<(OperationKind, Outcome), usize>,
}

impl ExportStats {
    /// Creates counters with every (kind, outcome) pair at zero.
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for kind in OperationKind::iter() {
            for outcome in Outcome::iter() {
                counts.insert((kind, outcome), 0);
            }
        }
        ExportStats { counts }
    }

    /// Counts one fetch outcome.
    pub fn record(&mut self, kind: OperationKind, outcome: Outcome) {
        *self.counts.entry((kind, outcome)).or_insert(0) += 1;
    }

    /// Current count for one (kind, outcome) pair.
    pub fn count(&self, kind: OperationKind, outcome: Outcome) -> usize {
        self.counts.get(&(kind, outcome)).copied().unwrap_or(0)
    }

    /// Total across all kinds for one outcome.
    pub fn total(&self, outcome: Outcome) -> usize {
        OperationKind::iter()
            .map(|kind| self.count(kind, outcome))
            .sum()
    }

    /// Adds another run's counters to this one.
    pub fn merge(&mut self, other: &ExportStats) {
        for (key, value) in &other.counts {
            *self.counts.entry(*key).or_insert(0) += value;
        }
    }
}

impl Default for ExportStats {
    fn default() -> Self {
        Self::new()
    }
}

//! Export of registry records into partitioned CSV files.
//!
//! Each category and stand gets its own directory with one success and one
//! error partition per record kind. Partitions that end up empty are removed
//! after the run.

mod cleanup;
mod exporter;
mod partition;

pub use cleanup::remove_empty_files;
pub use exporter::{ExportReport, ExportRequest, Exporter};
pub use partition::{category_dir, Partition, PartitionWriters, Side};

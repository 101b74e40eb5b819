//! Output partitions and their append-mode writers.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

use crate::config::FIELD_SEPARATOR;
use crate::error_handling::ExportError;
use crate::registry::{OperationKind, Record, UnitCategory};

/// Whether a partition holds fetched rows or failed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Side {
    /// Fetched rows
    Success,
    /// Identifiers whose fetch failed
    Error,
}

/// One output file within a category directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    /// Record kind stored in the file
    pub kind: OperationKind,
    /// Success or error file
    pub side: Side,
}

impl Partition {
    /// Partition of `kind` on `side`.
    pub const fn new(kind: OperationKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// File name within the category directory.
    pub fn file_name(&self) -> &'static str {
        match (self.kind, self.side) {
            (OperationKind::Unit, Side::Success) => "Einheiten.csv",
            (OperationKind::Unit, Side::Error) => "ErrorEinheiten.csv",
            (OperationKind::FeedInTariff, Side::Success) => "EegAnlagen.csv",
            (OperationKind::FeedInTariff, Side::Error) => "ErrorEegAnlagen.csv",
            (OperationKind::Location, Side::Success) => "Lokationen.csv",
            (OperationKind::Location, Side::Error) => "ErrorLokationen.csv",
            (OperationKind::CombinedHeatPower, Side::Success) => "KwkAnlagen.csv",
            (OperationKind::CombinedHeatPower, Side::Error) => "ErrorKwkAnlagen.csv",
        }
    }

    /// All eight partitions of a category.
    pub fn all() -> impl Iterator<Item = Partition> {
        OperationKind::iter()
            .flat_map(|kind| Side::iter().map(move |side| Partition::new(kind, side)))
    }
}

/// Directory holding the partitions of one category and stand.
pub fn category_dir(output_dir: &Path, stand: &str, category: UnitCategory) -> PathBuf {
    output_dir.join(stand).join(category.canonical_name())
}

struct PartitionFile {
    path: PathBuf,
    writer: Writer<File>,
}

impl PartitionFile {
    fn open(dir: &Path, partition: Partition) -> Result<Self, ExportError> {
        let path = dir.join(partition.file_name());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ExportError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let writer = WriterBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        Ok(Self { path, writer })
    }
}

/// The eight append-mode partition writers of one export call.
///
/// Files are created on open and never truncated, so rows accumulate across
/// runs. Each row is flushed as soon as it is written.
pub struct PartitionWriters {
    // Indexed by kind, then side
    files: [[PartitionFile; 2]; 4],
}

impl PartitionWriters {
    /// Creates `dir` if needed and opens every partition file for appending.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the directory or a file cannot be created.
    pub fn open(dir: &Path) -> Result<Self, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let open_kind = |kind| -> Result<[PartitionFile; 2], ExportError> {
            Ok([
                PartitionFile::open(dir, Partition::new(kind, Side::Success))?,
                PartitionFile::open(dir, Partition::new(kind, Side::Error))?,
            ])
        };
        Ok(Self {
            files: [
                open_kind(OperationKind::Unit)?,
                open_kind(OperationKind::FeedInTariff)?,
                open_kind(OperationKind::Location)?,
                open_kind(OperationKind::CombinedHeatPower)?,
            ],
        })
    }

    /// Appends a fetched record as one row to the success partition of `kind`.
    pub fn append_record(&mut self, kind: OperationKind, record: &Record) -> Result<(), ExportError> {
        self.write_row(Partition::new(kind, Side::Success), record.values())
    }

    /// Appends a failed identifier to the error partition of `kind`.
    pub fn append_error(&mut self, kind: OperationKind, identifier: &str) -> Result<(), ExportError> {
        self.write_row(Partition::new(kind, Side::Error), [identifier])
    }

    fn file_mut(&mut self, partition: Partition) -> &mut PartitionFile {
        let kind = match partition.kind {
            OperationKind::Unit => 0,
            OperationKind::FeedInTariff => 1,
            OperationKind::Location => 2,
            OperationKind::CombinedHeatPower => 3,
        };
        let side = match partition.side {
            Side::Success => 0,
            Side::Error => 1,
        };
        &mut self.files[kind][side]
    }

    fn write_row<'a>(
        &mut self,
        partition: Partition,
        fields: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ExportError> {
        let file = self.file_mut(partition);
        let written = match file.writer.write_record(fields) {
            Ok(()) => file.writer.flush().map_err(csv::Error::from),
            Err(e) => Err(e),
        };
        written.map_err(|source| ExportError::Write {
            path: file.path.display().to_string(),
            source,
        })
    }
}

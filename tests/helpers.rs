// Shared test helpers: a scripted registry client and output file readers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mastr_export::registry::{Operation, Record};
use mastr_export::{FetchError, OperationKind, RegistryClient};

/// Registry client answering from a fixed table of records keyed by target
/// identifier. Unknown identifiers fail with a SOAP fault. Every call is logged.
#[derive(Default)]
pub struct FakeClient {
    records: HashMap<String, Record>,
    calls: RefCell<Vec<(Operation, String)>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record served for `target`.
    pub fn with_record(mut self, target: &str, record: Record) -> Self {
        self.records.insert(target.to_string(), record);
        self
    }

    /// Registers a unit record carrying the given cross-references.
    pub fn with_unit(
        self,
        unit: &str,
        eeg: Option<&str>,
        location: Option<&str>,
        chp: Option<&str>,
    ) -> Self {
        let mut record = Record::new()
            .with("EinheitMastrNummer", unit)
            .with("Bruttoleistung", "1500");
        if let Some(eeg) = eeg {
            record.push("EegMastrNummer", eeg);
        }
        if let Some(location) = location {
            record.push("LokationMastrNummer", location);
        }
        if let Some(chp) = chp {
            record.push("KwkMastrNummer", chp);
        }
        self.with_record(unit, record)
    }

    /// Registers a minimal dependent record for `target`.
    pub fn with_detail(self, target: &str) -> Self {
        let record = Record::new()
            .with("MastrNummer", target)
            .with("Registrierungsdatum", "2020-01-01");
        self.with_record(target, record)
    }

    pub fn calls(&self) -> Vec<(Operation, String)> {
        self.calls.borrow().clone()
    }

    /// Targets of all calls of `kind`, in call order.
    pub fn targets(&self, kind: OperationKind) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(op, _)| op.kind == kind)
            .map(|(_, target)| target.clone())
            .collect()
    }
}

impl RegistryClient for FakeClient {
    async fn fetch(&self, operation: Operation, target: &str) -> Result<Record, FetchError> {
        self.calls
            .borrow_mut()
            .push((operation, target.to_string()));
        self.records
            .get(target)
            .cloned()
            .ok_or_else(|| FetchError::Fault(format!("{target} not found")))
    }
}

/// Lines of an output file, or `None` if the file does not exist.
#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Option<Vec<String>> {
    std::fs::read_to_string(path)
        .ok()
        .map(|content| content.lines().map(str::to_string).collect())
}

/// All files below `dir`, sorted.
#[allow(dead_code)]
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

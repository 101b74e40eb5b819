//! Removal of partitions that never received a row.

use std::path::Path;

use walkdir::WalkDir;

use crate::error_handling::ExportError;

/// Deletes every zero-byte file below `dir` and returns how many were removed.
///
/// A missing `dir` is not an error; there is nothing to clean.
pub fn remove_empty_files(dir: &Path) -> Result<usize, ExportError> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| ExportError::Io {
            path: dir.display().to_string(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let len = entry
            .metadata()
            .map_err(|e| ExportError::Io {
                path: path.display().to_string(),
                source: e.into(),
            })?
            .len();
        if len == 0 {
            std::fs::remove_file(path).map_err(|source| ExportError::Io {
                path: path.display().to_string(),
                source,
            })?;
            log::debug!("Removed empty partition {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

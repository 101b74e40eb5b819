//! Worklist sources: the master listing and identifier files.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::{
    FIELD_SEPARATOR, LISTING_CATEGORY_COLUMN, LISTING_FILE_SUFFIX, LISTING_IDENTIFIER_COLUMN,
};
use crate::error_handling::ListingError;
use crate::registry::UnitCategory;

/// Path of the master listing for `stand`.
pub fn listing_path(listing_dir: &Path, stand: &str) -> PathBuf {
    listing_dir.join(format!("{stand}{LISTING_FILE_SUFFIX}"))
}

/// Reads the identifiers of all units of `category` from the master listing.
///
/// The listing is `;`-separated with a header row. Rows whose `Einheittyp`
/// equals the category's canonical name contribute their `EinheitMastrNummer`,
/// in file order. Other columns are ignored.
///
/// # Errors
///
/// Returns a [`ListingError`] if the file cannot be opened, lacks one of the
/// two columns, or contains an unparsable row.
pub fn read_master_listing(path: &Path, category: UnitCategory) -> Result<Vec<String>, ListingError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| ListingError::Open {
        path: display.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| ListingError::Parse {
            path: display.clone(),
            source,
        })?
        .clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim().trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| ListingError::MissingColumn {
                path: display.clone(),
                column: name,
            })
    };
    let category_idx = column(LISTING_CATEGORY_COLUMN)?;
    let identifier_idx = column(LISTING_IDENTIFIER_COLUMN)?;

    let wanted = category.canonical_name();
    let mut identifiers = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| ListingError::Parse {
            path: display.clone(),
            source,
        })?;
        if row.get(category_idx).map(str::trim) != Some(wanted) {
            continue;
        }
        if let Some(id) = row.get(identifier_idx).map(str::trim) {
            if !id.is_empty() {
                identifiers.push(id.to_string());
            }
        }
    }

    log::info!(
        "Master listing {} has {} {} units",
        display,
        identifiers.len(),
        wanted
    );
    Ok(identifiers)
}

/// Reads one identifier per line, skipping blank lines and `#` comments.
pub fn read_identifier_file(path: &Path) -> Result<Vec<String>, ListingError> {
    let content = std::fs::read_to_string(path).map_err(|source| ListingError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }

    #[test]
    fn test_listing_path() {
        assert_eq!(
            listing_path(Path::new("/data"), "2024-01-31"),
            PathBuf::from("/data/2024-01-31_alleEinheiten.csv")
        );
    }

    #[test]
    fn test_filters_by_category_in_file_order() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_file(
            &dir,
            "s_alleEinheiten.csv",
            "EinheitMastrNummer;Name;Einheittyp\n\
             SEE3;C;Windeinheit\n\
             SEE1;A;Solareinheit\n\
             SEE2;B;Windeinheit\n",
        );
        let ids = read_master_listing(&path, UnitCategory::Wind).expect("listing should read");
        assert_eq!(ids, ["SEE3", "SEE2"]);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_file(&dir, "s_alleEinheiten.csv", "Nummer;Einheittyp\nSEE1;Wasser\n");
        let err = read_master_listing(&path, UnitCategory::Hydro).unwrap_err();
        assert!(matches!(
            err,
            ListingError::MissingColumn {
                column: "EinheitMastrNummer",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = read_master_listing(&dir.path().join("nope.csv"), UnitCategory::Hydro)
            .unwrap_err();
        assert!(matches!(err, ListingError::Open { .. }));
    }

    #[test]
    fn test_identifier_file_skips_comments_and_blanks() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_file(&dir, "ids.txt", "# units\nSEE1\n\n  SEE2  \n#SEE3\n");
        assert_eq!(
            read_identifier_file(&path).expect("file should read"),
            ["SEE1", "SEE2"]
        );
    }
}

//! Tests for the per-category export loop.

use std::collections::BTreeSet;
use std::path::Path;

use mastr_export::export::category_dir;
use mastr_export::{ExportError, ExportRequest, Exporter, OperationKind, Outcome, UnitCategory};
use strum::IntoEnumIterator;
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{list_files, read_lines, FakeClient};

const STAND: &str = "2024-01-31";

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn exporter(client: FakeClient, root: &Path) -> Exporter<FakeClient> {
    Exporter::new(client, root.join("listing"), root.join("out"))
}

#[tokio::test]
async fn test_unit_failure_and_dependent_success() {
    // U1 succeeds with EEG reference E1, U2's unit fetch fails
    let dir = TempDir::new().expect("Failed to create temp dir");
    let client = FakeClient::new()
        .with_unit("U1", Some("E1"), None, None)
        .with_detail("E1");
    let exporter = exporter(client, dir.path());
    let request = ExportRequest::new(UnitCategory::Wind, STAND)
        .with_identifiers(ids(&["U1", "U2"]))
        .with_kinds(vec![OperationKind::Unit, OperationKind::FeedInTariff]);

    let report = exporter.export(&request).await.expect("export should succeed");
    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Wind);

    let units = read_lines(&out.join("Einheiten.csv")).expect("unit partition should exist");
    assert_eq!(units, ["U1;1500;E1"]);
    assert_eq!(
        read_lines(&out.join("ErrorEinheiten.csv")),
        Some(vec!["U2".to_string()])
    );
    assert_eq!(
        read_lines(&out.join("EegAnlagen.csv")),
        Some(vec!["E1;2020-01-01".to_string()])
    );
    assert!(!out.join("ErrorEegAnlagen.csv").exists());

    // U2 never reached the dependent fetches
    assert_eq!(
        exporter.client().targets(OperationKind::FeedInTariff),
        ["E1"]
    );
    assert_eq!(report.processed, 2);
    assert_eq!(report.stats.count(OperationKind::Unit, Outcome::Succeeded), 1);
    assert_eq!(report.stats.count(OperationKind::Unit, Outcome::Failed), 1);
}

#[tokio::test]
async fn test_unit_only_request_leaves_only_unit_partitions() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let client = FakeClient::new()
        .with_unit("U1", Some("E1"), Some("L1"), Some("K1"))
        .with_detail("E1")
        .with_detail("L1")
        .with_detail("K1");
    let exporter = exporter(client, dir.path());
    let request = ExportRequest::new(UnitCategory::Biomass, STAND)
        .with_identifiers(ids(&["U1", "U2"]))
        .with_kinds(vec![OperationKind::Unit]);

    let report = exporter.export(&request).await.expect("export should succeed");
    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Biomass);

    let files: Vec<String> = list_files(&out)
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(files, ["Einheiten.csv", "ErrorEinheiten.csv"]);
    assert_eq!(report.removed_files, 6);

    // The unit fetch is the only kind attempted
    for (operation, _) in exporter.client().calls() {
        assert_eq!(operation.kind, OperationKind::Unit);
    }
}

#[tokio::test]
async fn test_attempted_kinds_follow_category_support() {
    for category in UnitCategory::iter() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let client = FakeClient::new()
            .with_unit("U1", Some("E1"), Some("L1"), Some("K1"))
            .with_detail("E1")
            .with_detail("L1")
            .with_detail("K1");
        let exporter = exporter(client, dir.path());
        let request = ExportRequest::new(category, STAND).with_identifiers(ids(&["U1"]));

        exporter.export(&request).await.expect("export should succeed");

        let attempted: BTreeSet<OperationKind> = exporter
            .client()
            .calls()
            .iter()
            .map(|(op, _)| op.kind)
            .collect();

        let mut expected = BTreeSet::from([OperationKind::Unit]);
        if matches!(
            category,
            UnitCategory::Wind
                | UnitCategory::Solar
                | UnitCategory::Biomass
                | UnitCategory::Hydro
                | UnitCategory::Geothermal
        ) {
            expected.insert(OperationKind::FeedInTariff);
        }
        if !matches!(category, UnitCategory::Nuclear | UnitCategory::GasStorage) {
            expected.insert(OperationKind::Location);
        }
        if category == UnitCategory::Biomass {
            expected.insert(OperationKind::CombinedHeatPower);
        }
        assert_eq!(attempted, expected, "attempted kinds for {category}");
    }
}

#[tokio::test]
async fn test_dependent_failure_does_not_affect_other_dependents() {
    // E1 is unknown to the registry; L1 and K1 resolve
    let dir = TempDir::new().expect("Failed to create temp dir");
    let client = FakeClient::new()
        .with_unit("U1", Some("E1"), Some("L1"), Some("K1"))
        .with_detail("L1")
        .with_detail("K1");
    let exporter = exporter(client, dir.path());
    let request = ExportRequest::new(UnitCategory::Biomass, STAND).with_identifiers(ids(&["U1"]));

    let report = exporter.export(&request).await.expect("export should succeed");
    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Biomass);

    assert_eq!(
        read_lines(&out.join("ErrorEegAnlagen.csv")),
        Some(vec!["E1".to_string()])
    );
    assert!(!out.join("EegAnlagen.csv").exists());
    assert_eq!(read_lines(&out.join("Lokationen.csv")).map(|l| l.len()), Some(1));
    assert_eq!(read_lines(&out.join("KwkAnlagen.csv")).map(|l| l.len()), Some(1));
    assert_eq!(
        report.stats.count(OperationKind::FeedInTariff, Outcome::Failed),
        1
    );
    assert_eq!(
        report
            .stats
            .count(OperationKind::CombinedHeatPower, Outcome::Succeeded),
        1
    );
}

#[tokio::test]
async fn test_max_rows_limits_worklist_in_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let exporter = exporter(FakeClient::new(), dir.path());
    let worklist = ids(&["U1", "U2", "U3", "U4", "U5"]);

    let request = ExportRequest::new(UnitCategory::Nuclear, STAND)
        .with_identifiers(worklist.clone())
        .with_max_rows(Some(3));
    let report = exporter.export(&request).await.expect("export should succeed");
    assert_eq!(report.processed, 3);
    assert_eq!(report.worklist_len, 5);
    assert_eq!(exporter.client().targets(OperationKind::Unit), ["U1", "U2", "U3"]);
}

#[tokio::test]
async fn test_max_rows_beyond_worklist_is_clamped() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let exporter = exporter(FakeClient::new(), dir.path());
    let request = ExportRequest::new(UnitCategory::GasStorage, STAND)
        .with_identifiers(ids(&["U1", "U2"]))
        .with_max_rows(Some(10));

    let report = exporter.export(&request).await.expect("export should succeed");
    assert_eq!(report.processed, 2);
    assert_eq!(exporter.client().targets(OperationKind::Unit), ["U1", "U2"]);
}

#[tokio::test]
async fn test_missing_cross_reference_is_skipped() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let client = FakeClient::new()
        .with_unit("U1", None, Some("L1"), None)
        .with_detail("L1");
    let exporter = exporter(client, dir.path());
    let request = ExportRequest::new(UnitCategory::Solar, STAND).with_identifiers(ids(&["U1"]));

    let report = exporter.export(&request).await.expect("export should succeed");
    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Solar);

    assert!(exporter.client().targets(OperationKind::FeedInTariff).is_empty());
    assert!(!out.join("ErrorEegAnlagen.csv").exists());
    assert_eq!(
        report.stats.count(OperationKind::FeedInTariff, Outcome::Skipped),
        1
    );
    assert_eq!(read_lines(&out.join("Lokationen.csv")).map(|l| l.len()), Some(1));
}

#[tokio::test]
async fn test_no_empty_files_remain() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let client = FakeClient::new().with_unit("U1", Some("E1"), Some("L1"), None);
    let exporter = exporter(client, dir.path());
    let request =
        ExportRequest::new(UnitCategory::Hydro, STAND).with_identifiers(ids(&["U1", "U2"]));

    exporter.export(&request).await.expect("export should succeed");

    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Hydro);
    let files = list_files(&out);
    assert!(!files.is_empty());
    for file in files {
        let len = std::fs::metadata(&file).expect("metadata").len();
        assert!(len > 0, "{} is empty", file.display());
    }
}

#[tokio::test]
async fn test_repeated_runs_append_rows() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let client = FakeClient::new().with_unit("U1", None, None, None);
    let exporter = exporter(client, dir.path());
    let request = ExportRequest::new(UnitCategory::Nuclear, STAND).with_identifiers(ids(&["U1"]));

    exporter.export(&request).await.expect("first export should succeed");
    exporter.export(&request).await.expect("second export should succeed");

    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Nuclear);
    assert_eq!(
        read_lines(&out.join("Einheiten.csv")),
        Some(vec!["U1;1500".to_string(), "U1;1500".to_string()])
    );
}

#[tokio::test]
async fn test_worklist_from_master_listing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let listing_dir = dir.path().join("listing");
    std::fs::create_dir_all(&listing_dir).expect("Failed to create listing dir");
    std::fs::write(
        listing_dir.join(format!("{STAND}_alleEinheiten.csv")),
        "EinheitMastrNummer;Einheittyp;Bruttoleistung\n\
         SEE1;Verbrennung;100\n\
         SEE2;Windeinheit;3000\n\
         SEE3;Verbrennung;250\n",
    )
    .expect("Failed to write listing");

    let exporter = exporter(FakeClient::new(), dir.path());
    let request = ExportRequest::new(UnitCategory::Combustion, STAND);

    let report = exporter.export(&request).await.expect("export should succeed");
    assert_eq!(report.worklist_len, 2);
    assert_eq!(exporter.client().targets(OperationKind::Unit), ["SEE1", "SEE3"]);

    let out = category_dir(&dir.path().join("out"), STAND, UnitCategory::Combustion);
    assert_eq!(
        read_lines(&out.join("ErrorEinheiten.csv")),
        Some(vec!["SEE1".to_string(), "SEE3".to_string()])
    );
}

#[tokio::test]
async fn test_missing_master_listing_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let exporter = exporter(FakeClient::new(), dir.path());
    let request = ExportRequest::new(UnitCategory::Wind, STAND);

    let err = exporter.export(&request).await.unwrap_err();
    assert!(matches!(err, ExportError::Listing(_)));
    assert!(exporter.client().calls().is_empty());
}

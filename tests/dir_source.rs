use std::fs;

use sd_enrollment::fetch::header_skip;
use sd_enrollment::files::{resolve_filename, FileCategory};
use sd_enrollment::source::{DirSource, SheetSource};

#[test]
fn dir_source_falls_back_to_csv_mirrors() {
    let dir = tempfile::tempdir().unwrap();

    // Mirror the 2024 roster as a CSV conversion under the published stem,
    // with the banner row the real file carries.
    let name = resolve_filename(2024, FileCategory::District)
        .unwrap()
        .unwrap();
    assert_eq!(name, "District_Enrollment_2023-24.xlsx");
    let csv_name = name.replace(".xlsx", ".csv");
    fs::write(
        dir.path().join(csv_name),
        "Fall 2023 Enrollment,,\nDistrictNumber,DistrictName,Total\n00101,Aberdeen 06-1,3500\n",
    )
    .unwrap();

    let source = DirSource::new(dir.path());
    let skip = header_skip(2024, FileCategory::District);
    let sheet = source
        .fetch(2024, FileCategory::District, skip)
        .unwrap()
        .unwrap();

    assert_eq!(sheet.headers(), &["DistrictNumber", "DistrictName", "Total"]);
    assert_eq!(sheet.row_count(), 1);
    assert_eq!(sheet.cell(0, 1), "Aberdeen 06-1");
}

#[test]
fn dir_source_reports_unpublished_categories_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(dir.path());
    let got = source.fetch(2006, FileCategory::SchoolRace, 0).unwrap();
    assert!(got.is_none());
}

#[test]
fn dir_source_errors_on_missing_published_files() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(dir.path());
    let err = source.fetch(2024, FileCategory::District, 1).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

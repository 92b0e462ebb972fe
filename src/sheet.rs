//! Sheet decoding: workbook or CSV bytes into a [`RawSheet`] of text cells.
//!
//! This is the thin boundary over binary parsing. Callers supply the number of
//! leading banner rows to skip (looked up per year in [`crate::fetch`]); the
//! first non-empty row after the skip is taken as the header row, everything
//! below it as data. All cells are decoded to text; numeric interpretation
//! happens later in [`crate::normalize`].

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader};

use crate::error::{EnrollmentError, EnrollmentResult};
use crate::types::RawSheet;

/// Read the first worksheet of a workbook file into a [`RawSheet`].
pub fn read_workbook_path(path: impl AsRef<Path>, skip_rows: usize) -> EnrollmentResult<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = first_sheet_name(workbook.sheet_names().to_vec())?;
    let range = workbook.worksheet_range(&sheet)?;
    sheet_from_range(&range, skip_rows)
}

/// Read the first worksheet of an in-memory workbook (e.g. a downloaded body).
pub fn read_workbook_bytes(bytes: &[u8], skip_rows: usize) -> EnrollmentResult<RawSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let sheet = first_sheet_name(workbook.sheet_names().to_vec())?;
    let range = workbook.worksheet_range(&sheet)?;
    sheet_from_range(&range, skip_rows)
}

/// Read CSV data into a [`RawSheet`] (used for locally mirrored sources).
pub fn read_csv_reader<R: Read>(reader: R, skip_rows: usize) -> EnrollmentResult<RawSheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    sheet_from_text_rows(rows, skip_rows)
}

/// Read a CSV file into a [`RawSheet`].
pub fn read_csv_path(path: impl AsRef<Path>, skip_rows: usize) -> EnrollmentResult<RawSheet> {
    let file = std::fs::File::open(path)?;
    read_csv_reader(file, skip_rows)
}

fn first_sheet_name(names: Vec<String>) -> EnrollmentResult<String> {
    names
        .into_iter()
        .next()
        .ok_or_else(|| EnrollmentError::MalformedSheet {
            message: "workbook has no sheets".to_string(),
        })
}

fn sheet_from_range(
    range: &calamine::Range<Data>,
    skip_rows: usize,
) -> EnrollmentResult<RawSheet> {
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();
    sheet_from_text_rows(rows, skip_rows)
}

fn sheet_from_text_rows(
    rows: Vec<Vec<String>>,
    skip_rows: usize,
) -> EnrollmentResult<RawSheet> {
    let mut remaining = rows.into_iter().skip(skip_rows);

    // First non-empty row after the skip is the header row.
    let headers = remaining
        .by_ref()
        .find(|row| row.iter().any(|c| !c.trim().is_empty()))
        .ok_or_else(|| EnrollmentError::MalformedSheet {
            message: "sheet has no non-empty rows after skipping banners".to_string(),
        })?;

    let data = remaining
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .collect();

    Ok(RawSheet::new(headers, data))
}

fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::read_csv_reader;

    #[test]
    fn skips_banner_rows_and_blank_lines() {
        let input = "Fall Enrollment Report,,\n,,\nDistrictNumber,DistrictName,Total\n00101,Aberdeen,100\n,,\n00202,Brookings,200\n";
        let sheet = read_csv_reader(input.as_bytes(), 1).unwrap();
        assert_eq!(
            sheet.headers(),
            &["DistrictNumber", "DistrictName", "Total"]
        );
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(1, 1), "Brookings");
    }

    #[test]
    fn ragged_rows_read_as_empty_cells() {
        let input = "A,B,C\n1,2\n";
        let sheet = read_csv_reader(input.as_bytes(), 0).unwrap();
        assert_eq!(sheet.cell(0, 2), "");
    }

    #[test]
    fn empty_input_is_a_malformed_sheet() {
        let err = read_csv_reader("".as_bytes(), 0).unwrap_err();
        assert!(err.to_string().contains("malformed sheet"));
    }
}

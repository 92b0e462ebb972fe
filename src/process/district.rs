//! District roster sheet → canonical wide rows.
//!
//! Column resolution is two-tier: alias-table lookup first, then a declared
//! positional heuristic when no alias matches (the oldest exports shipped with
//! one-off header spellings nobody catalogued). The heuristics are the ones
//! the sheets support: district numbers are the first column of digit strings,
//! district names the second column carrying alphabetic text.

use crate::columns::{
    self, DISTRICT_ID_ALIASES, DISTRICT_NAME_ALIASES, DISTRICT_TYPE_CODE_ALIASES,
    DISTRICT_TYPE_NAME_ALIASES, TOTAL_ALIASES,
};
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::normalize::normalize_count;
use crate::types::{Grade, Level, RawSheet, WideRow};

use super::{add_opt, digits, is_marker_name, zero_pad};

/// Map one raw district sheet into wide rows, one per district.
///
/// Rows whose id cannot be resolved and rows whose name looks like a leaked
/// header or subtotal line are dropped. `row_total` comes from an explicit
/// total column when one resolves, otherwise from summing the grade columns.
pub fn process_district(sheet: &RawSheet, end_year: i32) -> EnrollmentResult<Vec<WideRow>> {
    let headers = sheet.headers();

    let id_col = columns::find_header(headers, DISTRICT_ID_ALIASES)
        .or_else(|| detect_id_column(sheet))
        .ok_or_else(|| EnrollmentError::MalformedSheet {
            message: format!("district id column not found in {end_year} roster"),
        })?;
    let name_col = columns::find_header(headers, DISTRICT_NAME_ALIASES)
        .or_else(|| detect_name_column(sheet));
    let type_code_col = columns::find_header(headers, DISTRICT_TYPE_CODE_ALIASES);
    let type_name_col = columns::find_header(headers, DISTRICT_TYPE_NAME_ALIASES);
    let total_col = columns::find_header(headers, TOTAL_ALIASES);
    let grade_cols: Vec<(Grade, usize)> = Grade::ALL
        .into_iter()
        .filter_map(|g| columns::find_header(headers, columns::grade_aliases(g)).map(|c| (g, c)))
        .collect();

    let mut out = Vec::new();
    for r in 0..sheet.row_count() {
        let id_digits = digits(sheet.cell(r, id_col));
        if id_digits.is_empty() {
            continue;
        }

        let name = name_col
            .map(|c| sheet.cell(r, c).trim().to_string())
            .filter(|s| !s.is_empty());
        if name.as_deref().is_some_and(is_marker_name) {
            continue;
        }

        let mut row = WideRow::new(end_year, Level::District);
        row.district_id = Some(zero_pad(&id_digits, 5));
        row.district_name = name;
        row.district_type_code = cell_opt(sheet, r, type_code_col);
        row.district_type_name = cell_opt(sheet, r, type_name_col);

        for &(grade, col) in &grade_cols {
            *row.grade_mut(grade) = normalize_count(sheet.cell(r, col));
        }

        row.row_total = match total_col {
            Some(c) => normalize_count(sheet.cell(r, c)),
            None => Grade::ALL
                .into_iter()
                .fold(None, |acc, g| add_opt(acc, row.grade(g))),
        };

        out.push(row);
    }
    Ok(out)
}

fn cell_opt(sheet: &RawSheet, row: usize, col: Option<usize>) -> Option<String> {
    col.map(|c| sheet.cell(row, c).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First column whose first five non-empty values are all digit strings.
fn detect_id_column(sheet: &RawSheet) -> Option<usize> {
    (0..sheet.headers().len()).find(|&col| {
        let values: Vec<&str> = sheet
            .column(col)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .take(5)
            .collect();
        !values.is_empty()
            && values
                .iter()
                .all(|v| v.chars().all(|c| c.is_ascii_digit()))
    })
}

/// Second column carrying alphabetic text (the first is usually a county or
/// type label on the sheets that need this fallback). Falls back to the first
/// lettered column when only one exists.
fn detect_name_column(sheet: &RawSheet) -> Option<usize> {
    let lettered: Vec<usize> = (0..sheet.headers().len())
        .filter(|&col| {
            sheet
                .column(col)
                .take(10)
                .any(|v| v.chars().any(|c| c.is_ascii_alphabetic()))
        })
        .collect();
    lettered.get(1).or_else(|| lettered.first()).copied()
}

#[cfg(test)]
mod tests {
    use super::process_district;
    use crate::types::{Grade, Level, RawSheet};

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> RawSheet {
        RawSheet::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn maps_aliased_columns_and_pads_ids() {
        let s = sheet(
            &["District Number", "District Name", "K", "1", "Total"],
            &[
                &["101", "Aberdeen 06-1", "50", "60", "110"],
                &["61", "Brookings 05-1", "40", "30", "70"],
            ],
        );
        let rows = process_district(&s, 2020).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].district_id.as_deref(), Some("00101"));
        assert_eq!(rows[1].district_id.as_deref(), Some("00061"));
        assert_eq!(rows[0].level, Level::District);
        assert_eq!(rows[0].grade(Grade::K), Some(50));
        assert_eq!(rows[0].row_total, Some(110));
    }

    #[test]
    fn derives_total_from_grades_when_no_total_column() {
        let s = sheet(
            &["DistrictNumber", "DistrictName", "K", "1"],
            &[&["00101", "Aberdeen", "50", "60"]],
        );
        let rows = process_district(&s, 2020).unwrap();
        assert_eq!(rows[0].row_total, Some(110));
    }

    #[test]
    fn drops_marker_and_idless_rows() {
        let s = sheet(
            &["DistrictNumber", "DistrictName", "Total"],
            &[
                &["", "District Name", ""],
                &["00101", "Aberdeen", "100"],
                &["99999", "State Total", "100000"],
                &["n/a", "Orphan", "5"],
            ],
        );
        let rows = process_district(&s, 2020).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district_name.as_deref(), Some("Aberdeen"));
    }

    #[test]
    fn falls_back_to_positional_heuristics() {
        // Headers match no alias; id is the first all-digit column, name the
        // second lettered column.
        let s = sheet(
            &["Col A", "Col B", "Col C", "Col D"],
            &[
                &["Brown", "00101", "Aberdeen", "100"],
                &["Kingsbury", "00061", "Brookings", "200"],
            ],
        );
        let rows = process_district(&s, 2009).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].district_id.as_deref(), Some("00101"));
        assert_eq!(rows[0].district_name.as_deref(), Some("Aberdeen"));
    }

    #[test]
    fn suppressed_grade_counts_stay_missing() {
        let s = sheet(
            &["DistrictNumber", "DistrictName", "K", "1"],
            &[&["00101", "Aberdeen", "*", "60"]],
        );
        let rows = process_district(&s, 2020).unwrap();
        assert_eq!(rows[0].grade(Grade::K), None);
        // Missing does not poison the derived total.
        assert_eq!(rows[0].row_total, Some(60));
    }

    #[test]
    fn missing_id_column_is_malformed() {
        let s = sheet(&["Name", "Notes"], &[&["Aberdeen", "x"]]);
        assert!(process_district(&s, 2020).is_err());
    }
}

//! Wide-to-tidy pivot.
//!
//! Each wide row fans out into one fact row per (grade level, subgroup)
//! combination the schema carries: the overall total, the fifteen grade
//! levels, the seven race categories, and the two genders. Race and gender
//! rows are emitted even when their counts are missing so schema density is
//! uniform across years.

use crate::types::{Grade, Level, Subgroup, TidyRow, WideRow};

/// Grade-level code for rows that are not grade breakdowns.
pub const GRADE_TOTAL: &str = "TOTAL";

/// Pivot a combined wide table into tidy fact rows.
///
/// Pure and stateless: tidying the same table twice yields identical output,
/// and regenerating from cached wide rows is always safe.
pub fn tidy(wide_rows: &[WideRow]) -> Vec<TidyRow> {
    let mut out = Vec::with_capacity(wide_rows.len() * 25);
    for row in wide_rows {
        emit_location(row, &mut out);
    }
    out
}

fn emit_location(row: &WideRow, out: &mut Vec<TidyRow>) {
    // Denominator for every fact at this location: its total enrollment,
    // computed once and reused.
    let denom = row.row_total;

    out.push(fact(row, GRADE_TOTAL, Subgroup::TotalEnrollment, row.row_total, denom));
    for grade in Grade::ALL {
        out.push(fact(
            row,
            grade.code(),
            Subgroup::TotalEnrollment,
            row.grade(grade),
            denom,
        ));
    }
    for subgroup in Subgroup::RACES.into_iter().chain(Subgroup::GENDERS) {
        out.push(fact(
            row,
            GRADE_TOTAL,
            subgroup,
            row.demographic(subgroup),
            denom,
        ));
    }
}

fn fact(
    row: &WideRow,
    grade_level: &str,
    subgroup: Subgroup,
    n_students: Option<i64>,
    denom: Option<i64>,
) -> TidyRow {
    TidyRow {
        end_year: row.end_year,
        district_id: row.district_id.clone(),
        campus_id: row.campus_id.clone(),
        district_name: row.district_name.clone(),
        campus_name: row.campus_name.clone(),
        level: row.level,
        grade_level: grade_level.to_string(),
        subgroup: subgroup.as_str().to_string(),
        n_students,
        pct: pct_of(n_students, denom),
        is_state: row.level == Level::State,
        is_district: row.level == Level::District,
        is_campus: row.level == Level::Campus,
        is_public: is_public(row),
    }
}

/// Share of the denominator, missing when either side is missing or the
/// denominator is zero. Guarantees a NaN/inf-free output.
fn pct_of(n: Option<i64>, denom: Option<i64>) -> Option<f64> {
    match (n, denom) {
        (Some(n), Some(d)) if d != 0 => Some(n as f64 / d as f64),
        _ => None,
    }
}

/// Public unless the district-type code or description marks a non-public
/// designation.
fn is_public(row: &WideRow) -> bool {
    let code_nonpublic = matches!(
        row.district_type_code.as_deref().map(str::trim),
        Some("NP") | Some("09")
    );
    let name_nonpublic = row
        .district_type_name
        .as_deref()
        .map(|n| {
            let lower = n.to_ascii_lowercase();
            lower.contains("non-public") || lower.contains("nonpublic") || lower.contains("private")
        })
        .unwrap_or(false);
    !(code_nonpublic || name_nonpublic)
}

//! School-level sheets → canonical wide rows.
//!
//! The race sheet arrives in long form: one row per school per race category,
//! each carrying that category's total. This is the one genuine
//! reshape-with-aggregation step in the pipeline: rows are grouped by a
//! composite school key, summed per race category, and gender counts from the
//! companion sheet are joined on by the same key.

use std::collections::BTreeMap;

use crate::columns::{
    self, DISTRICT_ID_ALIASES, DISTRICT_NAME_ALIASES, GENDER_LABEL_ALIASES, RACE_LABEL_ALIASES,
    SCHOOL_ID_ALIASES, SCHOOL_NAME_ALIASES, TOTAL_ALIASES,
};
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::normalize::normalize_count;
use crate::types::{Grade, Level, RawSheet, Subgroup, WideRow};

use super::{add_opt, digits, is_marker_name, zero_pad};

/// Composite key joining the per-school race and gender source rows.
///
/// Keyed by school number when it resolves; by school name otherwise. The
/// name fallback keeps fragmented rows joinable even on eras that dropped the
/// number column, at the cost of an ungenerated campus id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SchoolPart {
    Id(String),
    Name(String),
}

type CampusKey = (String, SchoolPart);

/// Aggregate the long-form race sheet (and optionally the gender sheet) into
/// one wide row per school.
pub fn process_campus(
    race: &RawSheet,
    gender: Option<&RawSheet>,
    end_year: i32,
) -> EnrollmentResult<Vec<WideRow>> {
    let cols = SchoolColumns::resolve(race, "race", RACE_LABEL_ALIASES, end_year)?;

    let mut groups: BTreeMap<CampusKey, WideRow> = BTreeMap::new();
    for r in 0..race.row_count() {
        let Some((key, district_id)) = cols.key_for_row(race, r) else {
            continue;
        };

        let row_total = normalize_count(race.cell(r, cols.total));
        let label = race.cell(r, cols.label);

        let entry = groups.entry(key.clone()).or_insert_with(|| {
            let mut row = WideRow::new(end_year, Level::Campus);
            row.district_id = Some(district_id.clone());
            row.district_name = cols.district_name_for_row(race, r);
            row.campus_name = cols.school_name_for_row(race, r);
            if let SchoolPart::Id(school) = &key.1 {
                row.campus_id = Some(format!("{district_id}{school}"));
            }
            row
        });

        entry.row_total = add_opt(entry.row_total, row_total);
        if let Some(subgroup) = columns::race_for_label(label) {
            let slot = entry.demographic_mut(subgroup);
            *slot = add_opt(*slot, row_total);
        }
        for &(grade, col) in &cols.grades {
            let slot = entry.grade_mut(grade);
            *slot = add_opt(*slot, normalize_count(race.cell(r, col)));
        }
    }

    if let Some(gender_sheet) = gender {
        let sums = gender_sums(gender_sheet, end_year)?;
        for (key, row) in groups.iter_mut() {
            if let Some((male, female)) = sums.get(key) {
                row.male = *male;
                row.female = *female;
            }
        }
    }

    Ok(groups.into_values().collect())
}

/// Group the gender sheet by the same campus key and sum male/female counts.
fn gender_sums(
    sheet: &RawSheet,
    end_year: i32,
) -> EnrollmentResult<BTreeMap<CampusKey, (Option<i64>, Option<i64>)>> {
    let cols = SchoolColumns::resolve(sheet, "gender", GENDER_LABEL_ALIASES, end_year)?;

    let mut sums: BTreeMap<CampusKey, (Option<i64>, Option<i64>)> = BTreeMap::new();
    for r in 0..sheet.row_count() {
        let Some((key, _)) = cols.key_for_row(sheet, r) else {
            continue;
        };
        let count = normalize_count(sheet.cell(r, cols.total));
        let entry = sums.entry(key).or_insert((None, None));
        match columns::gender_for_label(sheet.cell(r, cols.label)) {
            Some(Subgroup::Male) => entry.0 = add_opt(entry.0, count),
            Some(Subgroup::Female) => entry.1 = add_opt(entry.1, count),
            _ => {}
        }
    }
    Ok(sums)
}

/// Resolved column layout shared by the race and gender sheets.
struct SchoolColumns {
    district_id: usize,
    district_name: Option<usize>,
    school_id: Option<usize>,
    school_name: Option<usize>,
    /// Category-label column (race or gender value strings).
    label: usize,
    total: usize,
    grades: Vec<(Grade, usize)>,
}

impl SchoolColumns {
    fn resolve(
        sheet: &RawSheet,
        kind: &str,
        label_aliases: &[&str],
        end_year: i32,
    ) -> EnrollmentResult<Self> {
        let headers = sheet.headers();
        let district_id = columns::find_header(headers, DISTRICT_ID_ALIASES).ok_or_else(|| {
            EnrollmentError::MalformedSheet {
                message: format!("district id column not found in {end_year} school {kind} sheet"),
            }
        })?;
        let label = columns::find_header(headers, label_aliases).ok_or_else(|| {
            EnrollmentError::MalformedSheet {
                message: format!("{kind} label column not found in {end_year} school sheet"),
            }
        })?;
        let total = columns::find_header(headers, TOTAL_ALIASES).ok_or_else(|| {
            EnrollmentError::MalformedSheet {
                message: format!("total column not found in {end_year} school {kind} sheet"),
            }
        })?;

        Ok(Self {
            district_id,
            district_name: columns::find_header(headers, DISTRICT_NAME_ALIASES),
            school_id: columns::find_header(headers, SCHOOL_ID_ALIASES),
            school_name: columns::find_header(headers, SCHOOL_NAME_ALIASES),
            label,
            total,
            grades: Grade::ALL
                .into_iter()
                .filter_map(|g| {
                    columns::find_header(headers, columns::grade_aliases(g)).map(|c| (g, c))
                })
                .collect(),
        })
    }

    /// Build the campus key for one row; `None` drops the row (marker lines,
    /// unresolvable identity).
    fn key_for_row(&self, sheet: &RawSheet, row: usize) -> Option<(CampusKey, String)> {
        let district_digits = digits(sheet.cell(row, self.district_id));
        if district_digits.is_empty() {
            return None;
        }
        let district_id = zero_pad(&district_digits, 5);

        let school_name = self.school_name_for_row(sheet, row);
        if school_name.as_deref().is_some_and(is_marker_name) {
            return None;
        }

        let school_digits = self
            .school_id
            .map(|c| digits(sheet.cell(row, c)))
            .unwrap_or_default();
        let part = if school_digits.is_empty() {
            SchoolPart::Name(school_name?)
        } else {
            SchoolPart::Id(zero_pad(&school_digits, 2))
        };
        Some(((district_id.clone(), part), district_id))
    }

    fn district_name_for_row(&self, sheet: &RawSheet, row: usize) -> Option<String> {
        self.district_name
            .map(|c| sheet.cell(row, c).trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn school_name_for_row(&self, sheet: &RawSheet, row: usize) -> Option<String> {
        self.school_name
            .map(|c| sheet.cell(row, c).trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

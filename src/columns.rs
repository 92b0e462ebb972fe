//! Header and label aliases across source eras.
//!
//! Column-header variance is small compared to the filename churn, so one
//! alias table per sheet category is shared across all years. Each canonical
//! field maps to an ordered list of acceptable raw header strings; matching is
//! case-insensitive equality on the whole header (never substring), tried in
//! declared order, first hit wins.
//!
//! When a required header matches no alias at all, the processors fall back to
//! positional heuristics (see [`crate::process::district`]); that second tier
//! lives with the processors, not here.

use crate::types::{Grade, Subgroup};

// ---- district roster sheets ----

/// District-number column.
pub const DISTRICT_ID_ALIASES: &[&str] = &[
    "DistrictNumber",
    "District Number",
    "District No",
    "Dist Num",
    "CoDist",
];

/// District-name column.
pub const DISTRICT_NAME_ALIASES: &[&str] = &["DistrictName", "District Name", "District"];

/// District-type code column (identifies non-public designations).
pub const DISTRICT_TYPE_CODE_ALIASES: &[&str] = &["DistrictType", "District Type", "Type Code"];

/// District-type description column.
pub const DISTRICT_TYPE_NAME_ALIASES: &[&str] =
    &["DistrictTypeDesc", "District Type Description", "Type"];

/// Explicit row-total column.
pub const TOTAL_ALIASES: &[&str] = &["Total", "Total Enrollment", "All Grades", "Grand Total"];

// ---- school-level sheets ----

/// School-number column.
pub const SCHOOL_ID_ALIASES: &[&str] = &["SchoolNumber", "School Number", "School No", "Sch Num"];

/// School-name column.
pub const SCHOOL_NAME_ALIASES: &[&str] = &["SchoolName", "School Name", "School"];

/// Column holding the race/ethnicity label on the long-form race sheet.
pub const RACE_LABEL_ALIASES: &[&str] = &["Race", "Race/Ethnicity", "RaceEthnicity", "Ethnicity"];

/// Column holding the gender label on the long-form gender sheet.
pub const GENDER_LABEL_ALIASES: &[&str] = &["Gender", "Sex"];

/// Acceptable headers for one grade column.
pub fn grade_aliases(grade: Grade) -> &'static [&'static str] {
    match grade {
        Grade::Pk => &["PK", "Pre-K", "PreK", "Prekindergarten", "Pre Kindergarten"],
        Grade::K => &["K", "KG", "Kindergarten"],
        Grade::G01 => &["1", "01", "Grade 1", "Gr 1"],
        Grade::G02 => &["2", "02", "Grade 2", "Gr 2"],
        Grade::G03 => &["3", "03", "Grade 3", "Gr 3"],
        Grade::G04 => &["4", "04", "Grade 4", "Gr 4"],
        Grade::G05 => &["5", "05", "Grade 5", "Gr 5"],
        Grade::G06 => &["6", "06", "Grade 6", "Gr 6"],
        Grade::G07 => &["7", "07", "Grade 7", "Gr 7"],
        Grade::G08 => &["8", "08", "Grade 8", "Gr 8"],
        Grade::G09 => &["9", "09", "Grade 9", "Gr 9"],
        Grade::G10 => &["10", "Grade 10", "Gr 10"],
        Grade::G11 => &["11", "Grade 11", "Gr 11"],
        Grade::G12 => &["12", "Grade 12", "Gr 12"],
        Grade::Ug => &["UG", "Ungraded", "Un-graded"],
    }
}

/// Raw race-label spellings for one race subgroup.
pub fn race_aliases(subgroup: Subgroup) -> &'static [&'static str] {
    match subgroup {
        Subgroup::White => &["White", "White, Non-Hispanic", "Caucasian"],
        Subgroup::Black => &["Black", "Black or African American", "African American"],
        Subgroup::Hispanic => &["Hispanic", "Hispanic or Latino"],
        Subgroup::Asian => &["Asian", "Asian, Non-Hispanic"],
        Subgroup::NativeAmerican => &[
            "American Indian",
            "American Indian or Alaska Native",
            "American Indian/Alaskan Native",
            "Native American",
        ],
        Subgroup::PacificIslander => &[
            "Native Hawaiian or Other Pacific Islander",
            "Native Hawaiian/Pacific Islander",
            "Pacific Islander",
        ],
        Subgroup::Multiracial => &["Two or More Races", "Two or More", "Multi-Racial", "Multiracial"],
        _ => &[],
    }
}

/// Raw gender-label spellings for one gender subgroup.
pub fn gender_aliases(subgroup: Subgroup) -> &'static [&'static str] {
    match subgroup {
        Subgroup::Male => &["Male", "M"],
        Subgroup::Female => &["Female", "F"],
        _ => &[],
    }
}

/// Resolve a header by alias: case-insensitive whole-string match, alias
/// declaration order, first hit wins. Returns the column index.
pub fn find_header(headers: &[String], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        if let Some(idx) = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias))
        {
            return Some(idx);
        }
    }
    None
}

/// Map a raw race label to its subgroup, if it matches any alias.
pub fn race_for_label(label: &str) -> Option<Subgroup> {
    let label = label.trim();
    Subgroup::RACES
        .into_iter()
        .find(|&s| race_aliases(s).iter().any(|a| label.eq_ignore_ascii_case(a)))
}

/// Map a raw gender label to its subgroup, if it matches any alias.
pub fn gender_for_label(label: &str) -> Option<Subgroup> {
    let label = label.trim();
    Subgroup::GENDERS
        .into_iter()
        .find(|&s| gender_aliases(s).iter().any(|a| label.eq_ignore_ascii_case(a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grade, Subgroup};

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn find_header_is_case_insensitive_whole_string() {
        let h = headers(&["district number", "District", "Total Enrollment"]);
        assert_eq!(find_header(&h, DISTRICT_ID_ALIASES), Some(0));
        assert_eq!(find_header(&h, TOTAL_ALIASES), Some(2));
        // "District" must not match "District Number" by substring.
        assert_eq!(find_header(&h, DISTRICT_NAME_ALIASES), Some(1));
    }

    #[test]
    fn alias_declaration_order_wins() {
        // Both "Total" and "Grand Total" are present; the earlier alias wins.
        let h = headers(&["Grand Total", "Total"]);
        assert_eq!(find_header(&h, TOTAL_ALIASES), Some(1));
    }

    #[test]
    fn unknown_headers_resolve_to_none() {
        let h = headers(&["Enrollment by something else"]);
        assert_eq!(find_header(&h, DISTRICT_ID_ALIASES), None);
        assert_eq!(find_header(&h, grade_aliases(Grade::K)), None);
    }

    #[test]
    fn race_labels_map_across_eras() {
        assert_eq!(race_for_label("White, Non-Hispanic"), Some(Subgroup::White));
        assert_eq!(race_for_label("  two or more races "), Some(Subgroup::Multiracial));
        assert_eq!(
            race_for_label("American Indian/Alaskan Native"),
            Some(Subgroup::NativeAmerican)
        );
        assert_eq!(race_for_label("Unknown"), None);
    }

    #[test]
    fn gender_labels_map_short_and_long_forms() {
        assert_eq!(gender_for_label("M"), Some(Subgroup::Male));
        assert_eq!(gender_for_label("female"), Some(Subgroup::Female));
        assert_eq!(gender_for_label("Nonbinary"), None);
    }
}

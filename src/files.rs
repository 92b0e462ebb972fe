//! Filename and URL resolution for the agency's published enrollment files.
//!
//! The agency has renamed its fall-enrollment downloads repeatedly over two
//! decades. There are three broad naming eras (legacy `Fall{year}_*.xls`
//! exports, a `*Enrollment_{year}.xlsx` middle period, and the current
//! `*_Enrollment_{yyyy-yy}.xlsx` convention), but between 2017 and 2023 almost
//! every category picked up one-off exceptions, so the rules here are written
//! as explicit per-year match arms over range defaults. Every exception is
//! independently testable; none hides inside shared control flow.
//!
//! `resolve_filename` distinguishes three outcomes: a filename, `Ok(None)`
//! when the category was never published for that year (the earliest year has
//! a district roster only), and `UnsupportedYear` outside the catalogued
//! range.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{EnrollmentError, EnrollmentResult};

/// First school end-year with a published district roster.
pub const FIRST_YEAR: i32 = 2006;
/// Most recent school end-year in the catalogue.
pub const LAST_YEAR: i32 = 2025;

/// Directory all enrollment downloads live under.
pub const BASE_URL: &str = "https://doe.sd.gov/ofm/documents/";

/// The four file categories the agency publishes each fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// District roster with per-grade counts.
    District,
    /// School-level enrollment by race/ethnicity (long form).
    SchoolRace,
    /// School-level enrollment by gender (long form).
    SchoolGender,
    /// School-level enrollment by grade.
    SchoolGrade,
}

impl FileCategory {
    /// All categories, in fetch order.
    pub const ALL: [FileCategory; 4] = [
        FileCategory::District,
        FileCategory::SchoolRace,
        FileCategory::SchoolGender,
        FileCategory::SchoolGrade,
    ];
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::District => "district roster",
            FileCategory::SchoolRace => "school-by-race",
            FileCategory::SchoolGender => "school-by-gender",
            FileCategory::SchoolGrade => "school-by-grade",
        };
        f.write_str(s)
    }
}

/// Years for which files exist.
pub fn available_years() -> RangeInclusive<i32> {
    FIRST_YEAR..=LAST_YEAR
}

/// Fail with [`EnrollmentError::UnsupportedYear`] outside the catalogue.
pub fn check_year(end_year: i32) -> EnrollmentResult<()> {
    if available_years().contains(&end_year) {
        Ok(())
    } else {
        Err(EnrollmentError::UnsupportedYear {
            year: end_year,
            first: FIRST_YEAR,
            last: LAST_YEAR,
        })
    }
}

/// School-year label in the current convention, e.g. `2022-23` for end year 2023.
fn year_label(end_year: i32) -> String {
    format!("{}-{:02}", end_year - 1, end_year % 100)
}

/// Two-digit school-year label, e.g. `22-23` for end year 2023.
fn short_year_label(end_year: i32) -> String {
    format!("{:02}-{:02}", (end_year - 1) % 100, end_year % 100)
}

/// Resolve the exact published filename for a year and category.
///
/// Returns `Ok(None)` when the category does not exist for that year: the
/// 2006 roster was published without any school-level demographic files, and
/// the school-by-grade breakdown first appeared with the 2011 files.
pub fn resolve_filename(end_year: i32, category: FileCategory) -> EnrollmentResult<Option<String>> {
    check_year(end_year)?;
    let name = match category {
        FileCategory::District => Some(district_filename(end_year)),
        FileCategory::SchoolRace => school_race_filename(end_year),
        FileCategory::SchoolGender => school_gender_filename(end_year),
        FileCategory::SchoolGrade => school_grade_filename(end_year),
    };
    Ok(name)
}

/// Full download URL: the fixed base path plus the resolved filename.
pub fn download_url(end_year: i32, category: FileCategory) -> EnrollmentResult<Option<String>> {
    Ok(resolve_filename(end_year, category)?.map(|name| format!("{BASE_URL}{name}")))
}

fn district_filename(end_year: i32) -> String {
    match end_year {
        // Legacy era: labeled by the fall calendar year, .xls binaries.
        2006..=2010 => format!("Fall{}_DistrictEnrollment.xls", end_year - 1),
        // 2014 shipped without the underscore.
        2014 => "DistrictEnrollment2014.xlsx".to_string(),
        2011..=2016 => format!("DistrictEnrollment_{end_year}.xlsx"),
        // 2017 reverted to fall-year labeling for one release.
        2017 => "DistrictEnrollment_Fall2016.xlsx".to_string(),
        2018 => "District_Enrollment_2017-18.xlsx".to_string(),
        // 2019 carried only the end year.
        2019 => "District_Enrollment_19.xlsx".to_string(),
        // The fall-2020 files were posted late under a Fall_ prefix.
        2021 => "District_Enrollment_Fall_2020.xlsx".to_string(),
        // 2023 used two-digit years; 2024 went back to four. Do not extrapolate
        // between adjacent years here.
        2023 => format!("District_Enrollment_{}.xlsx", short_year_label(end_year)),
        2020..=2025 => format!("District_Enrollment_{}.xlsx", year_label(end_year)),
        _ => unreachable!("year {end_year} verified by check_year"),
    }
}

fn school_race_filename(end_year: i32) -> Option<String> {
    let name = match end_year {
        // No school-level demographic files alongside the 2006 roster.
        2006 => return None,
        2007..=2010 => format!("Fall{}_SchoolRace.xls", end_year - 1),
        // 2013 lost the second underscore.
        2013 => "SchoolEnrollmentbyRace_2013.xlsx".to_string(),
        2011..=2016 => format!("SchoolEnrollment_byRace_{end_year}.xlsx"),
        2017 => "SchoolRace_Fall2016.xlsx".to_string(),
        // 2019 spelled out Race_Ethnicity for one release.
        2019 => format!("School_Enrollment_by_Race_Ethnicity_{}.xlsx", year_label(end_year)),
        2021 => "School_Enrollment_by_Race_Fall_2020.xlsx".to_string(),
        2023 => format!("School_Enrollment_by_Race_{}.xlsx", short_year_label(end_year)),
        2018..=2025 => format!("School_Enrollment_by_Race_{}.xlsx", year_label(end_year)),
        _ => unreachable!("year {end_year} verified by check_year"),
    };
    Some(name)
}

fn school_gender_filename(end_year: i32) -> Option<String> {
    let name = match end_year {
        2006 => return None,
        2007..=2010 => format!("Fall{}_SchoolGender.xls", end_year - 1),
        2011..=2016 => format!("SchoolEnrollment_byGender_{end_year}.xlsx"),
        2017 => "SchoolGender_Fall2016.xlsx".to_string(),
        2021 => "School_Enrollment_by_Gender_Fall_2020.xlsx".to_string(),
        2023 => format!("School_Enrollment_by_Gender_{}.xlsx", short_year_label(end_year)),
        2018..=2025 => format!("School_Enrollment_by_Gender_{}.xlsx", year_label(end_year)),
        _ => unreachable!("year {end_year} verified by check_year"),
    };
    Some(name)
}

fn school_grade_filename(end_year: i32) -> Option<String> {
    let name = match end_year {
        // The per-school grade breakdown first appeared with the 2011 files.
        2006..=2010 => return None,
        2011..=2016 => format!("SchoolEnrollment_byGrade_{end_year}.xlsx"),
        2017 => "SchoolGrade_Fall2016.xlsx".to_string(),
        2021 => "School_Enrollment_by_Grade_Fall_2020.xlsx".to_string(),
        2023 => format!("School_Enrollment_by_Grade_{}.xlsx", short_year_label(end_year)),
        2018..=2025 => format!("School_Enrollment_by_Grade_{}.xlsx", year_label(end_year)),
        _ => unreachable!("year {end_year} verified by check_year"),
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrollmentError;

    #[test]
    fn district_resolves_for_every_supported_year() {
        for year in available_years() {
            let name = resolve_filename(year, FileCategory::District).unwrap();
            assert!(name.is_some(), "no district filename for {year}");
        }
    }

    #[test]
    fn every_year_category_pair_resolves_or_is_absent() {
        for year in available_years() {
            for category in FileCategory::ALL {
                // Must yield a name or an expected absence, never panic or err.
                let _ = resolve_filename(year, category).unwrap();
            }
        }
    }

    #[test]
    fn out_of_range_years_are_unsupported() {
        for year in [2005, 2026, 1999, 0] {
            let err = resolve_filename(year, FileCategory::District).unwrap_err();
            assert!(matches!(err, EnrollmentError::UnsupportedYear { .. }));
        }
    }

    #[test]
    fn first_year_has_no_demographic_files() {
        assert_eq!(resolve_filename(2006, FileCategory::SchoolRace).unwrap(), None);
        assert_eq!(resolve_filename(2006, FileCategory::SchoolGender).unwrap(), None);
    }

    #[test]
    fn school_grade_first_appears_in_2011() {
        for year in 2006..=2010 {
            assert_eq!(resolve_filename(year, FileCategory::SchoolGrade).unwrap(), None);
        }
        assert_eq!(
            resolve_filename(2011, FileCategory::SchoolGrade).unwrap().as_deref(),
            Some("SchoolEnrollment_byGrade_2011.xlsx")
        );
    }

    #[test]
    fn adjacent_district_years_do_not_share_a_rule() {
        assert_eq!(
            resolve_filename(2023, FileCategory::District).unwrap().as_deref(),
            Some("District_Enrollment_22-23.xlsx")
        );
        assert_eq!(
            resolve_filename(2024, FileCategory::District).unwrap().as_deref(),
            Some("District_Enrollment_2023-24.xlsx")
        );
    }

    #[test]
    fn one_off_exceptions_resolve_exactly() {
        let cases = [
            (2014, FileCategory::District, "DistrictEnrollment2014.xlsx"),
            (2017, FileCategory::District, "DistrictEnrollment_Fall2016.xlsx"),
            (2019, FileCategory::District, "District_Enrollment_19.xlsx"),
            (2021, FileCategory::District, "District_Enrollment_Fall_2020.xlsx"),
            (2013, FileCategory::SchoolRace, "SchoolEnrollmentbyRace_2013.xlsx"),
            (
                2019,
                FileCategory::SchoolRace,
                "School_Enrollment_by_Race_Ethnicity_2018-19.xlsx",
            ),
            (2021, FileCategory::SchoolGender, "School_Enrollment_by_Gender_Fall_2020.xlsx"),
            (2023, FileCategory::SchoolGrade, "School_Enrollment_by_Grade_22-23.xlsx"),
        ];
        for (year, category, expected) in cases {
            assert_eq!(
                resolve_filename(year, category).unwrap().as_deref(),
                Some(expected),
                "{year} {category}"
            );
        }
    }

    #[test]
    fn legacy_era_uses_fall_year_xls_names() {
        assert_eq!(
            resolve_filename(2007, FileCategory::District).unwrap().as_deref(),
            Some("Fall2006_DistrictEnrollment.xls")
        );
        assert_eq!(
            resolve_filename(2010, FileCategory::SchoolRace).unwrap().as_deref(),
            Some("Fall2009_SchoolRace.xls")
        );
    }

    #[test]
    fn url_is_base_plus_filename() {
        assert_eq!(
            download_url(2024, FileCategory::District).unwrap().as_deref(),
            Some("https://doe.sd.gov/ofm/documents/District_Enrollment_2023-24.xlsx")
        );
        assert_eq!(download_url(2006, FileCategory::SchoolRace).unwrap(), None);
    }
}

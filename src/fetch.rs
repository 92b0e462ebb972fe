//! Raw fetch orchestration for a single year.
//!
//! Pulls the district roster plus (where published) the school-level race and
//! gender sheets. The three fetches are independent: a missing or broken
//! demographic file degrades that slot to absent, while a failed district
//! fetch makes the whole year unavailable.
//!
//! Each sheet also carries a leading-banner row count that must be skipped
//! before the header row. That count varies by exact year *within* a naming
//! era (layout changes did not line up with renames), so it is looked up per
//! year here rather than derived from the filename rules.

use crate::error::{EnrollmentError, EnrollmentResult};
use crate::files::{self, FileCategory};
use crate::observability::PipelineObserver;
use crate::source::SheetSource;
use crate::types::RawSheet;

/// The raw sheets available for one year.
#[derive(Debug, Clone)]
pub struct RawYear {
    pub end_year: i32,
    /// District roster; always present for a fetched year.
    pub district: RawSheet,
    /// School-by-race sheet; absent when unpublished or unfetchable.
    pub campus_race: Option<RawSheet>,
    /// School-by-gender sheet; absent when unpublished or unfetchable.
    pub campus_gender: Option<RawSheet>,
}

/// Number of leading non-data rows (title banners, extraction timestamps)
/// above the header row for (year, category).
pub fn header_skip(end_year: i32, category: FileCategory) -> usize {
    match category {
        FileCategory::District => match end_year {
            // 2008 added an extraction-timestamp line under the title.
            2008 => 3,
            2006..=2010 => 2,
            2011..=2016 => 1,
            2017..=2019 => 3,
            // The late-posted fall-2020 file stacked two notice banners.
            2021 => 4,
            2020 | 2022 => 2,
            _ => 1,
        },
        FileCategory::SchoolRace | FileCategory::SchoolGender | FileCategory::SchoolGrade => {
            match end_year {
                2007..=2010 => 2,
                // The 2012 race/gender files repeated the title on a second line.
                2012 => 2,
                2011..=2016 => 1,
                2017 => 3,
                2021 => 4,
                2018..=2022 => 2,
                _ => 1,
            }
        }
    }
}

/// Fetch all raw sheets for a year.
///
/// Errors with [`EnrollmentError::UnsupportedYear`] outside the catalogue and
/// [`EnrollmentError::YearUnavailable`] when the district roster cannot be
/// fetched. Demographic fetch failures are reported to `observer` and degrade
/// to `None`.
pub fn fetch_raw(
    source: &dyn SheetSource,
    end_year: i32,
    observer: Option<&dyn PipelineObserver>,
) -> EnrollmentResult<RawYear> {
    files::check_year(end_year)?;

    let district = fetch_district(source, end_year, observer)?;
    let campus_race = fetch_demographic(source, end_year, FileCategory::SchoolRace, observer);
    let campus_gender = fetch_demographic(source, end_year, FileCategory::SchoolGender, observer);

    Ok(RawYear {
        end_year,
        district,
        campus_race,
        campus_gender,
    })
}

fn fetch_district(
    source: &dyn SheetSource,
    end_year: i32,
    observer: Option<&dyn PipelineObserver>,
) -> EnrollmentResult<RawSheet> {
    let skip = header_skip(end_year, FileCategory::District);
    match source.fetch(end_year, FileCategory::District, skip) {
        Ok(Some(sheet)) => {
            if let Some(obs) = observer {
                obs.on_sheet_loaded(end_year, FileCategory::District, sheet.row_count());
            }
            Ok(sheet)
        }
        Ok(None) => Err(EnrollmentError::YearUnavailable {
            year: end_year,
            message: "no district roster published".to_string(),
        }),
        Err(err @ EnrollmentError::UnsupportedYear { .. }) => Err(err),
        Err(err) => Err(EnrollmentError::YearUnavailable {
            year: end_year,
            message: err.to_string(),
        }),
    }
}

fn fetch_demographic(
    source: &dyn SheetSource,
    end_year: i32,
    category: FileCategory,
    observer: Option<&dyn PipelineObserver>,
) -> Option<RawSheet> {
    let skip = header_skip(end_year, category);
    match source.fetch(end_year, category, skip) {
        Ok(Some(sheet)) => {
            if let Some(obs) = observer {
                obs.on_sheet_loaded(end_year, category, sheet.row_count());
            }
            Some(sheet)
        }
        Ok(None) => {
            if let Some(obs) = observer {
                let reason = EnrollmentError::CategoryUnavailable {
                    year: end_year,
                    category,
                };
                obs.on_category_unavailable(end_year, category, &reason.to_string());
            }
            None
        }
        Err(err) => {
            if let Some(obs) = observer {
                obs.on_category_unavailable(end_year, category, &err.to_string());
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fetch_raw, header_skip};
    use crate::error::{EnrollmentError, EnrollmentResult};
    use crate::files::FileCategory;
    use crate::source::SheetSource;
    use crate::types::RawSheet;

    struct StubSource {
        district_ok: bool,
        race_ok: bool,
    }

    fn tiny_sheet() -> RawSheet {
        RawSheet::new(
            vec!["DistrictNumber".into(), "DistrictName".into()],
            vec![vec!["00101".into(), "Aberdeen".into()]],
        )
    }

    impl SheetSource for StubSource {
        fn fetch(
            &self,
            end_year: i32,
            category: FileCategory,
            _skip_rows: usize,
        ) -> EnrollmentResult<Option<RawSheet>> {
            match category {
                FileCategory::District if self.district_ok => Ok(Some(tiny_sheet())),
                FileCategory::District => Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "gone",
                )
                .into()),
                FileCategory::SchoolRace if end_year == 2006 => Ok(None),
                FileCategory::SchoolRace if self.race_ok => Ok(Some(tiny_sheet())),
                FileCategory::SchoolRace => Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "gone",
                )
                .into()),
                FileCategory::SchoolGender if end_year == 2006 => Ok(None),
                _ => Ok(Some(tiny_sheet())),
            }
        }
    }

    #[test]
    fn demographic_failure_degrades_to_absent() {
        let source = StubSource {
            district_ok: true,
            race_ok: false,
        };
        let raw = fetch_raw(&source, 2015, None).unwrap();
        assert!(raw.campus_race.is_none());
        assert!(raw.campus_gender.is_some());
    }

    #[test]
    fn district_failure_is_fatal_for_the_year() {
        let source = StubSource {
            district_ok: false,
            race_ok: true,
        };
        let err = fetch_raw(&source, 2015, None).unwrap_err();
        assert!(matches!(err, EnrollmentError::YearUnavailable { year: 2015, .. }));
    }

    #[test]
    fn district_only_year_has_absent_demographic_slots() {
        let source = StubSource {
            district_ok: true,
            race_ok: true,
        };
        let raw = fetch_raw(&source, 2006, None).unwrap();
        assert!(raw.campus_race.is_none());
        assert!(raw.campus_gender.is_none());
    }

    #[test]
    fn unsupported_year_is_not_wrapped() {
        let source = StubSource {
            district_ok: true,
            race_ok: true,
        };
        let err = fetch_raw(&source, 1999, None).unwrap_err();
        assert!(matches!(err, EnrollmentError::UnsupportedYear { .. }));
    }

    #[test]
    fn skip_counts_vary_within_an_era() {
        assert_eq!(header_skip(2007, FileCategory::District), 2);
        assert_eq!(header_skip(2008, FileCategory::District), 3);
        assert_eq!(header_skip(2021, FileCategory::SchoolRace), 4);
        assert_eq!(header_skip(2024, FileCategory::District), 1);
    }
}

//! Core data model types.
//!
//! Source spreadsheets are decoded into a [`RawSheet`] of text cells, the
//! processors build one canonical [`WideRow`] per state/district/campus per
//! year, and the tidy transform pivots those into [`TidyRow`] fact records.

use serde::{Deserialize, Serialize};

/// An ordered sheet of decoded text cells with its (unnormalized) header row.
///
/// Produced by the sheet readers after skipping a per-year count of leading
/// banner rows. Header strings vary by year and category; resolving them to
/// canonical fields is the job of [`crate::columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// Create a sheet from a header row and data rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// The raw header strings, in sheet order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All data rows (header excluded).
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at (row, col); ragged rows read as empty past their end.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterate one column top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |r| r.get(col).map(String::as_str).unwrap_or(""))
    }
}

/// Which level of the system a [`WideRow`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Synthetic statewide aggregate.
    State,
    /// One public school district.
    District,
    /// One school (campus) within a district.
    Campus,
}

/// Grade levels carried by every source era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    Pk,
    K,
    G01,
    G02,
    G03,
    G04,
    G05,
    G06,
    G07,
    G08,
    G09,
    G10,
    G11,
    G12,
    /// Ungraded students.
    Ug,
}

impl Grade {
    /// All grades in canonical PK..UG order.
    pub const ALL: [Grade; 15] = [
        Grade::Pk,
        Grade::K,
        Grade::G01,
        Grade::G02,
        Grade::G03,
        Grade::G04,
        Grade::G05,
        Grade::G06,
        Grade::G07,
        Grade::G08,
        Grade::G09,
        Grade::G10,
        Grade::G11,
        Grade::G12,
        Grade::Ug,
    ];

    /// Stable grade-level code used in tidy output (`PK`, `K`, `01`..`12`, `UG`).
    pub fn code(self) -> &'static str {
        match self {
            Grade::Pk => "PK",
            Grade::K => "K",
            Grade::G01 => "01",
            Grade::G02 => "02",
            Grade::G03 => "03",
            Grade::G04 => "04",
            Grade::G05 => "05",
            Grade::G06 => "06",
            Grade::G07 => "07",
            Grade::G08 => "08",
            Grade::G09 => "09",
            Grade::G10 => "10",
            Grade::G11 => "11",
            Grade::G12 => "12",
            Grade::Ug => "UG",
        }
    }
}

/// Demographic subgroups reported in tidy output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subgroup {
    TotalEnrollment,
    White,
    Black,
    Hispanic,
    Asian,
    NativeAmerican,
    PacificIslander,
    Multiracial,
    Male,
    Female,
}

impl Subgroup {
    /// The seven federally reported race/ethnicity categories.
    pub const RACES: [Subgroup; 7] = [
        Subgroup::White,
        Subgroup::Black,
        Subgroup::Hispanic,
        Subgroup::Asian,
        Subgroup::NativeAmerican,
        Subgroup::PacificIslander,
        Subgroup::Multiracial,
    ];

    /// The two gender categories the agency publishes.
    pub const GENDERS: [Subgroup; 2] = [Subgroup::Male, Subgroup::Female];

    /// Stable subgroup name used in tidy output.
    pub fn as_str(self) -> &'static str {
        match self {
            Subgroup::TotalEnrollment => "total_enrollment",
            Subgroup::White => "white",
            Subgroup::Black => "black",
            Subgroup::Hispanic => "hispanic",
            Subgroup::Asian => "asian",
            Subgroup::NativeAmerican => "native_american",
            Subgroup::PacificIslander => "pacific_islander",
            Subgroup::Multiracial => "multiracial",
            Subgroup::Male => "male",
            Subgroup::Female => "female",
        }
    }
}

/// Canonical unit record: one state/district/campus per year, raw counts by
/// grade and demographic category.
///
/// All counts are `Option<i64>`; `None` means the agency suppressed or never
/// published the value, which is distinct from a reported zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    /// End year of the school year (fall 2022 enrollment has `end_year` 2023).
    pub end_year: i32,
    /// 5-digit zero-padded district number.
    pub district_id: Option<String>,
    /// 7-digit campus id: district number + 2-digit school number.
    pub campus_id: Option<String>,
    pub district_name: Option<String>,
    pub campus_name: Option<String>,
    /// Row level.
    #[serde(rename = "type")]
    pub level: Level,
    /// Agency district-type code (identifies non-public designations).
    pub district_type_code: Option<String>,
    pub district_type_name: Option<String>,
    pub row_total: Option<i64>,
    pub white: Option<i64>,
    pub black: Option<i64>,
    pub hispanic: Option<i64>,
    pub asian: Option<i64>,
    pub native_american: Option<i64>,
    pub pacific_islander: Option<i64>,
    pub multiracial: Option<i64>,
    pub male: Option<i64>,
    pub female: Option<i64>,
    pub grade_pk: Option<i64>,
    pub grade_k: Option<i64>,
    pub grade_01: Option<i64>,
    pub grade_02: Option<i64>,
    pub grade_03: Option<i64>,
    pub grade_04: Option<i64>,
    pub grade_05: Option<i64>,
    pub grade_06: Option<i64>,
    pub grade_07: Option<i64>,
    pub grade_08: Option<i64>,
    pub grade_09: Option<i64>,
    pub grade_10: Option<i64>,
    pub grade_11: Option<i64>,
    pub grade_12: Option<i64>,
    pub grade_ug: Option<i64>,
}

impl WideRow {
    /// Create an empty row for a given year and level; every count missing.
    pub fn new(end_year: i32, level: Level) -> Self {
        Self {
            end_year,
            district_id: None,
            campus_id: None,
            district_name: None,
            campus_name: None,
            level,
            district_type_code: None,
            district_type_name: None,
            row_total: None,
            white: None,
            black: None,
            hispanic: None,
            asian: None,
            native_american: None,
            pacific_islander: None,
            multiracial: None,
            male: None,
            female: None,
            grade_pk: None,
            grade_k: None,
            grade_01: None,
            grade_02: None,
            grade_03: None,
            grade_04: None,
            grade_05: None,
            grade_06: None,
            grade_07: None,
            grade_08: None,
            grade_09: None,
            grade_10: None,
            grade_11: None,
            grade_12: None,
            grade_ug: None,
        }
    }

    /// Count for one grade level.
    pub fn grade(&self, g: Grade) -> Option<i64> {
        *self.grade_slot(g)
    }

    /// Mutable slot for one grade level (lets transforms stay table-driven).
    pub fn grade_mut(&mut self, g: Grade) -> &mut Option<i64> {
        match g {
            Grade::Pk => &mut self.grade_pk,
            Grade::K => &mut self.grade_k,
            Grade::G01 => &mut self.grade_01,
            Grade::G02 => &mut self.grade_02,
            Grade::G03 => &mut self.grade_03,
            Grade::G04 => &mut self.grade_04,
            Grade::G05 => &mut self.grade_05,
            Grade::G06 => &mut self.grade_06,
            Grade::G07 => &mut self.grade_07,
            Grade::G08 => &mut self.grade_08,
            Grade::G09 => &mut self.grade_09,
            Grade::G10 => &mut self.grade_10,
            Grade::G11 => &mut self.grade_11,
            Grade::G12 => &mut self.grade_12,
            Grade::Ug => &mut self.grade_ug,
        }
    }

    fn grade_slot(&self, g: Grade) -> &Option<i64> {
        match g {
            Grade::Pk => &self.grade_pk,
            Grade::K => &self.grade_k,
            Grade::G01 => &self.grade_01,
            Grade::G02 => &self.grade_02,
            Grade::G03 => &self.grade_03,
            Grade::G04 => &self.grade_04,
            Grade::G05 => &self.grade_05,
            Grade::G06 => &self.grade_06,
            Grade::G07 => &self.grade_07,
            Grade::G08 => &self.grade_08,
            Grade::G09 => &self.grade_09,
            Grade::G10 => &self.grade_10,
            Grade::G11 => &self.grade_11,
            Grade::G12 => &self.grade_12,
            Grade::Ug => &self.grade_ug,
        }
    }

    /// Count for one demographic subgroup (`TotalEnrollment` reads `row_total`).
    pub fn demographic(&self, s: Subgroup) -> Option<i64> {
        *self.demographic_slot(s)
    }

    /// Mutable slot for one demographic subgroup.
    pub fn demographic_mut(&mut self, s: Subgroup) -> &mut Option<i64> {
        match s {
            Subgroup::TotalEnrollment => &mut self.row_total,
            Subgroup::White => &mut self.white,
            Subgroup::Black => &mut self.black,
            Subgroup::Hispanic => &mut self.hispanic,
            Subgroup::Asian => &mut self.asian,
            Subgroup::NativeAmerican => &mut self.native_american,
            Subgroup::PacificIslander => &mut self.pacific_islander,
            Subgroup::Multiracial => &mut self.multiracial,
            Subgroup::Male => &mut self.male,
            Subgroup::Female => &mut self.female,
        }
    }

    fn demographic_slot(&self, s: Subgroup) -> &Option<i64> {
        match s {
            Subgroup::TotalEnrollment => &self.row_total,
            Subgroup::White => &self.white,
            Subgroup::Black => &self.black,
            Subgroup::Hispanic => &self.hispanic,
            Subgroup::Asian => &self.asian,
            Subgroup::NativeAmerican => &self.native_american,
            Subgroup::PacificIslander => &self.pacific_islander,
            Subgroup::Multiracial => &self.multiracial,
            Subgroup::Male => &self.male,
            Subgroup::Female => &self.female,
        }
    }
}

/// Derived fact record: one row per location, grade level, and subgroup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRow {
    pub end_year: i32,
    pub district_id: Option<String>,
    pub campus_id: Option<String>,
    pub district_name: Option<String>,
    pub campus_name: Option<String>,
    #[serde(rename = "type")]
    pub level: Level,
    /// `TOTAL`, `PK`, `K`, `01`..`12`, or `UG`.
    pub grade_level: String,
    /// Subgroup name (`total_enrollment`, race, or gender).
    pub subgroup: String,
    pub n_students: Option<i64>,
    /// Share of the location's total enrollment, in `[0, 1]`. Missing when the
    /// numerator or denominator is missing or the denominator is zero.
    pub pct: Option<f64>,
    pub is_state: bool,
    pub is_district: bool,
    pub is_campus: bool,
    /// False only for rows the agency marks with a non-public district type.
    pub is_public: bool,
}

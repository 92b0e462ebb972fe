//! Caching of processed wide tables.
//!
//! The transformation core stays free of I/O; callers that want to avoid
//! re-fetching inject a cache into the pipeline entry points instead of
//! relying on ambient global state. Tidy rows are never cached; they are a
//! pure function of the wide table and regenerate cheaply.

use std::path::PathBuf;

use crate::error::EnrollmentResult;
use crate::types::WideRow;

/// A store of processed wide tables, keyed by end year.
///
/// Last writer wins; the pipeline never writes the same year's slot from two
/// places at once.
pub trait EnrollmentCache {
    /// Fetch the cached wide table for a year, if present.
    fn get(&self, end_year: i32) -> EnrollmentResult<Option<Vec<WideRow>>>;

    /// Store the wide table for a year, replacing any previous entry.
    fn put(&self, end_year: i32, rows: &[WideRow]) -> EnrollmentResult<()>;
}

/// File-backed cache: one CSV per year under a directory.
#[derive(Debug, Clone)]
pub struct CsvCache {
    dir: PathBuf,
}

impl CsvCache {
    /// Create a cache rooted at `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, end_year: i32) -> PathBuf {
        self.dir.join(format!("enrollment_{end_year}_wide.csv"))
    }
}

impl EnrollmentCache for CsvCache {
    fn get(&self, end_year: i32) -> EnrollmentResult<Option<Vec<WideRow>>> {
        let path = self.path_for(end_year);
        if !path.exists() {
            return Ok(None);
        }
        let mut rdr = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for record in rdr.deserialize() {
            rows.push(record?);
        }
        Ok(Some(rows))
    }

    fn put(&self, end_year: i32, rows: &[WideRow]) -> EnrollmentResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let mut wtr = csv::Writer::from_path(self.path_for(end_year))?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvCache, EnrollmentCache};
    use crate::types::{Level, WideRow};

    #[test]
    fn wide_rows_round_trip_through_the_csv_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CsvCache::new(dir.path());

        let mut district = WideRow::new(2020, Level::District);
        district.district_id = Some("00101".to_string());
        district.district_name = Some("Aberdeen".to_string());
        district.row_total = Some(100);
        district.grade_k = Some(10);
        let mut state = WideRow::new(2020, Level::State);
        state.district_name = Some("Statewide".to_string());
        state.row_total = Some(100);

        let rows = vec![state, district];
        cache.put(2020, &rows).unwrap();
        assert_eq!(cache.get(2020).unwrap(), Some(rows));
        assert_eq!(cache.get(2021).unwrap(), None);
    }

    #[test]
    fn put_replaces_previous_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CsvCache::new(dir.path());

        let mut first = WideRow::new(2020, Level::District);
        first.district_id = Some("00101".to_string());
        cache.put(2020, std::slice::from_ref(&first)).unwrap();

        let mut second = WideRow::new(2020, Level::District);
        second.district_id = Some("00061".to_string());
        cache.put(2020, std::slice::from_ref(&second)).unwrap();

        let got = cache.get(2020).unwrap().unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].district_id.as_deref(), Some("00061"));
    }
}

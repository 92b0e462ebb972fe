//! User-facing entry points.
//!
//! [`enrollment_for_year`] runs the whole single-year pipeline: fetch raw
//! sheets, process district and campus rows, aggregate the state row, and
//! return the combined wide table. [`fetch_enr`] tidies that table;
//! [`fetch_enr_years`] runs many years with per-year failure reporting.

use std::fmt;
use std::sync::Arc;

use crate::cache::EnrollmentCache;
use crate::error::EnrollmentResult;
use crate::fetch;
use crate::observability::PipelineObserver;
use crate::process::{aggregate_state, process_campus, process_district, tidy};
use crate::source::SheetSource;
use crate::types::{TidyRow, WideRow};

/// Options controlling pipeline behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct FetchOptions {
    /// Optional observer for fetch/degradation/failure events.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Build the combined wide table for one year: the state row first, then
/// district rows in sheet order, then campus rows in key order.
pub fn enrollment_for_year(
    source: &dyn SheetSource,
    end_year: i32,
    options: &FetchOptions,
) -> EnrollmentResult<Vec<WideRow>> {
    let observer = options.observer.as_deref();
    let raw = fetch::fetch_raw(source, end_year, observer)?;

    let districts = process_district(&raw.district, end_year)?;
    let campuses = match &raw.campus_race {
        Some(race) => process_campus(race, raw.campus_gender.as_ref(), end_year)?,
        None => Vec::new(),
    };

    let mut rows = Vec::with_capacity(1 + districts.len() + campuses.len());
    rows.extend(aggregate_state(&districts, end_year));
    rows.extend(districts);
    rows.extend(campuses);
    Ok(rows)
}

/// Fetch one year and return it in tidy form.
pub fn fetch_enr(
    source: &dyn SheetSource,
    end_year: i32,
    options: &FetchOptions,
) -> EnrollmentResult<Vec<TidyRow>> {
    Ok(tidy(&enrollment_for_year(source, end_year, options)?))
}

/// Result of a multi-year fetch: concatenated tidy rows in the caller's year
/// order, plus the years that failed and why.
#[derive(Debug, Default)]
pub struct MultiYearOutcome {
    pub rows: Vec<TidyRow>,
    pub failures: Vec<(i32, crate::error::EnrollmentError)>,
}

/// Fetch many years; one year's failure never aborts its siblings.
///
/// Failed years are excluded from `rows` and reported in `failures` (and to
/// the observer), never silently swallowed.
pub fn fetch_enr_years(
    source: &dyn SheetSource,
    end_years: &[i32],
    options: &FetchOptions,
) -> MultiYearOutcome {
    let mut outcome = MultiYearOutcome::default();
    for &year in end_years {
        match fetch_enr(source, year, options) {
            Ok(mut rows) => outcome.rows.append(&mut rows),
            Err(err) => {
                if let Some(obs) = options.observer.as_deref() {
                    obs.on_year_failed(year, &err);
                }
                outcome.failures.push((year, err));
            }
        }
    }
    outcome
}

/// Cache-aware variant of [`enrollment_for_year`]: serve the wide table from
/// the cache when present, otherwise compute and store it.
pub fn enrollment_for_year_cached(
    source: &dyn SheetSource,
    cache: &dyn EnrollmentCache,
    end_year: i32,
    options: &FetchOptions,
) -> EnrollmentResult<Vec<WideRow>> {
    if let Some(rows) = cache.get(end_year)? {
        return Ok(rows);
    }
    let rows = enrollment_for_year(source, end_year, options)?;
    cache.put(end_year, &rows)?;
    Ok(rows)
}

/// Cache-aware variant of [`fetch_enr`]; tidy rows are regenerated from the
/// cached wide table, never cached themselves.
pub fn fetch_enr_cached(
    source: &dyn SheetSource,
    cache: &dyn EnrollmentCache,
    end_year: i32,
    options: &FetchOptions,
) -> EnrollmentResult<Vec<TidyRow>> {
    Ok(tidy(&enrollment_for_year_cached(source, cache, end_year, options)?))
}

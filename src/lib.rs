//! `sd-enrollment` fetches the state education agency's fall-enrollment
//! spreadsheets (two decades of inconsistently named, inconsistently shaped
//! files) and reshapes them into one stable schema.
//!
//! The hard part lives in the format-reconciliation layer:
//!
//! - [`files`]: per-year filename rules (three naming eras plus a long tail of
//!   one-off exceptions) and download URLs
//! - [`columns`]: header and label aliases shared across years
//! - [`fetch`]: per-year banner-row skip counts and fault-tolerant raw fetch
//! - [`process`]: district/campus/state processors and the wide-to-tidy pivot
//! - [`normalize`]: suppression markers and cell-text numeric parsing
//!
//! Sheets come from a [`source::SheetSource`]: [`source::DirSource`] reads a
//! local mirror, and [`source::HttpSource`] (cargo feature `download`)
//! downloads straight from the agency site. Processed wide tables can be
//! persisted through [`cache::EnrollmentCache`].
//!
//! ## Quick example: one year, tidy form
//!
//! ```no_run
//! use sd_enrollment::pipeline::{fetch_enr, FetchOptions};
//! use sd_enrollment::source::DirSource;
//!
//! # fn main() -> Result<(), sd_enrollment::EnrollmentError> {
//! let source = DirSource::new("data/mirror");
//! let rows = fetch_enr(&source, 2024, &FetchOptions::default())?;
//! println!("tidy rows: {}", rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Many years, per-year failure reporting
//!
//! One year's failure never aborts its siblings; failed years are surfaced in
//! the outcome instead of being silently dropped.
//!
//! ```no_run
//! use sd_enrollment::pipeline::{fetch_enr_years, FetchOptions};
//! use sd_enrollment::source::DirSource;
//!
//! let source = DirSource::new("data/mirror");
//! let years: Vec<i32> = (2015..=2024).collect();
//! let outcome = fetch_enr_years(&source, &years, &FetchOptions::default());
//! for (year, err) in &outcome.failures {
//!     eprintln!("{year}: {err}");
//! }
//! ```
//!
//! ## The pure core
//!
//! The processors are plain functions over in-memory sheets, so the pipeline
//! is testable (and re-runnable) without any I/O:
//!
//! ```rust
//! use sd_enrollment::process::{aggregate_state, process_district, tidy};
//! use sd_enrollment::types::RawSheet;
//!
//! let sheet = RawSheet::new(
//!     vec!["DistrictNumber".into(), "DistrictName".into(), "Total".into()],
//!     vec![
//!         vec!["00101".into(), "Aberdeen 06-1".into(), "3500".into()],
//!         vec!["00061".into(), "Brookings 05-1".into(), "3000".into()],
//!     ],
//! );
//!
//! let districts = process_district(&sheet, 2024).unwrap();
//! let state = aggregate_state(&districts, 2024).unwrap();
//! assert_eq!(state.row_total, Some(6500));
//!
//! let mut wide = vec![state];
//! wide.extend(districts);
//! let facts = tidy(&wide);
//! assert_eq!(facts.len(), 3 * 25);
//! ```

pub mod cache;
pub mod columns;
pub mod error;
pub mod fetch;
pub mod files;
pub mod normalize;
pub mod observability;
pub mod pipeline;
pub mod process;
pub mod sheet;
pub mod source;
pub mod types;

pub use error::{EnrollmentError, EnrollmentResult};
pub use files::{available_years, FileCategory, FIRST_YEAR, LAST_YEAR};
pub use pipeline::{
    enrollment_for_year, enrollment_for_year_cached, fetch_enr, fetch_enr_cached, fetch_enr_years,
    FetchOptions, MultiYearOutcome,
};

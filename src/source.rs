//! Sheet sources: where raw spreadsheets come from.
//!
//! The pipeline core only needs, per year and category, a decoded sheet plus
//! a skip-row count, and the ability to signal per-category absence without
//! aborting the year. [`SheetSource`] is that boundary. [`DirSource`] serves
//! files from a local mirror; [`HttpSource`] (cargo feature `download`) pulls
//! straight from the agency site.

use std::path::PathBuf;

use crate::error::EnrollmentResult;
use crate::files::{self, FileCategory};
use crate::sheet;
use crate::types::RawSheet;

/// A provider of decoded enrollment sheets.
///
/// Implementations return `Ok(None)` when the category was never published
/// for the year, and an error when a published file cannot be retrieved or
/// decoded. The orchestrator decides which of those are fatal.
pub trait SheetSource {
    /// Fetch the sheet for (year, category), skipping `skip_rows` leading rows.
    fn fetch(
        &self,
        end_year: i32,
        category: FileCategory,
        skip_rows: usize,
    ) -> EnrollmentResult<Option<RawSheet>>;
}

/// Serves sheets from a local directory holding the published files under
/// their original names (a `.csv` conversion with the same stem also works).
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SheetSource for DirSource {
    fn fetch(
        &self,
        end_year: i32,
        category: FileCategory,
        skip_rows: usize,
    ) -> EnrollmentResult<Option<RawSheet>> {
        let Some(name) = files::resolve_filename(end_year, category)? else {
            return Ok(None);
        };

        let workbook_path = self.root.join(&name);
        if workbook_path.exists() {
            return sheet::read_workbook_path(&workbook_path, skip_rows).map(Some);
        }

        let csv_path = workbook_path.with_extension("csv");
        if csv_path.exists() {
            return sheet::read_csv_path(&csv_path, skip_rows).map(Some);
        }

        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found under {}", name, self.root.display()),
        )
        .into())
    }
}

/// Downloads published workbooks from the agency site.
#[cfg(feature = "download")]
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "download")]
impl HttpSource {
    /// Create a source with a default blocking client.
    pub fn new() -> EnrollmentResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sd-enrollment/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "download")]
impl SheetSource for HttpSource {
    fn fetch(
        &self,
        end_year: i32,
        category: FileCategory,
        skip_rows: usize,
    ) -> EnrollmentResult<Option<RawSheet>> {
        let Some(url) = files::download_url(end_year, category)? else {
            return Ok(None);
        };

        let body = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .bytes()?;
        sheet::read_workbook_bytes(&body, skip_rows).map(Some)
    }
}

//! Observer hooks for the fetch pipeline.
//!
//! The transformation core is pure; everything worth reporting happens at the
//! fetch boundary (a sheet loaded, a demographic slot degraded, a whole year
//! failed). Implementors can record metrics, logs, or trigger alerts.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::EnrollmentError;
use crate::files::FileCategory;

/// Observer interface for pipeline outcomes.
pub trait PipelineObserver: Send + Sync {
    /// Called when a sheet for (year, category) was fetched and decoded.
    fn on_sheet_loaded(&self, _end_year: i32, _category: FileCategory, _rows: usize) {}

    /// Called when a demographic slot degrades to absent (missing file or
    /// failed fetch). Never called for the district roster, whose failure is
    /// fatal and reported via [`Self::on_year_failed`].
    fn on_category_unavailable(&self, _end_year: i32, _category: FileCategory, _reason: &str) {}

    /// Called when a year could not be processed at all.
    fn on_year_failed(&self, _end_year: i32, _error: &EnrollmentError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_sheet_loaded(&self, end_year: i32, category: FileCategory, rows: usize) {
        for o in &self.observers {
            o.on_sheet_loaded(end_year, category, rows);
        }
    }

    fn on_category_unavailable(&self, end_year: i32, category: FileCategory, reason: &str) {
        for o in &self.observers {
            o.on_category_unavailable(end_year, category, reason);
        }
    }

    fn on_year_failed(&self, end_year: i32, error: &EnrollmentError) {
        for o in &self.observers {
            o.on_year_failed(end_year, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_sheet_loaded(&self, end_year: i32, category: FileCategory, rows: usize) {
        eprintln!("[enr][ok] year={end_year} category={category} rows={rows}");
    }

    fn on_category_unavailable(&self, end_year: i32, category: FileCategory, reason: &str) {
        eprintln!("[enr][degraded] year={end_year} category={category} reason={reason}");
    }

    fn on_year_failed(&self, end_year: i32, error: &EnrollmentError) {
        eprintln!("[enr][failed] year={end_year} err={error}");
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_sheet_loaded(&self, end_year: i32, category: FileCategory, rows: usize) {
        self.append_line(&format!(
            "{} ok year={end_year} category={category} rows={rows}",
            unix_ts()
        ));
    }

    fn on_category_unavailable(&self, end_year: i32, category: FileCategory, reason: &str) {
        self.append_line(&format!(
            "{} degraded year={end_year} category={category} reason={reason}",
            unix_ts()
        ));
    }

    fn on_year_failed(&self, end_year: i32, error: &EnrollmentError) {
        self.append_line(&format!("{} failed year={end_year} err={error}", unix_ts()));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

use thiserror::Error;

use crate::files::FileCategory;

/// Convenience result type for enrollment operations.
pub type EnrollmentResult<T> = Result<T, EnrollmentError>;

/// Error type returned across the crate.
///
/// This is a single error enum shared by the filename resolver, the sheet
/// readers, the fetch orchestrator, and the processors.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// The requested end year is outside the catalogued publication range.
    #[error("unsupported end year {year}: enrollment files are published for {first}-{last}")]
    UnsupportedYear { year: i32, first: i32, last: i32 },

    /// The file category was never published for this year.
    ///
    /// Non-fatal by contract: orchestration degrades the slot to absent.
    #[error("no {category} file is published for end year {year}")]
    CategoryUnavailable { year: i32, category: FileCategory },

    /// The district roster for a year could not be fetched; the whole year is
    /// unusable (demographic files alone cannot reconstruct it).
    #[error("end year {year} is unavailable: {message}")]
    YearUnavailable { year: i32, message: String },

    /// A required column could not be resolved by alias or heuristic.
    #[error("malformed sheet: {message}")]
    MalformedSheet { message: String },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook decoding error.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// CSV decoding error (local sources and the wide-row cache).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "download")]
    /// HTTP download error (feature-gated behind `download`).
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),
}

//! Pure transformations from raw sheets to canonical rows.
//!
//! The processing layer never performs I/O and never mutates its inputs; every
//! function here is safe to re-run or to invoke concurrently for different
//! years.
//!
//! - [`district::process_district`]: district roster sheet → one wide row per district
//! - [`campus::process_campus`]: long-form race (+ gender) sheets → one wide row per school
//! - [`state::aggregate_state`]: district rows → a single synthetic state row
//! - [`tidy::tidy`]: combined wide table → tidy fact rows

pub mod campus;
pub mod district;
pub mod state;
pub mod tidy;

pub use campus::process_campus;
pub use district::process_district;
pub use state::aggregate_state;
pub use tidy::tidy;

/// True for "names" that are really header, subtotal, or statewide rows that
/// leaked into the data region.
pub(crate) fn is_marker_name(name: &str) -> bool {
    let lower = name.trim().to_ascii_lowercase();
    lower.contains("total")
        || lower == "state"
        || lower == "statewide"
        || lower.starts_with("district name")
        || lower.starts_with("school name")
}

/// Keep only ASCII digits.
pub(crate) fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Left-pad a digit string with zeros to `width`.
pub(crate) fn zero_pad(digits: &str, width: usize) -> String {
    format!("{digits:0>width$}")
}

/// Add under missing-ignoring summation: absent operands contribute nothing,
/// and the sum stays missing only when every operand was missing.
pub(crate) fn add_opt(acc: Option<i64>, v: Option<i64>) -> Option<i64> {
    match (acc, v) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::{add_opt, digits, is_marker_name, zero_pad};

    #[test]
    fn marker_names_are_detected() {
        assert!(is_marker_name("Total"));
        assert!(is_marker_name("STATE TOTAL"));
        assert!(is_marker_name("Statewide"));
        assert!(is_marker_name("District Name"));
        assert!(!is_marker_name("Aberdeen 06-1"));
    }

    #[test]
    fn ids_are_digit_stripped_and_padded() {
        assert_eq!(digits("06-1"), "061");
        assert_eq!(zero_pad(&digits("06-1"), 5), "00061");
        assert_eq!(zero_pad("7", 2), "07");
    }

    #[test]
    fn add_opt_ignores_missing_without_propagating() {
        assert_eq!(add_opt(None, None), None);
        assert_eq!(add_opt(Some(3), None), Some(3));
        assert_eq!(add_opt(None, Some(4)), Some(4));
        assert_eq!(add_opt(Some(3), Some(4)), Some(7));
    }
}

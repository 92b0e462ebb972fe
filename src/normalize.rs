//! Cell-text normalization.
//!
//! Every numeric cell in the source spreadsheets passes through here before it
//! becomes a count. The agency uses a handful of suppression markers for
//! privacy-redacted small counts, plus thousands separators and stray
//! whitespace; all of those become `None` or a clean integer. Parsing never
//! fails loudly: an unparseable cell is a missing value, not an error.

/// Placeholder strings the agency publishes in place of redacted counts.
///
/// Matched case-insensitively against the cleaned cell text. `-1` is listed
/// here because some eras exported suppressed cells as a literal `-1`, which
/// would otherwise parse as a number.
pub const SUPPRESSION_MARKERS: &[&str] = &["*", ".", "-", "-1", "<5", "N/A", "NA"];

/// Normalize one raw cell into a count.
///
/// Rules, in order:
///
/// 1. trim whitespace and strip thousands separators
/// 2. empty or suppression-marker text → `None`
/// 3. integer parse, falling back to a whole-valued float parse
///    (`"1234.0"` exports are common in the oldest era)
/// 4. anything else → `None`
pub fn normalize_count(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    if SUPPRESSION_MARKERS
        .iter()
        .any(|m| cleaned.eq_ignore_ascii_case(m))
    {
        return None;
    }
    if let Ok(n) = cleaned.parse::<i64>() {
        return Some(n);
    }
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

/// Normalize a homogeneous sequence of raw cells.
///
/// Empty input yields an empty vector, not a single missing value.
pub fn normalize_all<'a, I>(values: I) -> Vec<Option<i64>>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().map(normalize_count).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_all, normalize_count};

    #[test]
    fn plain_and_separated_integers_parse() {
        assert_eq!(normalize_count("42"), Some(42));
        assert_eq!(normalize_count(" 1,234 "), Some(1234));
        assert_eq!(normalize_count("12,345,678"), Some(12_345_678));
        assert_eq!(normalize_count("0"), Some(0));
    }

    #[test]
    fn suppression_markers_are_missing() {
        for marker in ["*", ".", "-", "-1", "<5", "N/A", "NA", "", "n/a", "na"] {
            assert_eq!(normalize_count(marker), None, "marker {marker:?}");
        }
    }

    #[test]
    fn whole_valued_floats_parse_as_counts() {
        assert_eq!(normalize_count("250.0"), Some(250));
        assert_eq!(normalize_count("1,250.0"), Some(1250));
    }

    #[test]
    fn garbage_is_missing_not_an_error() {
        assert_eq!(normalize_count("abc"), None);
        assert_eq!(normalize_count("12a"), None);
        assert_eq!(normalize_count("1.5"), None);
        assert_eq!(normalize_count("inf"), None);
        assert_eq!(normalize_count("NaN"), None);
    }

    #[test]
    fn empty_sequence_yields_empty_output() {
        assert_eq!(normalize_all([]), Vec::<Option<i64>>::new());
    }

    #[test]
    fn sequences_normalize_elementwise() {
        assert_eq!(
            normalize_all(["10", "*", "1,000"]),
            vec![Some(10), None, Some(1000)]
        );
    }
}

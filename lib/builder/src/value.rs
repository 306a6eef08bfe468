//! Raw value parsing and bucketing
//!
//! Tabular sources carry noise such as unit suffixes (`"12 g"`), less-than
//! markers (`"<1"`) and missing markers (`"NA"`). These helpers turn a raw
//! cell into a number and snap it onto a fixed increment.

const MISSING_MARKERS: [&str; 4] = ["na", "n/a", "-", "null"];

// Longest first so "mg" is not read as "m" + "g"
const UNIT_SUFFIXES: [&str; 4] = ["kcal", "cal", "mg", "g"];

/// Parse a raw cell into a number.
///
/// Returns `None` for missing markers and anything that is not a finite
/// number once units are stripped. A less-than marker `<x` yields `x / 2`.
pub fn parse_value(raw: &str) -> Option<f64> {
    let mut s = raw.trim();
    if s.is_empty() || MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m)) {
        return None;
    }

    let less_than = s.starts_with('<');
    if less_than {
        s = s[1..].trim_start();
    }

    let lower = s.to_ascii_lowercase();
    let mut number = lower.as_str();
    for suffix in UNIT_SUFFIXES {
        if let Some(stripped) = number.strip_suffix(suffix) {
            number = stripped.trim_end();
            break;
        }
    }

    let value: f64 = number.replace(',', "").parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if less_than { value / 2.0 } else { value })
}

/// Round `value` to the nearest multiple of `increment`, ties to even
pub fn bucketize(value: f64, increment: f64) -> f64 {
    // Adding 0.0 folds -0.0 into 0.0 so keys never read "_-0"
    (value / increment).round_ties_even() * increment + 0.0
}

/// Render a bucket for use in a vertex id
pub fn format_bucket(bucket: f64) -> String {
    if bucket.fract() == 0.0 {
        format!("{bucket:.0}")
    } else {
        let s = format!("{bucket:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Id of the category vertex for `attribute` at `bucket`
pub fn category_key(attribute: &str, bucket: f64) -> String {
    format!("{attribute}_{}", format_bucket(bucket))
}

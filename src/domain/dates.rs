// src/domain/dates.rs

use chrono::{NaiveDate, NaiveDateTime};

/// Day-first format used by the master view and by hand-entered cutoffs.
const DAY_FIRST: &str = "%d/%m/%Y";

/// Normalizes a `DD/MM/YYYY` date that may carry stray whitespace anywhere
/// (`" 05/ 01/2024 "`). Anything else, including ISO dates, is `None`.
pub fn normalize_day_first(raw: &str) -> Option<NaiveDate> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    // chrono accepts single-digit fields; the column contract is two-two-four.
    let mut parts = compact.split('/');
    let shape_ok = matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some(d), Some(m), Some(y), None)
            if d.len() == 2 && m.len() == 2 && y.len() == 4
    );
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(&compact, DAY_FIRST).ok()
}

/// Reads a date column written by the ETL. Most columns are ISO
/// (`2024-01-05` or `2024-01-05 00:00:00`); older rows use day-first text.
pub fn parse_column_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    normalize_day_first(raw)
}

/// `a < b`, false when either side is missing.
pub fn lt(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

/// `a > b`, false when either side is missing.
pub fn gt(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

/// `a >= b`, false when either side is missing.
pub fn ge(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a >= b)
}

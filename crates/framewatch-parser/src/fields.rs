use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::errors::ParserError;

pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    static FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%d-%m-%Y %H:%M:%S",
    ];
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    // Offset-qualified values keep their written wall-clock time.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub(crate) fn parse_view_id(value: &str, line: u64) -> Result<Option<i64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }

    // Spreadsheet exports write integer ids as "3001.0".
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed.fract() == 0.0 => Ok(Some(parsed as i64)),
        _ => Err(ParserError::DataRow {
            line,
            message: format!("ViewID '{trimmed}' is not an integer"),
        }),
    }
}

/// Empty cells become `None`; anything else is kept as written, padding included.
pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_string())
}

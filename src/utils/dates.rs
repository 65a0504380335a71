use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::utils::constants::{DATETIME_FORMATS, DATE_FORMATS};

/// Parse an `ActivityStartDate` cell to a calendar date.
///
/// Datetime values are truncated to their date, since observations compare by
/// the day of the sampling event. `extra_formats` are tried after the built-in
/// ones; a format containing time specifiers is truncated the same way.
pub fn parse_observation_date(raw: &str, extra_formats: &[String]) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }

    extra_formats.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .map(|dt| dt.date())
            })
    })
}

use chrono::NaiveDate;
use thiserror::Error;

/// Canonical wire and storage form for calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("data inválida: {0}")]
pub struct DateError(pub String);

/// Strict boundary normalization for client-supplied dates.
///
/// Accepts the canonical ISO form plus the two Brazilian day-first forms the
/// UI produces, and always yields `YYYY-MM-DD`. Anything else is an error the
/// caller must surface before any storage write happens.
pub fn normalize_date(input: &str) -> Result<String, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError(String::from("(vazia)")));
    }
    for format in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format(ISO_DATE_FORMAT).to_string());
        }
    }
    Err(DateError(trimmed.to_string()))
}

/// Lenient normalization for values read back from storage.
///
/// Date columns may carry a bare date, a `YYYY-MM-DD HH:MM:SS` timestamp, or
/// legacy day-first text. Returns the ISO date prefix, or an empty string
/// when the column holds nothing usable; a row never fails to map because of
/// its date.
#[must_use]
pub fn iso_date_or_empty(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(prefix) = trimmed.get(..10) {
        if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() {
            return prefix.to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%d-%m-%Y") {
            return date.format(ISO_DATE_FORMAT).to_string();
        }
    }
    normalize_date(trimmed).unwrap_or_default()
}

/// Parses a canonical `YYYY-MM-DD` string, e.g. for report grouping.
#[must_use]
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_iso_and_day_first_forms() {
        assert_eq!(normalize_date("2024-03-10").expect("iso"), "2024-03-10");
        assert_eq!(normalize_date("10/03/2024").expect("slash"), "2024-03-10");
        assert_eq!(normalize_date("10-03-2024").expect("dash"), "2024-03-10");
        assert_eq!(normalize_date(" 2024-03-10 ").expect("padded"), "2024-03-10");
    }

    #[test]
    fn normalize_rejects_garbage_and_impossible_dates() {
        assert!(normalize_date("not-a-date").is_err());
        assert!(normalize_date("").is_err());
        assert!(normalize_date("2024-13-40").is_err());
        assert!(normalize_date("32/01/2024").is_err());
    }

    #[test]
    fn row_side_normalization_strips_timestamps() {
        assert_eq!(iso_date_or_empty("2024-03-10 14:22:01"), "2024-03-10");
        assert_eq!(iso_date_or_empty("2024-03-10"), "2024-03-10");
    }

    #[test]
    fn row_side_normalization_flips_legacy_day_first_text() {
        assert_eq!(iso_date_or_empty("10-03-2024"), "2024-03-10");
        assert_eq!(iso_date_or_empty("10/03/2024"), "2024-03-10");
    }

    #[test]
    fn row_side_normalization_defaults_to_empty() {
        assert_eq!(iso_date_or_empty(""), "");
        assert_eq!(iso_date_or_empty("ontem"), "");
    }

    #[test]
    fn parse_iso_date_only_accepts_canonical_form() {
        assert!(parse_iso_date("2024-01-05").is_some());
        assert!(parse_iso_date("05/01/2024").is_none());
        assert!(parse_iso_date("").is_none());
    }
}

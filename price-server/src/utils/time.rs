//! Date helpers
//!
//! All query dates are plain calendar dates; snapshots carry no time
//! component. "Today" is the UTC calendar date.

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Today's UTC calendar date
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2025-05-08").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 8).unwrap()
        );
        assert!(parse_date("2025-13-40").is_err());
        assert!(parse_date("08/05/2025").is_err());
    }
}

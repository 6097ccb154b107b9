use chrono::{Datelike, NaiveDate};

use super::ValidationError;

/// Day/month/year format used for everything the user types or reads.
pub const USER_DATE_FORMAT: &str = "%d/%m/%Y";

/// ISO 8601 calendar date, the persisted form.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `DD/MM/YYYY` string typed by the user.
/// The year must be exactly four digits; chrono's `%Y` alone also takes
/// short and signed years.
pub fn parse_user_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(input.to_string());
    let trimmed = input.trim();

    let year = trimmed.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, USER_DATE_FORMAT).map_err(|_| invalid())
}

/// Render a date back to `DD/MM/YYYY`.
pub fn format_user_date(date: NaiveDate) -> String {
    date.format(USER_DATE_FORMAT).to_string()
}

/// Convert a user-format date string into its ISO form.
pub fn user_to_iso(input: &str) -> Result<String, ValidationError> {
    parse_user_date(input).map(format_iso_date)
}

pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Move a date by whole years keeping month and day.
/// 29 February lands on 28 February when the target year is not a leap year.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    date.with_year(year)
        .or_else(|| date.with_day(28).and_then(|d| d.with_year(year)))
}

/// Closed interval of due dates used to filter listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidRange {
                start: format_user_date(start),
                end: format_user_date(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Build a range from two `DD/MM/YYYY` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_user_date(start)?, parse_user_date(end)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_user_date_roundtrip() {
        let parsed = parse_user_date("15/03/2025").unwrap();
        assert_eq!(parsed, date(2025, 3, 15));
        assert_eq!(format_iso_date(parsed), "2025-03-15");
        assert_eq!(user_to_iso("15/03/2025").unwrap(), "2025-03-15");
        assert_eq!(
            format_user_date(parse_iso_date("2025-03-15").unwrap()),
            "15/03/2025"
        );
    }

    #[test]
    fn test_invalid_user_date() {
        let err = parse_user_date("2025-03-15").unwrap_err();
        assert!(err.to_string().contains("DD/MM/YYYY"));
        assert!(parse_user_date("31/02/2025").is_err());
        assert!(parse_user_date("").is_err());
    }

    #[test]
    fn test_user_date_needs_four_digit_year() {
        for input in ["01/01/25", "01/01/-5", "01/01/+2025", "01/01/12025", "01/01/ 2025"] {
            assert_eq!(
                parse_user_date(input),
                Err(ValidationError::InvalidDate(input.to_string())),
                "{input}"
            );
        }
        assert_eq!(parse_user_date("01/01/0999"), Ok(date(999, 1, 1)));
        assert_eq!(format_iso_date(date(999, 1, 1)), "0999-01-01");
    }

    #[test]
    fn test_add_years() {
        assert_eq!(add_years(date(2025, 3, 15), 4), Some(date(2029, 3, 15)));
        assert_eq!(add_years(date(2024, 2, 29), 1), Some(date(2025, 2, 28)));
        assert_eq!(add_years(date(2024, 2, 29), 4), Some(date(2028, 2, 29)));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::parse("01/01/2025", "31/01/2025").unwrap();
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
        assert!(!range.contains(date(2024, 12, 31)));

        let single_day = DateRange::new(date(2025, 1, 1), date(2025, 1, 1));
        assert!(single_day.is_ok());
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = DateRange::parse("31/01/2025", "01/01/2025").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }
}

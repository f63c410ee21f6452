//! Calendar arithmetic and the `dd-mm-yyyy` field format.
//!
//! Months are 0-based everywhere in this crate (January = 0), matching the
//! `data-month` attributes written into the markup.

use chrono::{Datelike, NaiveDate};

use crate::error::DateParseError;

/// Short month names shown in the month selector.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Maa", "Apr", "Mei", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dec",
];

/// Weekday column headers, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["M", "D", "W", "D", "V", "Z", "Z"];

/// Sunday-first weekday index -> Monday-first column index.
const MONDAY_FIRST: [u32; 7] = [6, 0, 1, 2, 3, 4, 5];

pub fn is_leap_year(year: i32) -> bool {
    if year % 100 == 0 {
        year % 400 == 0
    } else {
        year % 4 == 0
    }
}

/// Number of days in the given 0-based month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Blank cells before day 1 in a Monday-first grid.
pub fn row_padding(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|first| MONDAY_FIRST[first.weekday().num_days_from_sunday() as usize])
        .unwrap_or(0)
}

/// Formats a day, 0-based month and year as `dd-mm-yyyy`.
pub fn format_date(day: u32, month: u32, year: i32) -> String {
    format!("{:02}-{:02}-{:04}", day, month + 1, year)
}

/// Parses the text of a bound field.
///
/// Components out of range are rejected instead of rolling over into the next
/// month or year.
pub fn parse_field_value(value: &str) -> Result<NaiveDate, DateParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DateParseError::Empty);
    }

    let parts: Vec<&str> = value.split('-').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(DateParseError::Malformed {
            value: value.to_string(),
        });
    };

    let day: u32 = parse_part(day)?;
    let month: u32 = parse_part(month)?;
    let year: i32 = parse_part(year)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::OutOfRange { day, month, year })
}

fn parse_part<T: std::str::FromStr>(part: &str) -> Result<T, DateParseError> {
    part.parse().map_err(|_| DateParseError::NotANumber {
        part: part.to_string(),
    })
}

/// Looks up a short month name, ignoring case. Returns the 0-based month.
pub fn month_from_short_name(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(2024, true)]
    #[case(2023, false)]
    #[case(1900, false)]
    #[case(2000, true)]
    #[case(2100, false)]
    #[case(1600, true)]
    #[case(-4, true)]
    fn test_is_leap_year(#[case] year: i32, #[case] expected: bool) {
        assert_eq!(is_leap_year(year), expected);
    }

    #[test]
    fn test_leap_year_matches_gregorian_rule() {
        for year in -500..3000 {
            let gregorian = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
            assert_eq!(is_leap_year(year), gregorian, "year {}", year);
        }
    }

    #[test]
    fn test_days_in_month_agrees_with_chrono() {
        for year in [1900, 1999, 2000, 2023, 2024] {
            for month in 0..12 {
                let days = days_in_month(year, month);
                assert!((28..=31).contains(&days));
                assert!(NaiveDate::from_ymd_opt(year, month + 1, days).is_some());
                assert!(NaiveDate::from_ymd_opt(year, month + 1, days + 1).is_none());
            }
        }
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
    }

    #[rstest]
    // January 2024 starts on a Monday
    #[case(2024, 0, 0)]
    // September 2024 starts on a Sunday
    #[case(2024, 8, 6)]
    // February 2024 starts on a Thursday
    #[case(2024, 1, 3)]
    fn test_row_padding(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(row_padding(year, month), expected);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(10, 1, 2024), "10-02-2024");
        assert_eq!(format_date(1, 0, 2023), "01-01-2023");
        assert_eq!(format_date(31, 11, 1999), "31-12-1999");
        assert_eq!(format_date(15, 9, 2024), "15-10-2024");
    }

    #[test]
    fn test_parse_field_value() {
        assert_eq!(
            parse_field_value("29-02-2024"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert_eq!(
            parse_field_value(" 5-3-2024 "),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert_eq!(parse_field_value(""), Err(DateParseError::Empty));
        assert_eq!(parse_field_value("   "), Err(DateParseError::Empty));
        assert!(matches!(
            parse_field_value("2024/02/10"),
            Err(DateParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_field_value("10-02-2024-1"),
            Err(DateParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_field_value("aa-02-2024"),
            Err(DateParseError::NotANumber { .. })
        ));
        assert_eq!(
            parse_field_value("05-13-2023"),
            Err(DateParseError::OutOfRange {
                day: 5,
                month: 13,
                year: 2023
            })
        );
        assert!(parse_field_value("29-02-2023").is_err());
    }

    #[test]
    fn test_parse_then_format_round_trips() {
        let mut date = NaiveDate::from_ymd_opt(1999, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2001, 3, 31).unwrap();
        while date <= end {
            let text = format_date(date.day(), date.month0(), date.year());
            let parsed = parse_field_value(&text).unwrap();
            assert_eq!(format_date(parsed.day(), parsed.month0(), parsed.year()), text);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_month_from_short_name() {
        assert_eq!(month_from_short_name("Jan"), Some(0));
        assert_eq!(month_from_short_name("mei"), Some(4));
        assert_eq!(month_from_short_name("OKT"), Some(9));
        assert_eq!(month_from_short_name("May"), None);
    }
}

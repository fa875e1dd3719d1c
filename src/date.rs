//! Date codec for the `DD.MM.YYYY` wire and display format
//!
//! Dates are entered, stored, and rendered in the dotted Russian convention.
//! Month filtering accepts either a number or a Russian month name.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Fixed table of Russian month names to two-digit month codes.
const MONTHS: [(&str, &str); 12] = [
    ("январь", "01"),
    ("февраль", "02"),
    ("март", "03"),
    ("апрель", "04"),
    ("май", "05"),
    ("июнь", "06"),
    ("июль", "07"),
    ("август", "08"),
    ("сентябрь", "09"),
    ("октябрь", "10"),
    ("ноябрь", "11"),
    ("декабрь", "12"),
];

/// Parse a `DD.MM.YYYY` string into a calendar date.
///
/// The text must split on `.` into exactly three integer parts, read as day,
/// month, year. Unpadded parts (`1.1.1990`) are accepted. Impossible dates
/// (month 13, day 32, Feb 30) are rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let mut parts = text.split('.');
    let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y), None) => (d, m, y),
        _ => return Err(Error::invalid_date(text)),
    };

    let day: u32 = day.parse().map_err(|_| Error::invalid_date(text))?;
    let month: u32 = month.parse().map_err(|_| Error::invalid_date(text))?;
    let year: i32 = year.parse().map_err(|_| Error::invalid_date(text))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::invalid_date(text))
}

/// Format a date as `DD.MM.YYYY` (zero-padded day and month, 4-digit year).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Normalize user month input to a two-digit month code.
///
/// Alphabetic input is lowercased and looked up in the Russian month table;
/// a miss leaves the input unchanged. A single-character result is
/// left-padded with `0`. Numeric input is not range-checked: `"13"` passes
/// through as-is and simply matches nobody downstream.
pub fn normalize_month(input: &str) -> String {
    let mut month = input.to_string();

    if !month.is_empty() && month.chars().all(char::is_alphabetic) {
        let lowered = month.to_lowercase();
        if let Some((_, code)) = MONTHS.iter().find(|(name, _)| *name == lowered) {
            month = (*code).to_string();
        }
    }

    // Character count, not bytes: Cyrillic input stays intact.
    if month.chars().count() == 1 {
        format!("0{month}")
    } else {
        month
    }
}

/// Serde adapter serializing a `NaiveDate` as a `DD.MM.YYYY` string.
///
/// Used via `#[serde(with = "date::serde_dotted")]` on the birth field.
pub mod serde_dotted {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_date("15.03.1990").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_unpadded_date() {
        let date = parse_date("1.1.1990").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(parse_date("32.01.1990").is_err());
        assert!(parse_date("01.13.1990").is_err());
        assert!(parse_date("30.02.1990").is_err());
    }

    #[test]
    fn test_parse_accepts_leap_day() {
        assert!(parse_date("29.02.2000").is_ok());
        assert!(parse_date("29.02.1900").is_err());
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        assert!(parse_date("aa.01.1990").is_err());
        assert!(parse_date("01.bb.1990").is_err());
        assert!(parse_date("01.01.year").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_part_count() {
        assert!(parse_date("01.1990").is_err());
        assert!(parse_date("01.01.1990.05").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_error_code() {
        let err = parse_date("nonsense").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidDate);
    }

    #[test]
    fn test_format_zero_pads() {
        let date = NaiveDate::from_ymd_opt(1990, 3, 5).unwrap();
        assert_eq!(format_date(date), "05.03.1990");
    }

    #[test]
    fn test_format_parse_round_trip() {
        for text in ["01.01.2077", "29.02.2000", "31.12.1999", "15.03.1990"] {
            assert_eq!(format_date(parse_date(text).unwrap()), text);
        }
    }

    #[test]
    fn test_normalize_month_names() {
        assert_eq!(normalize_month("январь"), "01");
        assert_eq!(normalize_month("Январь"), "01");
        assert_eq!(normalize_month("март"), "03");
        assert_eq!(normalize_month("декабрь"), "12");
    }

    #[test]
    fn test_normalize_month_numbers() {
        assert_eq!(normalize_month("1"), "01");
        assert_eq!(normalize_month("9"), "09");
        assert_eq!(normalize_month("12"), "12");
    }

    #[test]
    fn test_normalize_month_miss_passthrough() {
        // Unknown names and out-of-range numbers pass through unchanged
        assert_eq!(normalize_month("brumaire"), "brumaire");
        assert_eq!(normalize_month("13"), "13");
        assert_eq!(normalize_month(""), "");
    }

    #[test]
    fn test_serde_dotted_round_trip() {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Wrapper {
            #[serde(with = "serde_dotted")]
            birth: NaiveDate,
        }

        let value = Wrapper {
            birth: NaiveDate::from_ymd_opt(1991, 3, 20).unwrap(),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert!(json.contains("20.03.1991"));
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_serde_dotted_rejects_bad_date() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        struct Wrapper {
            #[serde(with = "serde_dotted")]
            #[allow(dead_code)]
            birth: NaiveDate,
        }

        let result: std::result::Result<Wrapper, _> =
            serde_json::from_str(r#"{"birth": "30.02.1990"}"#);
        assert!(result.is_err());
    }
}

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Date notations seen in school admission data, in the order they are tried.
/// Digits are ASCII only; full-width digits are not a date.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // 2025-1-2, 2025/01/02, optionally followed by a time of day
        r"^([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})(?:\s+[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2})?$",
        // 2025.1.2
        r"^([0-9]{4})\.([0-9]{1,2})\.([0-9]{1,2})(?:\s+[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2})?$",
        // 2025年1月2日
        r"^([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日$",
        // 20250102
        r"^([0-9]{4})([0-9]{2})([0-9]{2})$",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("date pattern compiles"))
    .collect()
});

/// Parses a human-entered date into a calendar date.
///
/// Returns `None` for blank input, unknown notations, and numbers that do not
/// form a real calendar date (`2025-02-30`, year 0). Never guesses a date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.captures(trimmed))
        .find_map(|caps| date_from_captures(&caps))
        .or_else(|| parse_strict(trimmed))
        .filter(|date| date.year() >= FIRST_CALENDAR_YEAR)
}

/// The Gregorian calendar has no year 0.
const FIRST_CALENDAR_YEAR: i32 = 1;

fn date_from_captures(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;
    if year < FIRST_CALENDAR_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_strict(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn parses_every_supported_notation() {
        let expected = ymd(2025, 1, 2);
        for raw in [
            "2025-1-2",
            "2025-01-02",
            "2025/1/2",
            "2025-1-2 00:00:00",
            "2025.1.2",
            "2025.01.02 08:30:00",
            "2025年1月2日",
            "20250102",
            "  2025-01-02  ",
        ] {
            assert_eq!(parse_date(raw), Some(expected), "parsing {raw:?}");
        }
    }

    #[test]
    fn round_trips_each_encoding_across_the_calendar() {
        let mut date = ymd(2024, 1, 1);
        let last = ymd(2025, 12, 31);
        while date <= last {
            let encodings = [
                date.format("%Y-%-m-%-d").to_string(),
                date.format("%Y/%-m/%-d").to_string(),
                date.format("%Y.%-m.%-d").to_string(),
                date.format("%Y年%-m月%-d日").to_string(),
                date.format("%Y%m%d").to_string(),
                date.and_hms_opt(0, 0, 0)
                    .expect("midnight exists")
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            ];
            for encoded in &encodings {
                assert_eq!(parse_date(encoded), Some(date), "parsing {encoded:?}");
            }
            date = date.succ_opt().expect("next day exists");
        }
    }

    #[test]
    fn rejects_impossible_or_unknown_dates() {
        for raw in [
            "2025-13-01",
            "2025-02-30",
            "2025年2月30日",
            "20251301",
            "2025.4.31",
            "not-a-date",
            "",
            "   ",
            "开放申请",
            "每年9月",
            "2025-1-2T00:00:00",
            "0000-01-01",
            "00000101",
            "0000年1月1日",
        ] {
            assert_eq!(parse_date(raw), None, "parsing {raw:?}");
        }
    }

    #[test]
    fn full_width_digits_are_not_dates() {
        for raw in ["２０２５-９-１", "２０２５年９月１日", "２０２５０９０１"] {
            assert_eq!(parse_date(raw), None, "parsing {raw:?}");
        }
    }

    #[test]
    fn leap_day_only_parses_in_leap_years() {
        assert_eq!(parse_date("2024-2-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_date("2025-2-29"), None);
    }
}

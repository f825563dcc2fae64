use super::date::parse_date;
use chrono::Datelike;

/// Renders an admission period for listings, e.g. `2025.9.1-2025.9.30`.
///
/// Text that is not a date (such as "开放申请") is shown as entered.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    let Some(start) = start.filter(|value| !value.trim().is_empty()) else {
        return "-".to_string();
    };
    let Some(end) = end.filter(|value| !value.trim().is_empty()) else {
        return start.to_string();
    };

    match (format_side(start), format_side(end)) {
        (None, None) => start.to_string(),
        (start_text, end_text) => format!(
            "{}-{}",
            start_text.unwrap_or_else(|| start.to_string()),
            end_text.unwrap_or_else(|| end.to_string())
        ),
    }
}

fn format_side(text: &str) -> Option<String> {
    parse_date(text).map(|date| format!("{}.{}.{}", date.year(), date.month(), date.day()))
}

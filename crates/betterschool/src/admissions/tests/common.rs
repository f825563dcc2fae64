use chrono::{Duration, NaiveDate};

use crate::admissions::{
    evaluate_window, AdmissionFields, AdmissionStatus, AdmissionWindow, StatusPolicy,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 25).expect("valid date")
}

pub(super) fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Renders a date the way school staff usually type it.
pub(super) fn text(date: NaiveDate) -> String {
    date.format("%Y-%-m-%-d").to_string()
}

pub(super) fn window_status(start: Option<&str>, end: Option<&str>) -> AdmissionStatus {
    status_on(start, end, today())
}

pub(super) fn status_on(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> AdmissionStatus {
    let window = AdmissionWindow::from_text(start, end);
    evaluate_window(&window, today, &StatusPolicy::default()).status
}

pub(super) fn fields(pairs: &[(&str, &str)]) -> AdmissionFields {
    pairs.iter().copied().collect()
}

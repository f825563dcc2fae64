use super::policy::StatusPolicy;
use super::signal::{classify, FieldSignal};
use super::status::AdmissionStatus;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One application period, rebuilt from raw text for every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionWindow {
    pub start: FieldSignal,
    pub end: FieldSignal,
    pub raw_start_text: Option<String>,
    pub raw_end_text: Option<String>,
}

impl AdmissionWindow {
    pub fn from_text(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: classify(start),
            end: classify(end),
            raw_start_text: non_blank(start),
            raw_end_text: non_blank(end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == FieldSignal::Missing && self.end == FieldSignal::Missing
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// The rule that settled a window's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRule {
    ClosedPhrase,
    OpenPhraseUntilEnd,
    OpenPhraseOpenEnded,
    RecurringMonth,
    DateRange,
    RollingWindow,
    EndDateOnly,
    InsufficientData,
}

impl WindowRule {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::ClosedPhrase => "marked as not open",
            Self::OpenPhraseUntilEnd => "marked open with an end date",
            Self::OpenPhraseOpenEnded => "marked open with no end date",
            Self::RecurringMonth => "recurring month matches today",
            Self::DateRange => "start and end dates",
            Self::RollingWindow => "start date with rolling window",
            Self::EndDateOnly => "end date only",
            Self::InsufficientData => "no usable dates",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowVerdict {
    pub status: AdmissionStatus,
    pub rule: WindowRule,
}

impl WindowVerdict {
    const fn new(status: AdmissionStatus, rule: WindowRule) -> Self {
        Self { status, rule }
    }
}

/// Decides the status of a single window as of `today`.
///
/// Rules run in a fixed order and the first one that applies wins, so an
/// expired end date beats an "open" phrase and a "not open" phrase beats both.
pub fn evaluate_window(
    window: &AdmissionWindow,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> WindowVerdict {
    let verdict = decide(window.start, window.end, today, policy);
    debug!(
        start = window.raw_start_text.as_deref().unwrap_or("-"),
        end = window.raw_end_text.as_deref().unwrap_or("-"),
        %today,
        status = %verdict.status,
        rule = verdict.rule.describe(),
        "admission window evaluated"
    );
    verdict
}

fn decide(
    start: FieldSignal,
    end: FieldSignal,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> WindowVerdict {
    if start == FieldSignal::ClosedPhrase || end == FieldSignal::ClosedPhrase {
        return WindowVerdict::new(AdmissionStatus::Closed, WindowRule::ClosedPhrase);
    }

    if start == FieldSignal::OpenPhrase {
        return match end.date() {
            Some(end) => {
                WindowVerdict::new(until_end(end, today, policy), WindowRule::OpenPhraseUntilEnd)
            }
            None => WindowVerdict::new(AdmissionStatus::Open, WindowRule::OpenPhraseOpenEnded),
        };
    }

    if let FieldSignal::RecurringMonth(month) = start {
        if today.month() == month {
            return WindowVerdict::new(AdmissionStatus::Open, WindowRule::RecurringMonth);
        }
    }

    match (start.date(), end.date()) {
        (Some(start), Some(end)) => {
            let status = if start <= today && today <= end {
                open_or_deadline(end, today, policy)
            } else {
                AdmissionStatus::Closed
            };
            WindowVerdict::new(status, WindowRule::DateRange)
        }
        (Some(start), None) => {
            let days_since_start = (today - start).num_days();
            let status = if (0..=policy.rolling_window_days).contains(&days_since_start) {
                AdmissionStatus::Open
            } else {
                AdmissionStatus::Closed
            };
            WindowVerdict::new(status, WindowRule::RollingWindow)
        }
        // A lone end date is read as an implicit open period up to that date.
        (None, Some(end)) => {
            WindowVerdict::new(until_end(end, today, policy), WindowRule::EndDateOnly)
        }
        (None, None) => WindowVerdict::new(AdmissionStatus::Unknown, WindowRule::InsufficientData),
    }
}

fn until_end(end: NaiveDate, today: NaiveDate, policy: &StatusPolicy) -> AdmissionStatus {
    if today <= end {
        open_or_deadline(end, today, policy)
    } else {
        AdmissionStatus::Closed
    }
}

fn open_or_deadline(end: NaiveDate, today: NaiveDate, policy: &StatusPolicy) -> AdmissionStatus {
    if (end - today).num_days() <= policy.deadline_threshold_days {
        AdmissionStatus::Deadline
    } else {
        AdmissionStatus::Open
    }
}

//! Admission-status inference.
//!
//! Raw field text is classified once into [`FieldSignal`]s, each admission
//! window is evaluated against an explicit `today`, and the per-window results
//! are aggregated into a single [`AdmissionStatus`].

mod clock;
mod date;
mod display;
pub mod fields;
mod phrase;
mod policy;
mod signal;
mod status;
mod window;

#[cfg(test)]
mod tests;

pub use clock::{hong_kong_today, HONG_KONG_UTC_OFFSET_HOURS};
pub use date::parse_date;
pub use display::format_date_range;
pub use fields::AdmissionFields;
pub use phrase::{is_closed_phrase, is_open_phrase, month_from_recurring_phrase};
pub use policy::{StatusPolicy, DEFAULT_DEADLINE_THRESHOLD_DAYS, DEFAULT_ROLLING_WINDOW_DAYS};
pub use signal::{classify, FieldSignal};
pub use status::{AdmissionStatus, UnknownStatusError};
pub use window::{evaluate_window, AdmissionWindow, WindowRule, WindowVerdict};

use crate::records::SchoolRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Which admission process a status describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionTrack {
    /// Primary-one or secondary-one intake: a single window.
    FirstGrade,
    /// Transfer (插班) intake: up to two independent windows.
    Transfer,
}

impl AdmissionTrack {
    pub const fn ordered() -> [Self; 2] {
        [Self::FirstGrade, Self::Transfer]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstGrade => "First-grade admission",
            Self::Transfer => "Transfer admission",
        }
    }

    /// Builds this track's windows from a school's raw fields.
    pub fn windows(self, raw: &AdmissionFields) -> Vec<AdmissionWindow> {
        match self {
            Self::FirstGrade => vec![AdmissionWindow::from_text(
                raw.first_of(&fields::FIRST_GRADE_START_FIELDS),
                raw.first_of(&fields::FIRST_GRADE_END_FIELDS),
            )],
            Self::Transfer => fields::TRANSFER_WINDOW_FIELDS
                .iter()
                .map(|(start, end)| AdmissionWindow::from_text(raw.get(start), raw.get(end)))
                .collect(),
        }
    }
}

impl fmt::Display for AdmissionTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstGrade => "first-grade",
            Self::Transfer => "transfer",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown admission track '{0}' (expected first-grade or transfer)")]
pub struct UnknownTrackError(pub String);

impl FromStr for AdmissionTrack {
    type Err = UnknownTrackError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first-grade" | "first_grade" | "p1" | "s1" => Ok(Self::FirstGrade),
            "transfer" => Ok(Self::Transfer),
            _ => Err(UnknownTrackError(value.to_string())),
        }
    }
}

/// Per-window outcome kept alongside the final status for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowAssessment {
    pub window: AdmissionWindow,
    pub status: AdmissionStatus,
    pub rule: WindowRule,
}

/// Final status for one track of one school, with the decision trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionAssessment {
    pub track: AdmissionTrack,
    pub today: NaiveDate,
    pub status: AdmissionStatus,
    pub windows: Vec<WindowAssessment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordAssessment<'a> {
    pub name: &'a str,
    pub assessment: AdmissionAssessment,
}

/// Counts of records per status for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub open: usize,
    pub deadline: usize,
    pub closed: usize,
    pub unknown: usize,
}

impl StatusTally {
    pub fn record(&mut self, status: AdmissionStatus) {
        match status {
            AdmissionStatus::Open => self.open += 1,
            AdmissionStatus::Deadline => self.deadline += 1,
            AdmissionStatus::Closed => self.closed += 1,
            AdmissionStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, status: AdmissionStatus) -> usize {
        match status {
            AdmissionStatus::Open => self.open,
            AdmissionStatus::Deadline => self.deadline,
            AdmissionStatus::Closed => self.closed,
            AdmissionStatus::Unknown => self.unknown,
        }
    }

    /// Schools currently accepting applications, closing soon included.
    pub fn accepting(&self) -> usize {
        self.open + self.deadline
    }

    pub fn total(&self) -> usize {
        self.open + self.deadline + self.closed + self.unknown
    }
}

impl<'r, 'a: 'r> FromIterator<&'r RecordAssessment<'a>> for StatusTally {
    fn from_iter<I: IntoIterator<Item = &'r RecordAssessment<'a>>>(iter: I) -> Self {
        let mut tally = Self::default();
        for entry in iter {
            tally.record(entry.assessment.status);
        }
        tally
    }
}

/// Stateless evaluator applying a [`StatusPolicy`] to school records.
#[derive(Debug, Clone, Default)]
pub struct AdmissionStatusEngine {
    policy: StatusPolicy,
}

impl AdmissionStatusEngine {
    pub fn new(policy: StatusPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    pub fn first_grade_status(
        &self,
        fields: &AdmissionFields,
        today: NaiveDate,
    ) -> AdmissionAssessment {
        self.assess(AdmissionTrack::FirstGrade, fields, today)
    }

    pub fn transfer_status(
        &self,
        fields: &AdmissionFields,
        today: NaiveDate,
    ) -> AdmissionAssessment {
        self.assess(AdmissionTrack::Transfer, fields, today)
    }

    pub fn assess(
        &self,
        track: AdmissionTrack,
        fields: &AdmissionFields,
        today: NaiveDate,
    ) -> AdmissionAssessment {
        let windows: Vec<WindowAssessment> = track
            .windows(fields)
            .into_iter()
            .map(|window| {
                let verdict = evaluate_window(&window, today, &self.policy);
                WindowAssessment {
                    window,
                    status: verdict.status,
                    rule: verdict.rule,
                }
            })
            .collect();

        let status = AdmissionStatus::aggregate(windows.iter().map(|entry| entry.status));

        AdmissionAssessment {
            track,
            today,
            status,
            windows,
        }
    }

    /// Evaluates every record against the same `today`.
    pub fn assess_records<'a>(
        &self,
        records: &'a [SchoolRecord],
        track: AdmissionTrack,
        today: NaiveDate,
    ) -> Vec<RecordAssessment<'a>> {
        let assessments: Vec<RecordAssessment<'a>> = records
            .iter()
            .map(|record| RecordAssessment {
                name: record.name.as_str(),
                assessment: self.assess(track, &record.fields, today),
            })
            .collect();

        let tally: StatusTally = assessments.iter().collect();
        info!(
            %track,
            %today,
            records = tally.total(),
            open = tally.open,
            deadline = tally.deadline,
            closed = tally.closed,
            unknown = tally.unknown,
            "admission statuses computed"
        );

        assessments
    }
}

/// Keeps the records whose final status is `status`, preserving input order.
pub fn filter_by_status(
    assessments: Vec<RecordAssessment<'_>>,
    status: AdmissionStatus,
) -> Vec<RecordAssessment<'_>> {
    assessments
        .into_iter()
        .filter(|entry| entry.assessment.status == status)
        .collect()
}

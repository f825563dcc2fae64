use crate::infra::{prepare, PolicyArgs};
use betterschool::admissions::{
    classify, evaluate_window, filter_by_status, format_date_range, AdmissionStatus,
    AdmissionStatusEngine, AdmissionTrack, AdmissionWindow, FieldSignal, RecordAssessment,
    StatusPolicy, StatusTally, WindowRule,
};
use betterschool::error::AppError;
use betterschool::records::{RecordFormat, SchoolRecordImporter};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// School export to read (.json or .csv)
    pub(crate) input: PathBuf,
    /// Force the input format instead of using the file extension
    #[arg(long)]
    pub(crate) format: Option<RecordFormat>,
    /// Only evaluate one track (first-grade or transfer)
    #[arg(long)]
    pub(crate) track: Option<AdmissionTrack>,
    /// Only list schools with this status (open, deadline, closed, unknown)
    #[arg(long)]
    pub(crate) status: Option<AdmissionStatus>,
    /// Print JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Raw start text, e.g. "2025-09-01" or "现正接受申请"
    #[arg(long)]
    pub(crate) start: Option<String>,
    /// Raw end text
    #[arg(long)]
    pub(crate) end: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) today: NaiveDate,
    pub(crate) policy: StatusPolicy,
    pub(crate) tracks: Vec<TrackReport>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackReport {
    pub(crate) track: AdmissionTrack,
    pub(crate) tally: StatusTally,
    pub(crate) schools: Vec<SchoolStatusView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SchoolStatusView {
    pub(crate) name: String,
    pub(crate) status: AdmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) badge: Option<&'static str>,
    pub(crate) windows: Vec<WindowView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WindowView {
    pub(crate) period: String,
    pub(crate) status: AdmissionStatus,
    pub(crate) rule: WindowRule,
}

impl From<RecordAssessment<'_>> for SchoolStatusView {
    fn from(entry: RecordAssessment<'_>) -> Self {
        let status = entry.assessment.status;
        let windows = entry
            .assessment
            .windows
            .into_iter()
            .filter(|window| !window.window.is_empty())
            .map(|window| WindowView {
                period: format_date_range(
                    window.window.raw_start_text.as_deref(),
                    window.window.raw_end_text.as_deref(),
                ),
                status: window.status,
                rule: window.rule,
            })
            .collect();

        Self {
            name: entry.name.to_string(),
            status,
            badge: status.badge(),
            windows,
        }
    }
}

pub(crate) fn run_evaluate(policy: &PolicyArgs, args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        format,
        track,
        status,
        json,
    } = args;

    let context = prepare(policy)?;
    let records = SchoolRecordImporter::from_path(&input, format)?;
    info!(input = %input.display(), records = records.len(), "school export loaded");
    let engine = AdmissionStatusEngine::new(context.policy);

    let tracks = match track {
        Some(track) => vec![track],
        None => AdmissionTrack::ordered().to_vec(),
    };

    let reports = tracks
        .into_iter()
        .map(|track| {
            let assessments = engine.assess_records(&records, track, context.today);
            let tally: StatusTally = assessments.iter().collect();
            let assessments = match status {
                Some(status) => filter_by_status(assessments, status),
                None => assessments,
            };
            TrackReport {
                track,
                tally,
                schools: assessments.into_iter().map(SchoolStatusView::from).collect(),
            }
        })
        .collect();

    let response = EvaluateResponse {
        today: context.today,
        policy: *engine.policy(),
        tracks: reports,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        render_evaluation(&response);
    }

    Ok(())
}

fn render_evaluation(response: &EvaluateResponse) {
    println!(
        "Admission statuses as of {} (closing soon within {} days, rolling window {} days)",
        response.today,
        response.policy.deadline_threshold_days,
        response.policy.rolling_window_days
    );

    for report in &response.tracks {
        println!("\n{}", report.track.label());
        if report.schools.is_empty() {
            println!("- no matching schools");
        }
        for school in &report.schools {
            let periods: Vec<&str> = school
                .windows
                .iter()
                .map(|window| window.period.as_str())
                .filter(|period| *period != "-")
                .collect();
            let badge = school.badge.unwrap_or("No status");
            if periods.is_empty() {
                println!("- {}: {}", school.name, badge);
            } else {
                println!("- {}: {} [{}]", school.name, badge, periods.join(", "));
            }
        }
        let tally = &report.tally;
        println!(
            "Summary: {} open, {} closing soon, {} closed, {} unknown ({} schools)",
            tally.open,
            tally.deadline,
            tally.closed,
            tally.unknown,
            tally.total()
        );
    }
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    today: NaiveDate,
    start: FieldSignal,
    end: FieldSignal,
    status: AdmissionStatus,
    rule: WindowRule,
}

pub(crate) fn run_check(policy: &PolicyArgs, args: CheckArgs) -> Result<(), AppError> {
    let context = prepare(policy)?;
    let window = AdmissionWindow::from_text(args.start.as_deref(), args.end.as_deref());
    let verdict = evaluate_window(&window, context.today, &context.policy);

    if args.json {
        let response = CheckResponse {
            today: context.today,
            start: window.start,
            end: window.end,
            status: verdict.status,
            rule: verdict.rule,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Evaluated {}", context.today);
    println!("- start: {}", describe_signal(window.start));
    println!("- end: {}", describe_signal(window.end));
    println!(
        "Status: {} ({})",
        verdict.status.label(),
        verdict.rule.describe()
    );
    Ok(())
}

pub(crate) fn run_parse_date(values: &[String]) {
    for value in values {
        println!("{} -> {}", value, describe_signal(classify(Some(value.as_str()))));
    }
}

fn describe_signal(signal: FieldSignal) -> String {
    match signal {
        FieldSignal::Date(date) => format!("date {}", date),
        FieldSignal::RecurringMonth(month) => format!("recurring every year in month {}", month),
        other => other.label().to_string(),
    }
}

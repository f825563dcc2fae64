use betterschool::admissions::{hong_kong_today, StatusPolicy};
use betterschool::config::AppConfig;
use betterschool::error::AppError;
use betterschool::telemetry;
use chrono::{NaiveDate, Utc};

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Default, Clone)]
pub(crate) struct PolicyArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today in Hong Kong.
    #[arg(long, global = true, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Override the closing-soon threshold in days
    #[arg(long, global = true)]
    pub(crate) deadline_days: Option<u32>,
    /// Override how long a start date without an end date stays open
    #[arg(long, global = true)]
    pub(crate) rolling_days: Option<u32>,
    /// Log level used when RUST_LOG is not set (e.g. debug)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,
}

/// Everything a command needs once configuration has been resolved.
pub(crate) struct Context {
    pub(crate) policy: StatusPolicy,
    pub(crate) today: NaiveDate,
}

pub(crate) fn prepare(args: &PolicyArgs) -> Result<Context, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, args.log_level.as_deref())?;

    Ok(Context {
        policy: apply_overrides(config.policy, args),
        today: args.today.unwrap_or_else(|| hong_kong_today(Utc::now())),
    })
}

pub(crate) fn apply_overrides(mut policy: StatusPolicy, args: &PolicyArgs) -> StatusPolicy {
    if let Some(days) = args.deadline_days {
        policy.deadline_threshold_days = i64::from(days);
    }
    if let Some(days) = args.rolling_days {
        policy.rolling_window_days = i64::from(days);
    }
    policy
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

use crate::commands::{run_check, run_evaluate, run_parse_date, CheckArgs, EvaluateArgs};
use crate::infra::PolicyArgs;
use betterschool::error::AppError;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "betterschool",
    about = "Work out admission statuses for Hong Kong school listings",
    version
)]
struct Cli {
    #[command(flatten)]
    policy: PolicyArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every school in a JSON or CSV export
    Evaluate(EvaluateArgs),
    /// Evaluate a single admission window given as raw text
    Check(CheckArgs),
    /// Show how date text is understood
    ParseDate {
        /// Raw date strings, e.g. "2025年9月1日"
        #[arg(required = true)]
        values: Vec<String>,
    },
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate(args) => run_evaluate(&cli.policy, args),
        Command::Check(args) => run_check(&cli.policy, args),
        Command::ParseDate { values } => {
            run_parse_date(&values);
            Ok(())
        }
    }
}

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::config::AuditConfig;
use crate::db::{check_connection, inspect_views, Database};
use crate::domain::conflict::ReportPolicy;
use crate::job::{run_job, RunStatus};
use crate::mailer::BrevoMailer;
use crate::notifier::{DryRunNotifier, Notifier};

mod config;
mod db;
mod domain;
mod errors;
mod job;
mod mailer;
mod notifier;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

/// Finds reservations left on properties that are being offboarded and mails them out.
#[derive(Parser)]
#[command(name = "offboarding-audit", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the audit (default).
    Run(RunArgs),
    /// Open the database and print the SQLite version.
    CheckConnection,
    /// Print the columns of every table the audit reads.
    Inspect,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Include finished stays and expired cutoffs.
    #[arg(long)]
    historical: bool,

    /// With --historical, ignore stays that checked out more than N days ago.
    #[arg(long, value_name = "N", requires = "historical")]
    lookback_days: Option<u32>,

    /// Reference date (YYYY-MM-DD). Defaults to the local date.
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Write report.html and report.xlsx to DIR instead of sending email.
    #[arg(long, value_name = "DIR")]
    dry_run: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// CLI flags win over the environment; an env-configured look-back survives `--historical`.
fn resolve_policy(base: ReportPolicy, args: &RunArgs) -> ReportPolicy {
    let base_lookback = match base {
        ReportPolicy::Historical { lookback_days } => lookback_days,
        ReportPolicy::Actionable => None,
    };

    if args.historical {
        ReportPolicy::Historical {
            lookback_days: args.lookback_days.or(base_lookback),
        }
    } else {
        base
    }
}

fn run(config: &AuditConfig, db: &Database, args: RunArgs) -> ExitCode {
    let policy = resolve_policy(config.policy, &args);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let notifier: Box<dyn Notifier> = match args.dry_run {
        Some(dir) => Box::new(DryRunNotifier::new(dir)),
        None => Box::new(BrevoMailer::new(config.mail.clone())),
    };

    let summary = run_job(db, policy, today, notifier.as_ref());
    info!(status = ?summary.status, conflicts = summary.report.conflicts.len(), "audit run finished");

    match summary.status {
        RunStatus::NoConflicts | RunStatus::Notified => ExitCode::SUCCESS,
        RunStatus::SourceUnavailable | RunStatus::NotificationFailed => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    // Load .env before the subscriber so RUST_LOG from the file applies.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => debug!(error = %e, "no .env loaded"),
    }

    let cli = Cli::parse();

    let config = match AuditConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let db = Database::new(&config.database_path);

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => run(&config, &db, args),

        Command::CheckConnection => match check_connection(&db) {
            Ok(version) => {
                println!("Connected to {} (SQLite {version})", db.path().display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "connection check failed");
                ExitCode::FAILURE
            }
        },

        Command::Inspect => match db.with_conn(inspect_views) {
            Ok(relations) => {
                for rel in relations {
                    println!("{} [{}]", rel.relation, rel.view.name());
                    if rel.columns.is_empty() {
                        println!("   (missing)");
                    }
                    for (name, ty) in rel.columns {
                        println!("   {name} {ty}");
                    }
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "inspection failed");
                ExitCode::FAILURE
            }
        },
    }
}

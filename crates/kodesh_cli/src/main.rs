//! `kodesh` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the roster database and dispatch one command per invocation.
//!
//! # Invariants
//! - A failed command prints its error chain and exits non-zero; nothing
//!   is written for it.

mod cmd;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmd::{
    export::ExportSubcommand, report::SummaryArgs, student::StudentSubcommand,
    week::WeekSubcommand,
};
use kodesh_core::{open_db, RosterService, SqliteRosterRepository, TrackerConfig, WeekId};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kodesh",
    about = "Track weekly Kodesh program attendance and hours learned",
    version,
    propagate_version = true
)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "KODESH_DB")]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "KODESH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, global = true, env = "KODESH_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage students
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },

    /// Manage weeks and their rosters
    Week {
        #[command(subcommand)]
        subcommand: WeekSubcommand,
    },

    /// Print the report for one week
    Report { week: WeekId },

    /// Print the participation summary across weeks
    Summary {
        #[command(flatten)]
        filter: SummaryArgs,
    },

    /// Write CSV exports
    Export {
        #[command(subcommand)]
        subcommand: ExportSubcommand,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Student { .. } => "student",
            Self::Week { .. } => "week",
            Self::Report { .. } => "report",
            Self::Summary { .. } => "summary",
            Self::Export { .. } => "export",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = TrackerConfig::new(cli.db, cli.log_level.as_deref(), cli.log_dir)
        .context("invalid configuration")?;
    config
        .init_logging()
        .context("failed to initialize logging")?;

    info!(
        "event=cli_command module=cli status=start command={} json={}",
        cli.command.name(),
        cli.json
    );

    let mut conn = open_db(config.db_path())
        .with_context(|| format!("failed to open database '{}'", config.db_path().display()))?;
    let repo = SqliteRosterRepository::try_new(&mut conn).context("database is not usable")?;
    let mut service = RosterService::new(repo);

    match cli.command {
        Commands::Student { subcommand } => cmd::student::run(&mut service, subcommand, cli.json),
        Commands::Week { subcommand } => cmd::week::run(&mut service, subcommand, cli.json),
        Commands::Report { week } => cmd::report::week_report(&service, &week, cli.json),
        Commands::Summary { filter } => cmd::report::summary(&service, filter, cli.json),
        Commands::Export { subcommand } => cmd::export::run(&service, subcommand, cli.json),
    }
}

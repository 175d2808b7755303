use super::report::{summary_state, SummaryArgs};
use super::Service;
use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use kodesh_core::{format_week_report, WeekId};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ExportSubcommand {
    /// Export one week's roster as CSV
    Week {
        week: WeekId,
        /// Directory to write into (default: current directory)
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Export the participation summary as CSV
    Summary {
        #[command(flatten)]
        filter: SummaryArgs,
        /// Directory to write into (default: current directory)
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

pub fn run(service: &Service<'_>, subcmd: ExportSubcommand, json: bool) -> anyhow::Result<()> {
    let (file_name, csv) = match subcmd {
        ExportSubcommand::Week { week, out } => {
            let week = service.get_week(&week)?;
            let report = format_week_report(&week, &service.list_students()?);
            (out.join(report.export_filename()), report.to_csv())
        }
        ExportSubcommand::Summary { filter, out } => {
            let table = summary_state(service, filter)?.table();
            (out.join(table.export_filename()), table.to_csv())
        }
    };

    write_csv(&file_name, &csv)?;
    if json {
        print_json(&serde_json::json!({ "path": file_name, "bytes": csv.len() }))?;
    } else {
        println!("Wrote {}", file_name.display());
    }
    Ok(())
}

fn write_csv(path: &Path, csv: &str) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create '{}'", dir.display()))?;
    }
    std::fs::write(path, csv).with_context(|| format!("failed to write '{}'", path.display()))
}

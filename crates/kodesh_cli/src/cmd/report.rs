use super::Service;
use crate::output::{generated_at, print_json};
use clap::Args;
use kodesh_core::report::summary::SUMMARY_ABSENT_CELL;
use kodesh_core::view::summary::{SummaryAction, SummaryState};
use kodesh_core::{format_week_report, SummaryTable, WeekId};

/// Filters shared by `summary` and `export summary`.
#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    /// Restrict to this week (repeatable; default: all weeks)
    #[arg(long = "week")]
    pub weeks: Vec<WeekId>,
    /// Only students whose name contains this text
    #[arg(long)]
    pub student: Option<String>,
    /// Only students who were InShabbos in every selected week
    #[arg(long)]
    pub full_attendance: bool,
}

pub fn week_report(service: &Service<'_>, week_id: &WeekId, json: bool) -> anyhow::Result<()> {
    let week = service.get_week(week_id)?;
    let students = service.list_students()?;
    let report = format_week_report(&week, &students);

    if json {
        let rows: Vec<_> = report
            .rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "studentId": row.student_id,
                    "name": row.name,
                    "participation": row.participation,
                    "hoursLearned": row.hours_learned,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "weekId": report.week_id,
            "title": report.title,
            "date": report.date,
            "rows": rows,
            "totalHours": report.total_hours,
        }));
    }

    print!("{}", report.render_text(&generated_at()));
    Ok(())
}

/// Loads the summary view with `args` applied.
pub fn summary_state(service: &Service<'_>, args: SummaryArgs) -> anyhow::Result<SummaryState> {
    let mut state = SummaryState::default();
    state.apply(SummaryAction::SetWeekSelection(args.weeks.clone()));
    state.apply(SummaryAction::Loaded(service.snapshot()?));
    // Loading prunes unknown week ids; an empty selection would widen to all weeks.
    if let Some(missing) = args
        .weeks
        .iter()
        .find(|id| !state.filter.week_ids.contains(id))
    {
        anyhow::bail!("week not found: {missing}");
    }
    if let Some(query) = args.student {
        state.apply(SummaryAction::SetStudentQuery(query));
    }
    state.apply(SummaryAction::SetOnlyFullAttendance(args.full_attendance));
    Ok(state)
}

pub fn summary(service: &Service<'_>, args: SummaryArgs, json: bool) -> anyhow::Result<()> {
    let state = summary_state(service, args)?;
    let table = state.table();

    if json {
        return print_json(&summary_json(&table));
    }

    print!("{}", table.render_text(&generated_at()));
    if state.filter.only_full_attendance {
        println!("\n{}", state.full_attendance_label());
    }
    Ok(())
}

fn summary_json(table: &SummaryTable) -> serde_json::Value {
    let rows: Vec<_> = table
        .rows
        .iter()
        .map(|row| {
            let weeks: serde_json::Map<_, _> = table
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(column, cell)| {
                    let value = cell.map_or(SUMMARY_ABSENT_CELL, |level| level.as_str());
                    (column.week_id.to_string(), serde_json::json!(value))
                })
                .collect();
            serde_json::json!({
                "studentId": row.student_id,
                "name": row.name,
                "weeks": weeks,
            })
        })
        .collect();
    let columns: Vec<_> = table
        .columns
        .iter()
        .map(|column| serde_json::json!({ "weekId": column.week_id, "title": column.title }))
        .collect();

    serde_json::json!({ "columns": columns, "rows": rows })
}

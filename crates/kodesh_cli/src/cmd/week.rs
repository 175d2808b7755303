use super::Service;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use kodesh_core::report::format_hours;
use kodesh_core::search::name_match::split_highlight;
use kodesh_core::view::home::{HomeAction, HomeState};
use kodesh_core::{grand_total_hours, total_hours_for_week, ParticipationLevel, StudentId, WeekId};

#[derive(Subcommand)]
pub enum WeekSubcommand {
    /// Create a week with every known student on its roster
    Add {
        #[arg(long)]
        title: String,
        /// Week date as YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// List weeks, most recent first, with hour totals
    List,
    /// Show one week's roster
    Show {
        id: WeekId,
        /// Only show students whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a week
    Delete { id: WeekId },
    /// Add a student to a week by name, creating the student if needed
    Enroll {
        week: WeekId,
        name: String,
        #[arg(long, default_value = "DidNotParticipate")]
        level: ParticipationLevel,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Change a roster entry's participation and/or hours
    Set {
        week: WeekId,
        student: StudentId,
        #[arg(long)]
        level: Option<ParticipationLevel>,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Remove a student from a week's roster
    Remove { week: WeekId, student: StudentId },
    /// Set the roster to exactly these students (new ones join as InShabbos)
    Roster {
        week: WeekId,
        students: Vec<StudentId>,
    },
}

pub fn run(service: &mut Service<'_>, subcmd: WeekSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        WeekSubcommand::Add { title, date } => add(service, &title, &date, json),
        WeekSubcommand::List => list(service, json),
        WeekSubcommand::Show { id, search } => show(service, id, search, json),
        WeekSubcommand::Delete { id } => delete(service, &id, json),
        WeekSubcommand::Enroll {
            week,
            name,
            level,
            hours,
        } => enroll(service, &week, &name, level, hours, json),
        WeekSubcommand::Set {
            week,
            student,
            level,
            hours,
        } => set(service, &week, &student, level, hours, json),
        WeekSubcommand::Remove { week, student } => remove(service, &week, &student, json),
        WeekSubcommand::Roster { week, students } => roster(service, &week, &students, json),
    }
}

fn add(service: &mut Service<'_>, title: &str, date: &str, json: bool) -> anyhow::Result<()> {
    let weeks = service
        .add_week(title, date)
        .context("failed to add week")?;
    // Lists come back in insertion order.
    let week = weeks.last().context("week list is empty after insert")?;

    if json {
        print_json(week)?;
    } else {
        println!(
            "Added week {} ({}) with {} student(s): {}",
            week.title,
            week.date,
            week.students.len(),
            week.id
        );
    }
    Ok(())
}

fn list(service: &Service<'_>, json: bool) -> anyhow::Result<()> {
    let weeks = service.list_weeks_for_display()?;
    let grand_total = grand_total_hours(&weeks);

    if json {
        let rows: Vec<_> = weeks
            .iter()
            .map(|week| {
                serde_json::json!({
                    "id": week.id,
                    "title": week.title,
                    "date": week.date,
                    "students": week.students.len(),
                    "totalHours": total_hours_for_week(week),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "weeks": rows,
            "grandTotalHours": grand_total,
        }));
    }

    if weeks.is_empty() {
        println!("No weeks yet.");
        return Ok(());
    }
    let rows = weeks
        .iter()
        .map(|week| {
            vec![
                week.id.to_string(),
                week.title.clone(),
                week.date.clone(),
                week.students.len().to_string(),
                format_hours(total_hours_for_week(week)),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "DATE", "STUDENTS", "HOURS"], rows);
    println!("\nTotal hours learned: {}", format_hours(grand_total));
    Ok(())
}

fn show(
    service: &Service<'_>,
    id: WeekId,
    search: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let week = service.get_week(&id)?;
    let mut state = HomeState::default();
    state.apply(HomeAction::Loaded(service.snapshot()?));
    if let Some(query) = search {
        state.apply(HomeAction::SetSearch {
            week_id: id.clone(),
            query,
        });
    }
    let rows = state.visible_rows(&id);

    if json {
        let rows: Vec<_> = rows
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
            "id": week.id,
            "title": week.title,
            "date": week.date,
            "totalHours": total_hours_for_week(&week),
            "students": rows,
        }));
    }

    println!(
        "{} ({})  total hours: {}\n",
        week.title,
        week.date,
        format_hours(total_hours_for_week(&week))
    );
    if rows.is_empty() {
        println!("No students match.");
        return Ok(());
    }
    let cells = rows
        .iter()
        .map(|row| {
            let name = match row.highlight.span() {
                Some(span) => {
                    let (before, matched, after) = split_highlight(row.name, span);
                    format!("{before}[{matched}]{after}")
                }
                None => row.name.to_string(),
            };
            vec![
                row.student_id.to_string(),
                name,
                row.participation.label().to_string(),
                format_hours(row.hours_learned),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "PARTICIPATION", "HOURS"], cells);
    Ok(())
}

fn delete(service: &mut Service<'_>, id: &WeekId, json: bool) -> anyhow::Result<()> {
    let weeks = service
        .delete_week(id)
        .with_context(|| format!("failed to delete week '{id}'"))?;
    if json {
        print_json(&weeks)?;
    } else {
        println!("Deleted week {id}; {} remaining", weeks.len());
    }
    Ok(())
}

fn enroll(
    service: &mut Service<'_>,
    week: &WeekId,
    name: &str,
    level: ParticipationLevel,
    hours: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = service
        .enroll_by_name(week, name, level, hours)
        .with_context(|| format!("failed to enroll student in week '{week}'"))?;

    if json {
        return print_json(&serde_json::json!({
            "studentId": outcome.student_id,
            "createdStudent": outcome.created_student,
            "addedToWeek": outcome.added_to_week,
        }));
    }
    if outcome.created_student {
        println!("Created student {}", outcome.student_id);
    }
    if outcome.added_to_week {
        println!("Added {} to week {week}", outcome.student_id);
    } else {
        println!("Student {} is already on week {week}", outcome.student_id);
    }
    Ok(())
}

fn set(
    service: &mut Service<'_>,
    week: &WeekId,
    student: &StudentId,
    level: Option<ParticipationLevel>,
    hours: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    if level.is_none() && hours.is_none() {
        anyhow::bail!("nothing to change: pass --level and/or --hours");
    }
    service
        .update_entry(week, student, level, hours)
        .with_context(|| format!("failed to update {student} in week '{week}'"))?;

    let updated = service.get_week(week)?;
    let entry = updated.entry_for(student).context("entry vanished after update")?;
    if json {
        print_json(entry)?;
    } else {
        println!(
            "{student}: {} / {} hour(s)",
            entry.participation.label(),
            format_hours(entry.hours_or_zero())
        );
    }
    Ok(())
}

fn remove(
    service: &mut Service<'_>,
    week: &WeekId,
    student: &StudentId,
    json: bool,
) -> anyhow::Result<()> {
    let weeks = service
        .remove_student_from_week(week, student)
        .with_context(|| format!("failed to update week '{week}'"))?;
    if json {
        print_json(&weeks)?;
    } else {
        println!("Removed {student} from week {week}");
    }
    Ok(())
}

fn roster(
    service: &mut Service<'_>,
    week: &WeekId,
    students: &[StudentId],
    json: bool,
) -> anyhow::Result<()> {
    service
        .set_week_roster(week, students)
        .with_context(|| format!("failed to set roster of week '{week}'"))?;
    let updated = service.get_week(week)?;
    if json {
        print_json(&updated)?;
    } else {
        println!(
            "Week {week} now has {} student(s)",
            updated.students.len()
        );
    }
    Ok(())
}

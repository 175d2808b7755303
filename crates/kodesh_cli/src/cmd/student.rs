use super::Service;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use kodesh_core::{
    format_student_history, report::format_hours, total_hours_for_student, StudentId,
};

#[derive(Subcommand)]
pub enum StudentSubcommand {
    /// Add one student
    Add { name: String },
    /// Add students from comma- or newline-separated names, skipping known ones
    Import { text: String },
    /// List students
    List,
    /// Rename a student
    Rename { id: StudentId, name: String },
    /// Delete a student (week rosters keep their entries)
    Delete { id: StudentId },
    /// Show a student's participation across all weeks
    History { id: StudentId },
}

pub fn run(service: &mut Service<'_>, subcmd: StudentSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        StudentSubcommand::Add { name } => add(service, &name, json),
        StudentSubcommand::Import { text } => import(service, &text, json),
        StudentSubcommand::List => list(service, json),
        StudentSubcommand::Rename { id, name } => rename(service, &id, &name, json),
        StudentSubcommand::Delete { id } => delete(service, &id, json),
        StudentSubcommand::History { id } => history(service, &id, json),
    }
}

fn add(service: &mut Service<'_>, name: &str, json: bool) -> anyhow::Result<()> {
    let students = service.add_student(name).context("failed to add student")?;
    // Lists come back in insertion order.
    let student = students
        .last()
        .context("student list is empty after insert")?;

    if json {
        print_json(student)?;
    } else {
        println!("Added student {} ({})", student.name, student.id);
    }
    Ok(())
}

fn import(service: &mut Service<'_>, text: &str, json: bool) -> anyhow::Result<()> {
    let outcome = service
        .add_students_from_text(text)
        .context("failed to import students")?;

    if json {
        print_json(&serde_json::json!({
            "added": outcome.added,
            "students": outcome.students,
        }))?;
    } else {
        println!(
            "Added {} student(s); {} on file",
            outcome.added.len(),
            outcome.students.len()
        );
    }
    Ok(())
}

fn list(service: &Service<'_>, json: bool) -> anyhow::Result<()> {
    let students = service.list_students()?;
    if json {
        return print_json(&students);
    }
    if students.is_empty() {
        println!("No students yet.");
        return Ok(());
    }
    let rows = students
        .iter()
        .map(|student| vec![student.id.to_string(), student.name.clone()])
        .collect();
    print_table(&["ID", "NAME"], rows);
    Ok(())
}

fn rename(service: &mut Service<'_>, id: &StudentId, name: &str, json: bool) -> anyhow::Result<()> {
    let students = service
        .rename_student(id, name)
        .with_context(|| format!("failed to rename student '{id}'"))?;
    if json {
        print_json(&students)?;
    } else {
        println!("Renamed student {id}");
    }
    Ok(())
}

fn delete(service: &mut Service<'_>, id: &StudentId, json: bool) -> anyhow::Result<()> {
    let students = service
        .delete_student(id)
        .with_context(|| format!("failed to delete student '{id}'"))?;
    if json {
        print_json(&students)?;
    } else {
        println!("Deleted student {id}; {} remaining", students.len());
    }
    Ok(())
}

fn history(service: &Service<'_>, id: &StudentId, json: bool) -> anyhow::Result<()> {
    let student = service.get_student(id)?;
    let weeks = service.list_weeks_for_display()?;
    let history = format_student_history(&student, &weeks);
    let total = total_hours_for_student(id, &weeks);

    if json {
        let rows: Vec<_> = history
            .rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "weekId": row.week_id,
                    "title": row.week_title,
                    "date": row.date,
                    "participation": row.participation,
                    "hoursLearned": row.hours_learned,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "student": student,
            "weeks": rows,
            "totalHours": total,
        }));
    }

    print!("{}", history.render_text());
    if !history.rows.is_empty() {
        println!("\nTotal hours learned: {}", format_hours(total));
    }
    Ok(())
}

use kodesh_core::db::open_db_in_memory;
use kodesh_core::{
    ModelValidationError, ParticipationLevel, RosterService, ServiceError, SqliteRosterRepository,
    StudentId, WeekId,
};
use rusqlite::Connection;

fn service(conn: &mut Connection) -> RosterService<SqliteRosterRepository<'_>> {
    RosterService::new(SqliteRosterRepository::try_new(conn).unwrap())
}

#[test]
fn add_week_seeds_every_student_with_default_entry() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    svc.add_student("Chaim").unwrap();
    let students = svc.add_student("Dovid").unwrap();

    let weeks = svc.add_week("Parshas Noach", "2024-11-01").unwrap();

    assert_eq!(weeks.len(), 1);
    let roster = &weeks[0].students;
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].student_id, students[0].id);
    assert_eq!(roster[1].student_id, students[1].id);
    assert!(roster
        .iter()
        .all(|entry| entry.participation == ParticipationLevel::DidNotParticipate
            && entry.hours_or_zero() == 0.0));
}

#[test]
fn add_week_validates_title_and_date() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);

    assert!(matches!(
        svc.add_week("  ", "2024-11-01"),
        Err(ServiceError::Validation(ModelValidationError::BlankWeekTitle))
    ));
    assert!(matches!(
        svc.add_week("Noach", "2024-1-1"),
        Err(ServiceError::Validation(ModelValidationError::InvalidWeekDate(_)))
    ));
    assert!(svc.list_weeks().unwrap().is_empty());
}

#[test]
fn add_student_rejects_empty_name() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);

    assert!(matches!(
        svc.add_student(" "),
        Err(ServiceError::Validation(ModelValidationError::EmptyStudentName))
    ));
}

#[test]
fn set_participation_keeps_hours_and_set_hours_keeps_level() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let student = svc.add_student("Chaim").unwrap().remove(0);
    let week = svc.add_week("Lech Lecha", "2024-11-08").unwrap().remove(0);

    svc.set_hours(&week.id, &student.id, 3.5).unwrap();
    let weeks = svc
        .set_participation(&week.id, &student.id, ParticipationLevel::OneMealOut)
        .unwrap();

    let entry = weeks[0].entry_for(&student.id).unwrap();
    assert_eq!(entry.participation, ParticipationLevel::OneMealOut);
    assert_eq!(entry.hours_learned, Some(3.5));
    assert_eq!(weeks[0].students.len(), 1);
}

#[test]
fn edits_report_missing_week_and_missing_entry() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let week = svc.add_week("Vayera", "2024-11-15").unwrap().remove(0);
    let stranger = StudentId::parse("stranger").unwrap();
    let missing_week = WeekId::parse("missing").unwrap();

    assert!(matches!(
        svc.set_participation(&week.id, &stranger, ParticipationLevel::InShabbos),
        Err(ServiceError::ParticipationNotFound { .. })
    ));
    assert!(matches!(
        svc.set_hours(&missing_week, &stranger, 1.0),
        Err(ServiceError::WeekNotFound(_))
    ));
    assert!(matches!(
        svc.remove_student_from_week(&missing_week, &stranger),
        Err(ServiceError::WeekNotFound(_))
    ));
}

#[test]
fn negative_hours_are_rejected_before_persisting() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let student = svc.add_student("Chaim").unwrap().remove(0);
    let week = svc.add_week("Chayei Sarah", "2024-11-22").unwrap().remove(0);

    assert!(matches!(
        svc.set_hours(&week.id, &student.id, -2.0),
        Err(ServiceError::Validation(ModelValidationError::NegativeHours(_)))
    ));
    let stored = svc.get_week(&week.id).unwrap();
    assert_eq!(stored.entry_for(&student.id).unwrap().hours_learned, None);
}

#[test]
fn update_entry_writes_both_fields_or_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let student = svc.add_student("Dov").unwrap().remove(0);
    let week = svc.add_week("Vayetzei", "2024-12-06").unwrap().remove(0);

    assert!(matches!(
        svc.update_entry(
            &week.id,
            &student.id,
            Some(ParticipationLevel::InShabbos),
            Some(-1.0)
        ),
        Err(ServiceError::Validation(ModelValidationError::NegativeHours(_)))
    ));
    let stored = svc.get_week(&week.id).unwrap();
    let entry = stored.entry_for(&student.id).unwrap();
    assert_eq!(entry.participation, ParticipationLevel::DidNotParticipate);
    assert_eq!(entry.hours_learned, None);

    let weeks = svc
        .update_entry(
            &week.id,
            &student.id,
            Some(ParticipationLevel::InShabbos),
            Some(2.0),
        )
        .unwrap();
    let entry = weeks[0].entry_for(&student.id).unwrap();
    assert_eq!(entry.participation, ParticipationLevel::InShabbos);
    assert_eq!(entry.hours_learned, Some(2.0));
}

#[test]
fn add_student_to_week_never_duplicates() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let week = svc.add_week("Toldos", "2024-11-29").unwrap().remove(0);
    let student = svc.add_student("Yosef").unwrap().remove(0);

    let added = svc
        .add_student_to_week(&week.id, &student.id, ParticipationLevel::InShabbos, Some(1.0))
        .unwrap();
    assert!(added.is_some());

    let again = svc
        .add_student_to_week(&week.id, &student.id, ParticipationLevel::OutShabbos, None)
        .unwrap();
    assert!(again.is_none());

    let stored = svc.get_week(&week.id).unwrap();
    assert_eq!(stored.students.len(), 1);
    assert_eq!(stored.students[0].participation, ParticipationLevel::InShabbos);

    let ghost = StudentId::parse("ghost").unwrap();
    assert!(matches!(
        svc.add_student_to_week(&week.id, &ghost, ParticipationLevel::InShabbos, None),
        Err(ServiceError::StudentNotFound(_))
    ));
}

#[test]
fn enroll_by_name_creates_once_then_reuses_first_match() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let first = svc.add_week("Vayeitzei", "2024-12-06").unwrap().remove(0);
    let second = svc.add_week("Vayishlach", "2024-12-13").unwrap().remove(1);

    let created = svc
        .enroll_by_name(&first.id, " Moshe ", ParticipationLevel::InShabbos, Some(2.0))
        .unwrap();
    assert!(created.created_student);
    assert!(created.added_to_week);
    assert_eq!(created.snapshot.students.len(), 1);
    assert_eq!(created.snapshot.students[0].name, "Moshe");

    let reused = svc
        .enroll_by_name(&second.id, "Moshe", ParticipationLevel::OutShabbos, None)
        .unwrap();
    assert!(!reused.created_student);
    assert_eq!(reused.student_id, created.student_id);

    let repeat = svc
        .enroll_by_name(&first.id, "Moshe", ParticipationLevel::OutShabbos, None)
        .unwrap();
    assert!(!repeat.added_to_week);
    let stored = svc.get_week(&first.id).unwrap();
    assert_eq!(stored.students.len(), 1);
    assert_eq!(stored.students[0].participation, ParticipationLevel::InShabbos);
}

#[test]
fn enroll_by_name_checks_week_before_creating_student() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let missing = WeekId::parse("missing").unwrap();

    assert!(matches!(
        svc.enroll_by_name(&missing, "Moshe", ParticipationLevel::InShabbos, None),
        Err(ServiceError::WeekNotFound(_))
    ));
    assert!(svc.list_students().unwrap().is_empty());
}

#[test]
fn remove_student_from_week_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let student = svc.add_student("Chaim").unwrap().remove(0);
    let week = svc.add_week("Vayeishev", "2024-12-20").unwrap().remove(0);

    let once = svc.remove_student_from_week(&week.id, &student.id).unwrap();
    let twice = svc.remove_student_from_week(&week.id, &student.id).unwrap();

    assert_eq!(once, twice);
    assert!(twice[0].students.is_empty());
}

#[test]
fn set_week_roster_keeps_adds_and_drops() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    svc.add_students_from_text("Aharon, Binyamin, Chaim").unwrap();
    let week = svc.add_week("Mikeitz", "2024-12-27").unwrap().remove(0);
    let students = svc.list_students().unwrap();
    let (a, b, c) = (&students[0].id, &students[1].id, &students[2].id);

    svc.set_hours(&week.id, a, 4.0).unwrap();
    svc.remove_student_from_week(&week.id, c).unwrap();

    let unknown = StudentId::parse("unknown").unwrap();
    let weeks = svc
        .set_week_roster(&week.id, &[c.clone(), a.clone(), unknown])
        .unwrap();

    let roster = &weeks[0].students;
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].student_id, *a);
    assert_eq!(roster[0].hours_learned, Some(4.0));
    assert_eq!(roster[1].student_id, *c);
    assert_eq!(roster[1].participation, ParticipationLevel::InShabbos);
    assert_eq!(roster[1].hours_learned, Some(0.0));
    assert!(weeks[0].entry_for(b).is_none());
}

#[test]
fn bulk_add_skips_blank_known_and_repeated_names() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    svc.add_student("Dovid").unwrap();

    let outcome = svc
        .add_students_from_text("Dovid,\nMoshe, ,Moshe\nYosef")
        .unwrap();

    assert_eq!(outcome.added.len(), 2);
    let names: Vec<_> = outcome.students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Dovid", "Moshe", "Yosef"]);
}

#[test]
fn rename_and_delete_student() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    let student = svc.add_student("Chaim").unwrap().remove(0);
    let week = svc.add_week("Vayigash", "2025-01-03").unwrap().remove(0);

    let renamed = svc.rename_student(&student.id, "Chaim Cohen").unwrap();
    assert_eq!(renamed[0].name, "Chaim Cohen");

    let remaining = svc.delete_student(&student.id).unwrap();
    assert!(remaining.is_empty());
    assert!(matches!(
        svc.get_student(&student.id),
        Err(ServiceError::StudentNotFound(_))
    ));
    assert_eq!(svc.get_week(&week.id).unwrap().students.len(), 1);
}

#[test]
fn list_weeks_for_display_is_most_recent_first() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = service(&mut conn);
    svc.add_week("Early", "2024-01-05").unwrap();
    svc.add_week("Late", "2024-03-01").unwrap();
    svc.add_week("Middle", "2024-02-02").unwrap();

    let titles: Vec<_> = svc
        .list_weeks_for_display()
        .unwrap()
        .into_iter()
        .map(|week| week.title)
        .collect();
    assert_eq!(titles, ["Late", "Middle", "Early"]);
}

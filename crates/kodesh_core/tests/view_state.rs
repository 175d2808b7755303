use kodesh_core::db::open_db_in_memory;
use kodesh_core::view::home::{HomeAction, HomeState, NewStudentForm};
use kodesh_core::view::summary::{SummaryAction, SummaryState};
use kodesh_core::view::week_draft::{DraftAction, WeekDraft};
use kodesh_core::{
    MatchSpan, NameMatch, ParticipationLevel, RosterService, RosterSnapshot,
    SqliteRosterRepository, StudentId,
};

fn seeded(svc: &mut RosterService<SqliteRosterRepository<'_>>) -> RosterSnapshot {
    svc.add_students_from_text("Chaim, Dovid").unwrap();
    svc.add_week("Early", "2024-11-01").unwrap();
    svc.add_week("Late", "2024-11-15").unwrap();
    svc.snapshot().unwrap()
}

#[test]
fn home_selects_most_recent_week_and_its_roster() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let snapshot = seeded(&mut svc);

    let mut state = HomeState::default();
    state.apply(HomeAction::Loaded(snapshot.clone()));

    let late = &snapshot.weeks[1];
    assert_eq!(state.selected_week.as_ref(), Some(&late.id));
    assert_eq!(state.selected_students.len(), 2);
    assert_eq!(state.weeks_for_display()[0].title, "Late");
}

#[test]
fn home_toggle_expand_selects_and_collapses() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let snapshot = seeded(&mut svc);
    let early = snapshot.weeks[0].id.clone();

    let mut state = HomeState::default();
    state.apply(HomeAction::Loaded(snapshot));
    state.apply(HomeAction::ToggleExpand(early.clone()));
    assert_eq!(state.expanded_week.as_ref(), Some(&early));
    assert_eq!(state.selected_week.as_ref(), Some(&early));

    state.apply(HomeAction::ToggleExpand(early.clone()));
    assert_eq!(state.expanded_week, None);
    assert_eq!(state.selected_week.as_ref(), Some(&early));
}

#[test]
fn home_search_is_per_week_and_highlights() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let snapshot = seeded(&mut svc);
    let early = snapshot.weeks[0].id.clone();
    let late = snapshot.weeks[1].id.clone();

    let mut state = HomeState::default();
    state.apply(HomeAction::Loaded(snapshot));
    state.apply(HomeAction::SetSearch {
        week_id: early.clone(),
        query: "AI".to_string(),
    });

    let rows = state.visible_rows(&early);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Chaim");
    assert_eq!(rows[0].highlight, NameMatch::Found(MatchSpan { start: 2, len: 2 }));

    let other = state.visible_rows(&late);
    assert_eq!(other.len(), 2);
    assert!(other.iter().all(|row| row.highlight == NameMatch::EmptyQuery));
}

#[test]
fn home_toggle_student_and_new_student_form_reset() {
    let mut state = HomeState::default();
    let id = StudentId::parse("s1").unwrap();

    state.apply(HomeAction::ToggleStudent(id.clone()));
    assert_eq!(state.selected_students, vec![id.clone()]);
    state.apply(HomeAction::ToggleStudent(id));
    assert!(state.selected_students.is_empty());

    state.apply(HomeAction::SetNewStudentName("Moshe".to_string()));
    state.apply(HomeAction::SetNewStudentLevel(ParticipationLevel::InShabbos));
    state.apply(HomeAction::SetNewStudentHours(2.0));
    assert_eq!(state.new_student.name, "Moshe");

    state.apply(HomeAction::NewStudentSaved);
    assert_eq!(state.new_student, NewStudentForm::default());
    assert_eq!(
        state.new_student.participation,
        ParticipationLevel::DidNotParticipate
    );
}

#[test]
fn home_reload_keeps_selection_when_week_survives() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let snapshot = seeded(&mut svc);
    let early = snapshot.weeks[0].id.clone();
    let late = snapshot.weeks[1].id.clone();

    let mut state = HomeState::default();
    state.apply(HomeAction::Loaded(snapshot));
    state.apply(HomeAction::ToggleExpand(early.clone()));

    svc.delete_week(&early).unwrap();
    state.apply(HomeAction::Loaded(svc.snapshot().unwrap()));

    assert_eq!(state.selected_week.as_ref(), Some(&late));
    assert_eq!(state.expanded_week, None);
}

#[test]
fn draft_edits_route_through_merge_and_commit_creates_week() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let students = svc.add_students_from_text("Chaim, Dovid").unwrap().students;
    let (chaim, dovid) = (students[0].id.clone(), students[1].id.clone());

    let mut draft = WeekDraft::for_new_week(&students).unwrap();
    draft.apply(DraftAction::SetTitle("Vayera".to_string())).unwrap();
    draft.apply(DraftAction::SetDate("2024-11-15".to_string())).unwrap();
    draft
        .apply(DraftAction::SetParticipation {
            student_id: chaim.clone(),
            participation: ParticipationLevel::InShabbos,
        })
        .unwrap();
    draft
        .apply(DraftAction::SetHours {
            student_id: chaim.clone(),
            hours_learned: 3.0,
        })
        .unwrap();
    draft.apply(DraftAction::RemoveStudent(dovid.clone())).unwrap();
    assert_eq!(draft.available_students(&students).len(), 1);

    let ghost = StudentId::parse("ghost").unwrap();
    draft
        .apply(DraftAction::SetHours {
            student_id: ghost,
            hours_learned: 1.0,
        })
        .unwrap();
    assert_eq!(draft.entries.len(), 1);

    assert!(draft
        .apply(DraftAction::SetHours {
            student_id: chaim.clone(),
            hours_learned: -1.0,
        })
        .is_err());

    let weeks = draft.commit(&mut svc).unwrap();
    let entry = weeks[0].entry_for(&chaim).unwrap();
    assert_eq!(entry.participation, ParticipationLevel::InShabbos);
    assert_eq!(entry.hours_learned, Some(3.0));
    assert!(weeks[0].entry_for(&dovid).is_none());
}

#[test]
fn draft_for_existing_week_replaces_roster() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let students = svc.add_students_from_text("Chaim").unwrap().students;
    let week = svc.add_week("Toldos", "2024-11-29").unwrap().remove(0);
    let newcomer = svc.add_student("Yosef").unwrap().remove(1);

    let mut draft = WeekDraft::for_existing(&week);
    draft.apply(DraftAction::AddStudent(newcomer.id.clone())).unwrap();
    draft.apply(DraftAction::AddStudent(newcomer.id.clone())).unwrap();
    assert_eq!(draft.entries.len(), 2);

    let weeks = draft.commit(&mut svc).unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].students[0].student_id, students[0].id);
    assert_eq!(weeks[0].students[1].student_id, newcomer.id);
}

#[test]
fn draft_for_existing_week_keeps_title_and_date() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let week = svc.add_week("Vayishlach", "2024-12-13").unwrap().remove(0);

    let mut draft = WeekDraft::for_existing(&week);
    draft.apply(DraftAction::SetTitle("Renamed".to_string())).unwrap();
    draft.apply(DraftAction::SetDate("2025-01-01".to_string())).unwrap();
    assert_eq!(draft.title, "Vayishlach");
    assert_eq!(draft.date, "2024-12-13");

    let weeks = draft.commit(&mut svc).unwrap();
    assert_eq!(weeks[0].title, "Vayishlach");
    assert_eq!(weeks[0].date, "2024-12-13");
}

#[test]
fn summary_state_prunes_deleted_weeks_and_labels_filter() {
    let mut conn = open_db_in_memory().unwrap();
    let mut svc = RosterService::new(SqliteRosterRepository::try_new(&mut conn).unwrap());
    let snapshot = seeded(&mut svc);
    let early = snapshot.weeks[0].id.clone();
    let late = snapshot.weeks[1].id.clone();

    let mut state = SummaryState::default();
    state.apply(SummaryAction::Loaded(snapshot));
    assert_eq!(
        state.full_attendance_label(),
        "Show only students who did all weeks (2)"
    );

    state.apply(SummaryAction::ToggleWeek(early.clone()));
    state.apply(SummaryAction::ToggleWeek(late.clone()));
    state.apply(SummaryAction::ToggleWeek(late));
    assert_eq!(state.filter.week_ids, vec![early.clone()]);
    assert_eq!(state.table().columns.len(), 1);

    state.apply(SummaryAction::SetStudentQuery("dov".to_string()));
    state.apply(SummaryAction::SetOnlyFullAttendance(true));
    assert!(state.table().rows.is_empty());

    svc.delete_week(&early).unwrap();
    state.apply(SummaryAction::Loaded(svc.snapshot().unwrap()));
    assert!(state.filter.week_ids.is_empty());
    assert_eq!(state.filtered_week_count(), 1);
}

use kodesh_core::search::name_match::{filter_entries_by_search, filter_students_by_name, split_highlight};
use kodesh_core::{
    display_name, filter_students_attending_all, grand_total_hours, new_participation,
    participation_history, search_match, select_weeks, total_hours_for_student,
    total_hours_for_week, MatchSpan, NameMatch, ParticipationLevel, Student, StudentId, Week,
};

fn week(title: &str, date: &str, entries: &[(&StudentId, ParticipationLevel, Option<f64>)]) -> Week {
    let roster = entries
        .iter()
        .map(|(id, level, hours)| new_participation(id, *level, *hours).unwrap())
        .collect();
    Week::new(title, date, roster).unwrap()
}

#[test]
fn week_total_is_sum_of_recorded_hours() {
    let a = StudentId::parse("a").unwrap();
    let b = StudentId::parse("b").unwrap();
    let c = StudentId::parse("c").unwrap();
    let w = week(
        "Noach",
        "2024-11-01",
        &[
            (&a, ParticipationLevel::InShabbos, Some(1.5)),
            (&b, ParticipationLevel::OutShabbos, None),
            (&c, ParticipationLevel::OneMealOut, Some(2.0)),
        ],
    );

    assert_eq!(total_hours_for_week(&w), 3.5);
    assert_eq!(total_hours_for_week(&week("Empty", "2024-11-08", &[])), 0.0);
}

#[test]
fn grand_total_and_per_student_totals() {
    let a = StudentId::parse("a").unwrap();
    let b = StudentId::parse("b").unwrap();
    let weeks = vec![
        week(
            "W1",
            "2024-11-01",
            &[
                (&a, ParticipationLevel::InShabbos, Some(2.0)),
                (&b, ParticipationLevel::InShabbos, Some(1.0)),
            ],
        ),
        week("W2", "2024-11-08", &[(&a, ParticipationLevel::InShabbos, Some(0.5))]),
    ];

    assert_eq!(grand_total_hours(&weeks), 3.5);
    assert_eq!(total_hours_for_student(&a, &weeks), 2.5);
    assert_eq!(total_hours_for_student(&b, &weeks), 1.0);
    assert_eq!(grand_total_hours(&[]), 0.0);
}

#[test]
fn empty_required_set_returns_students_unchanged() {
    let students = vec![Student::new("Chaim").unwrap(), Student::new("Dovid").unwrap()];
    let weeks = vec![week("W1", "2024-11-01", &[])];

    assert_eq!(filter_students_attending_all(&students, &weeks, &[]), students);
}

#[test]
fn missing_entry_in_one_required_week_excludes_student() {
    let chaim = Student::new("Chaim").unwrap();
    let w1 = week("W1", "2024-11-01", &[(&chaim.id, ParticipationLevel::InShabbos, None)]);
    let w2 = week("W2", "2024-11-08", &[]);
    let w3 = week("W3", "2024-11-15", &[(&chaim.id, ParticipationLevel::InShabbos, None)]);
    let required = vec![w1.id.clone(), w2.id.clone(), w3.id.clone()];
    let weeks = vec![w1, w2, w3];

    let kept = filter_students_attending_all(std::slice::from_ref(&chaim), &weeks, &required);
    assert!(kept.is_empty());

    let only_attended = vec![weeks[0].id.clone(), weeks[2].id.clone()];
    let kept = filter_students_attending_all(std::slice::from_ref(&chaim), &weeks, &only_attended);
    assert_eq!(kept, vec![chaim]);
}

#[test]
fn only_in_shabbos_counts_as_full_attendance() {
    let students = vec![
        Student::new("In").unwrap(),
        Student::new("Meal").unwrap(),
        Student::new("Out").unwrap(),
    ];
    let w = week(
        "W1",
        "2024-11-01",
        &[
            (&students[0].id, ParticipationLevel::InShabbos, None),
            (&students[1].id, ParticipationLevel::OneMealOut, None),
            (&students[2].id, ParticipationLevel::OutShabbos, None),
        ],
    );
    let required = vec![w.id.clone()];

    let kept = filter_students_attending_all(&students, &[w], &required);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "In");
}

#[test]
fn select_weeks_treats_empty_selection_as_all() {
    let weeks = vec![
        week("W1", "2024-11-01", &[]),
        week("W2", "2024-11-08", &[]),
        week("W3", "2024-11-15", &[]),
    ];

    assert_eq!(select_weeks(&weeks, &[]).len(), 3);
    let picked = select_weeks(&weeks, &[weeks[2].id.clone(), weeks[0].id.clone()]);
    let titles: Vec<_> = picked.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, ["W1", "W3"]);
}

#[test]
fn history_has_one_row_per_week_in_caller_order() {
    let chaim = Student::new("Chaim").unwrap();
    let weeks = vec![
        week("W3", "2024-11-15", &[(&chaim.id, ParticipationLevel::OutShabbos, Some(1.0))]),
        week("W1", "2024-11-01", &[]),
    ];

    let history = participation_history(&chaim, &weeks);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].week.title, "W3");
    assert_eq!(
        history[0].participation.map(|p| p.participation),
        Some(ParticipationLevel::OutShabbos)
    );
    assert!(history[1].participation.is_none());
}

#[test]
fn empty_query_is_a_trivial_match_not_a_miss() {
    assert_eq!(search_match("Yosef", ""), NameMatch::EmptyQuery);
    assert!(search_match("Yosef", "").is_visible());
    assert_eq!(search_match("Yosef", "zz"), NameMatch::NotFound);
    assert_eq!(
        search_match("Yosef", "SEF"),
        NameMatch::Found(MatchSpan { start: 2, len: 3 })
    );
}

#[test]
fn highlight_split_handles_multibyte_names() {
    let name = "Ízchak";
    let span = search_match(name, "zch").span().unwrap();
    assert_eq!(split_highlight(name, span), ("Í", "zch", "ak"));
}

#[test]
fn name_filters_and_per_week_search() {
    let students = vec![Student::new("Chaim").unwrap(), Student::new("Dovid").unwrap()];
    let dangling = StudentId::parse("gone").unwrap();
    let w = week(
        "W1",
        "2024-11-01",
        &[
            (&students[0].id, ParticipationLevel::InShabbos, None),
            (&students[1].id, ParticipationLevel::InShabbos, None),
            (&dangling, ParticipationLevel::InShabbos, None),
        ],
    );

    assert_eq!(filter_students_by_name(&students, "").len(), 2);
    assert_eq!(filter_students_by_name(&students, "dov")[0].name, "Dovid");

    assert_eq!(filter_entries_by_search(&w, &students, "").len(), 3);
    let hits = filter_entries_by_search(&w, &students, "CHA");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].student_id, students[0].id);
}

#[test]
fn dangling_reference_displays_raw_id() {
    let students = vec![Student::new("Chaim").unwrap()];
    let gone = StudentId::parse("student-42").unwrap();

    assert_eq!(display_name(&students, &gone), "student-42");
    assert_eq!(display_name(&students, &students[0].id), "Chaim");
}

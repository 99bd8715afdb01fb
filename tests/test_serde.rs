#![cfg(feature = "serde")]

use timetable_ga::{
    rng::RandomNumberGenerator,
    timetable::{
        Assignment, Schedule, ScheduledLecture, Semester, Shift, Solver, TimetableConfig, TimetableEntry,
    },
};

#[test]
fn test_entries_from_json() {
    let json = r#"[
        {"teacher": "Khan", "course": "Calculus", "room": "R1",
         "class_section": "A", "semester": 2, "shift": "Morning"},
        {"teacher": "Malik", "course": "Physics", "room": "R2",
         "class_section": "A", "semester": 2, "shift": "Morning"}
    ]"#;
    let entries: Vec<TimetableEntry> = serde_json::from_str(json).unwrap();
    assert_eq!(entries[1].shift, Shift::Morning);
    assert_eq!(entries[0].semester.get(), 2);

    let mut rng = RandomNumberGenerator::from_seed(6);
    let solution = Solver::new()
        .timetable(&entries, &TimetableConfig::default(), &mut rng)
        .unwrap();

    let rendered = serde_json::to_string(&solution.lectures()).unwrap();
    let parsed: Vec<ScheduledLecture> = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, solution.lectures());
}

#[test]
fn test_semester_out_of_range_is_rejected() {
    let json = r#"{"teacher": "Khan", "course": "Calculus", "room": "R1",
        "class_section": "A", "semester": 9, "shift": "Morning"}"#;
    assert!(serde_json::from_str::<TimetableEntry>(json).is_err());
}

#[test]
fn test_schedule_is_rebuilt_through_the_problem() {
    let semester = Semester::new(2).unwrap();
    let entries = vec![
        TimetableEntry::new("Khan", "Calculus", "R1", "A", semester, Shift::Morning),
        TimetableEntry::new("Malik", "Physics", "R2", "A", semester, Shift::Morning),
    ];
    let mut rng = RandomNumberGenerator::from_seed(6);
    let solution = Solver::new()
        .timetable(&entries, &TimetableConfig::default(), &mut rng)
        .unwrap();

    let rendered = serde_json::to_value(&solution.schedule).unwrap();
    let assignments: Vec<Assignment> =
        serde_json::from_value(rendered["assignments"].clone()).unwrap();
    assert_eq!(assignments.len(), solution.problem.instances().len());

    let rebuilt = Schedule::from_assignments(&solution.problem, assignments.clone()).unwrap();
    assert_eq!(rebuilt, solution.schedule);

    let mut short = assignments;
    short.pop();
    assert!(Schedule::from_assignments(&solution.problem, short).is_none());
}

use std::collections::HashSet;

use timetable_ga::{
    error::SchedulingError,
    evolution::StopReason,
    rng::RandomNumberGenerator,
    timetable::{DatesheetConfig, DatesheetEntry, ProblemWarning, Solver},
};

fn crowded_week() -> Vec<DatesheetEntry> {
    vec![
        DatesheetEntry::new("2025-06-02", "09:00 AM", "Calculus", "Hall A"),
        DatesheetEntry::new("2025-06-02", "09:00 AM", "Physics", "Hall A"),
        DatesheetEntry::new("2025-06-03", "01:00 PM", "Chemistry", "Hall A"),
        DatesheetEntry::new("2025-06-04", "09:00 AM", "English", "Hall B"),
    ]
}

#[test]
fn test_exams_are_spread_over_dates() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = DatesheetConfig {
        dates: Some(
            ["2025-06-02", "2025-06-03", "2025-06-04", "2025-06-05"]
                .map(String::from)
                .to_vec(),
        ),
        ..Default::default()
    };
    let mut rng = RandomNumberGenerator::from_seed(17);
    let solution = Solver::new()
        .datesheet(&crowded_week(), &config, &mut rng)
        .unwrap();

    assert_eq!(solution.cost, 0.0);
    assert_eq!(solution.stop_reason, StopReason::Perfect);
    assert_eq!(solution.breakdown.legacy_fitness(), 1.0);

    let exams = solution.exams();
    assert_eq!(exams.len(), 4);
    let dates: HashSet<_> = exams.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates.len(), 4);
    assert!(exams.windows(2).all(|w| w[0].date <= w[1].date));

    let calculus = exams.iter().find(|e| e.subject == "Calculus").unwrap();
    assert_eq!(calculus.time, "09:00 AM");
}

#[test]
fn test_dates_default_to_entry_dates() {
    let mut rng = RandomNumberGenerator::from_seed(2);
    let solution = Solver::new()
        .datesheet(&crowded_week(), &DatesheetConfig::default(), &mut rng)
        .unwrap();

    assert_eq!(
        solution.problem.slots().days(),
        ["2025-06-02", "2025-06-03", "2025-06-04"]
    );
    assert_eq!(solution.problem.rooms(), ["Hall A", "Hall B"]);
    assert_eq!(solution.cost, 0.0);

    // Four exams over three dates: the two sharing a date need different halls.
    let exams = solution.exams();
    let mut seen = HashSet::new();
    for exam in &exams {
        assert!(seen.insert((exam.date.clone(), exam.room.clone())), "{exam:?}");
    }
    let dates: HashSet<_> = exams.iter().map(|e| e.date.clone()).collect();
    assert_eq!(dates.len(), 3);
}

#[test]
fn test_malformed_entries_are_skipped() {
    let mut entries = crowded_week();
    entries.insert(1, DatesheetEntry::new("2025-06-02", "09:00 AM", "", "Hall A"));
    entries.push(DatesheetEntry::new("2025-06-05", "", "Biology", "Hall B"));
    let mut rng = RandomNumberGenerator::from_seed(4);
    let solution = Solver::new()
        .datesheet(&entries, &DatesheetConfig::default(), &mut rng)
        .unwrap();

    assert_eq!(solution.exams().len(), 4);
    assert_eq!(
        solution.warnings(),
        [
            ProblemWarning::MalformedEntry {
                index: 1,
                field: "subject"
            },
            ProblemWarning::MalformedEntry {
                index: 5,
                field: "time"
            },
        ]
    );
}

#[test]
fn test_duplicate_subject_is_reported() {
    let mut entries = crowded_week();
    entries.push(DatesheetEntry::new("2025-06-03", "09:00 AM", "Physics", "Hall B"));
    let mut rng = RandomNumberGenerator::from_seed(4);
    let solution = Solver::new()
        .datesheet(&entries, &DatesheetConfig::default(), &mut rng)
        .unwrap();

    assert_eq!(solution.exams().len(), 4);
    assert!(matches!(
        &solution.warnings()[0],
        ProblemWarning::DuplicateActivity { index: 4, key } if key == "Physics"
    ));
}

#[test]
fn test_nothing_valid_to_schedule() {
    let entries = vec![DatesheetEntry::new("", "09:00 AM", "Calculus", "Hall A")];
    let mut rng = RandomNumberGenerator::from_seed(1);
    let err = Solver::new()
        .datesheet(&entries, &DatesheetConfig::default(), &mut rng)
        .unwrap_err();
    assert_eq!(err, SchedulingError::EmptyProblem);

    let err = Solver::new()
        .datesheet(&[], &DatesheetConfig::default(), &mut rng)
        .unwrap_err();
    assert_eq!(err, SchedulingError::EmptyProblem);
}

#[test]
fn test_empty_date_list_is_a_configuration_error() {
    let config = DatesheetConfig {
        dates: Some(Vec::new()),
        ..Default::default()
    };
    let mut rng = RandomNumberGenerator::from_seed(1);
    let err = Solver::new()
        .datesheet(&crowded_week(), &config, &mut rng)
        .unwrap_err();
    assert!(matches!(err, SchedulingError::Configuration(_)));
}

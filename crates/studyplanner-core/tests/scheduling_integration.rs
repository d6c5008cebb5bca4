//! Integration tests for end-to-end schedule generation.

use chrono::{Datelike, Duration, Timelike, Weekday};
use studyplanner_core::clock::format_timestamp;
use studyplanner_core::{
    CoreError, EntryType, FixedClock, FixedCommitment, Preferences, ScheduleEntry, ScheduleRequest,
    ScheduleResponse, Scheduler, SchedulerConfig, Task, ValidationError,
};

/// Thursday, before the first block of the day.
fn scheduler() -> Scheduler<FixedClock> {
    Scheduler::with_clock(FixedClock::parse("2026-10-15 07:00").unwrap())
}

fn tasks_only(schedule: &[ScheduleEntry]) -> Vec<&ScheduleEntry> {
    schedule
        .iter()
        .filter(|e| e.entry_type == EntryType::Task)
        .collect()
}

#[test]
fn test_weekly_class_expands_to_every_monday() {
    let class = FixedCommitment::new("Class", "Monday", "10:00", "11:00");
    let prefs = Preferences::new(["morning"]);

    let schedule = scheduler().generate_schedule(&[class], &[], &prefs).unwrap();

    // Mondays between 2026-10-15 and 2026-11-13
    assert_eq!(schedule.len(), 4);
    for entry in &schedule {
        assert_eq!(entry.entry_type, EntryType::FixedCommitment);
        assert_eq!(entry.subject, "Class");
        assert_eq!(entry.start.weekday(), Weekday::Mon);
        assert_eq!((entry.start.hour(), entry.start.minute()), (10, 0));
        assert_eq!((entry.end.hour(), entry.end.minute()), (11, 0));
    }
}

#[test]
fn test_essay_split_into_consecutive_afternoon_blocks() {
    let essay = Task::new("Essay", 90, 1, "2026-11-04");
    let prefs = Preferences::new(["afternoon"])
        .with_attention_span(60)
        .with_breaks(false);

    let schedule = scheduler().generate_schedule(&[], &[essay], &prefs).unwrap();

    assert_eq!(schedule.len(), 2);
    assert_eq!(format_timestamp(schedule[0].start), "2026-10-15 12:00");
    assert_eq!(format_timestamp(schedule[0].end), "2026-10-15 13:00");
    assert_eq!(format_timestamp(schedule[1].start), "2026-10-15 12:30");
    assert_eq!(format_timestamp(schedule[1].end), "2026-10-15 13:00");
}

#[test]
fn test_breaks_leave_one_block_between_chunks() {
    let essay = Task::new("Essay", 90, 1, "2026-11-04");
    let prefs = Preferences::new(["afternoon"])
        .with_attention_span(60)
        .with_breaks(true);

    let schedule = scheduler().generate_schedule(&[], &[essay], &prefs).unwrap();

    assert_eq!(schedule.len(), 2);
    assert_eq!(format_timestamp(schedule[0].start), "2026-10-15 12:00");
    assert_eq!(format_timestamp(schedule[1].start), "2026-10-15 13:00");
    assert_eq!(schedule[1].duration_minutes(), 30);
}

#[test]
fn test_exhausted_blocks_drop_later_tasks() {
    // A one-day horizon where the lab leaves only the 18:30 evening block
    let lab = FixedCommitment::new("Lab", "Thursday", "17:00", "18:30");
    let tasks = vec![
        Task::new("First", 60, 1, "2026-12-01"),
        Task::new("Second", 60, 2, "2026-12-01"),
    ];
    let prefs = Preferences::new(["evening"]);
    let scheduler = scheduler().with_config(SchedulerConfig { horizon_days: 1 });

    let plan = scheduler.plan(&[lab], &tasks, &prefs).unwrap();
    let placed = tasks_only(&plan.schedule);

    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].subject, "First");
    assert_eq!(format_timestamp(placed[0].start), "2026-10-15 18:30");
    assert!(plan.schedule.iter().all(|e| e.subject != "Second"));
    assert_eq!(plan.dropped.len(), 1);
    assert_eq!(plan.dropped[0].subject, "Second");
}

#[test]
fn test_zero_estimate_is_rejected() {
    let tasks = vec![Task::new("Nothing", 0, 1, "2026-11-04")];
    let prefs = Preferences::new(["morning"]);

    let err = scheduler().generate_schedule(&[], &tasks, &prefs).unwrap_err();
    match err {
        CoreError::Validation(ValidationError::Task { subject, source }) => {
            assert_eq!(subject, "Nothing");
            assert_eq!(*source, ValidationError::NonPositiveDuration { minutes: 0 });
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_frozen_clock_is_idempotent() {
    let commitments = vec![
        FixedCommitment::new("Class", "Monday", "10:00", "11:00"),
        FixedCommitment::new("Seminar", "Friday", "13:00", "14:30"),
    ];
    let tasks = vec![
        Task::new("Essay", 150, 3, "2026-10-20"),
        Task::new("Reading", 45, 2, "2026-11-10"),
        Task::new("Problem set", 120, 1, "2026-10-30"),
    ];
    let prefs = Preferences::new(["morning", "afternoon"]).with_breaks(true);

    let first = scheduler().generate_schedule(&commitments, &tasks, &prefs).unwrap();
    let second = scheduler().generate_schedule(&commitments, &tasks, &prefs).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_output_is_ordered_by_start_string() {
    let commitments = vec![
        FixedCommitment::new("Seminar", "Friday", "13:00", "14:30"),
        FixedCommitment::new("Class", "Monday", "10:00", "11:00"),
    ];
    let tasks = vec![
        Task::new("Essay", 600, 3, "2026-10-20"),
        Task::new("Reading", 240, 2, "2026-11-10"),
    ];
    let prefs = Preferences::new(["morning", "afternoon", "night"]);

    let schedule = scheduler().generate_schedule(&commitments, &tasks, &prefs).unwrap();
    let starts: Vec<String> = schedule.iter().map(|e| format_timestamp(e.start)).collect();

    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[test]
fn test_tasks_never_start_inside_commitments() {
    let commitments = vec![FixedCommitment::new("Work", "Thursday", "09:00", "12:00")];
    let tasks = vec![Task::new("Essay", 120, 1, "2026-11-04")];
    let prefs = Preferences::new(["morning", "afternoon"]).with_attention_span(30);

    let schedule = scheduler().generate_schedule(&commitments, &tasks, &prefs).unwrap();
    let work: Vec<_> = schedule
        .iter()
        .filter(|e| e.entry_type == EntryType::FixedCommitment)
        .collect();

    for task in tasks_only(&schedule) {
        for c in &work {
            assert!(!(task.start >= c.start && task.start < c.end));
        }
    }
    assert_eq!(format_timestamp(tasks_only(&schedule)[0].start), "2026-10-15 12:00");
}

#[test]
fn test_overdue_task_goes_first() {
    let tasks = vec![
        Task::new("Later", 30, 1, "2026-12-01"),
        Task::new("Overdue", 30, 8, "2026-10-10"),
    ];
    let prefs = Preferences::new(["morning"]);

    let schedule = scheduler().generate_schedule(&[], &tasks, &prefs).unwrap();

    // Overdue: 8 - (7 - (-6)) = -5 beats Later: 1
    assert_eq!(schedule[0].subject, "Overdue");
    assert_eq!(schedule[1].subject, "Later");
}

#[test]
fn test_chunk_longer_than_block_overruns_slot() {
    let tasks = vec![Task::new("Deep work", 90, 1, "2026-12-01")];
    let prefs = Preferences::new(["night"]).with_attention_span(90);

    let schedule = scheduler().generate_schedule(&[], &tasks, &prefs).unwrap();

    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].start + Duration::minutes(90), schedule[0].end);
    assert_eq!(format_timestamp(schedule[0].start), "2026-10-15 20:00");
}

#[test]
fn test_request_roundtrip_through_json() {
    let request: ScheduleRequest = serde_json::from_str(
        r#"{
            "commitments": [{"subject": "Class", "day": "Thursday", "startTime": "12:00", "endTime": "13:00"}],
            "tasks": [{"subject": "Essay", "estimated": 30, "priority": 1, "due": "2026-11-04"}],
            "preferences": {"preferredTimes": ["afternoon"]}
        }"#,
    )
    .unwrap();

    let schedule = scheduler()
        .generate_schedule(
            &request.commitments,
            &request.tasks,
            request.preferences.as_ref().unwrap(),
        )
        .unwrap();
    let response = serde_json::to_value(ScheduleResponse { schedule }).unwrap();

    let first = &response["schedule"][0];
    assert_eq!(first["type"], "Fixed Commitment");
    assert_eq!(first["start"], "2026-10-15 12:00");
    let task = response["schedule"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["type"] == "Task")
        .unwrap();
    assert_eq!(task["start"], "2026-10-15 13:00");
    assert_eq!(task["end"], "2026-10-15 13:30");
}

#[test]
fn test_malformed_due_date_propagates() {
    let tasks = vec![Task::new("Essay", 30, 1, "04/11/2026")];
    let err = scheduler()
        .generate_schedule(&[], &tasks, &Preferences::new(["morning"]))
        .unwrap_err();
    assert!(matches!(err, CoreError::Parse(_)));
}

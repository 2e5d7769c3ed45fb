//! End-to-end scheduling scenarios over the public API, driving the
//! engine with the same JSON task records a caller would supply.

use chrono::NaiveDate;
use dayplan_core::{
    confidence, DynamicTask, PatternAnalyzer, PriorityScorer, RegularTask, Scheduler, Task,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn parse_tasks(json: &str) -> (Vec<RegularTask>, Vec<DynamicTask>) {
    let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
    let mut regular = Vec::new();
    let mut dynamic = Vec::new();
    for task in tasks {
        match task {
            Task::Regular(t) => regular.push(t),
            Task::Dynamic(t) => dynamic.push(t),
        }
    }
    (regular, dynamic)
}

#[test]
fn full_day_from_wire_records() {
    let (regular, dynamic) = parse_tasks(
        r#"[
        {"kind": "regular", "id": 1, "title": "Math class",
         "start_time": "2025-03-03T10:00:00", "end_time": "2025-03-03T11:30:00",
         "repeat_rule": "once"},
        {"kind": "regular", "id": 2, "title": "Standup",
         "start_time": "2025-03-03T09:00:00", "end_time": "2025-03-03T09:15:00",
         "repeat_rule": "daily"},
        {"kind": "dynamic", "id": 3, "title": "Essay draft",
         "priority": "high", "estimated_minutes": 90, "deadline": "2025-03-04",
         "tags": ["assignment"]},
        {"kind": "dynamic", "id": 4, "title": "Laundry",
         "priority": "low", "estimated_minutes": 45},
        {"kind": "dynamic", "id": 5, "title": "Already done",
         "priority": "high", "estimated_minutes": 30, "completed": true}
    ]"#,
    );

    let schedule = Scheduler::new().build_daily_schedule(&regular, &dynamic, date());

    // Two regular occurrences plus two placed dynamic tasks.
    assert_eq!(schedule.len(), 4);

    let titles: Vec<&str> = schedule.iter().map(|i| i.title.as_str()).collect();
    assert!(titles.contains(&"Math class"));
    assert!(titles.contains(&"Standup"));
    assert!(titles.contains(&"Essay draft"));
    assert!(titles.contains(&"Laundry"));
    assert!(!titles.contains(&"Already done"));

    // The essay (100 base + 100 deadline + 15 tag; 90 minutes earns no
    // duration bonus) outranks laundry and takes the earliest slot that
    // fits: 09:15-10:00 is too short for 90 minutes, so it lands after
    // the class.
    let essay = schedule.iter().find(|i| i.title == "Essay draft").unwrap();
    assert_eq!(essay.start_time, "2025-03-03T11:30:00");
    assert_eq!(essay.end_time, "2025-03-03T13:00:00");
    assert_eq!(essay.priority_score, 215.0);
    assert_eq!(essay.confidence, confidence(215.0));

    // Laundry (base 30 + 10 for a 45-minute estimate = 40) fits into
    // the 09:15-10:00 gap left by the standup.
    let laundry = schedule.iter().find(|i| i.title == "Laundry").unwrap();
    assert_eq!(laundry.start_time, "2025-03-03T09:15:00");
    assert_eq!(laundry.end_time, "2025-03-03T10:00:00");

    // Ascending start times throughout.
    let starts: Vec<&str> = schedule.iter().map(|i| i.start_time.as_str()).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[test]
fn contested_slot_goes_to_higher_score() {
    let regular = vec![
        RegularTask::new(1, "block morning")
            .with_times("2025-03-03T09:00:00", "2025-03-03T12:00:00")
            .with_repeat("once"),
        RegularTask::new(2, "block afternoon")
            .with_times("2025-03-03T13:00:00", "2025-03-03T22:00:00")
            .with_repeat("once"),
    ];
    let dynamic = vec![
        DynamicTask::new(3, "B").with_priority("medium").with_estimate(60),
        DynamicTask::new(4, "A").with_priority("high").with_estimate(60),
    ];

    let schedule = Scheduler::new().build_daily_schedule(&regular, &dynamic, date());
    let placed: Vec<_> = schedule.iter().filter(|i| i.priority_score < 1000.0).collect();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].title, "A");
    assert_eq!(placed[0].start_time, "2025-03-03T12:00:00");
}

#[test]
fn regular_items_carry_sentinel_score() {
    let regular = vec![RegularTask::new(1, "class")
        .with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00")
        .with_repeat("once")];
    let schedule = Scheduler::new().build_daily_schedule(&regular, &[], date());
    assert_eq!(schedule[0].priority_score, 1000.0);
    assert_eq!(schedule[0].confidence, 1.0);
}

#[test]
fn confidence_tracks_score_for_dynamic_items() {
    let dynamic = vec![
        DynamicTask::new(1, "a").with_priority("high").with_estimate(30),
        DynamicTask::new(2, "b")
            .with_priority("high")
            .with_estimate(30)
            .with_deadline("2025-03-03")
            .with_tag("exam"),
    ];
    let schedule = Scheduler::new().build_daily_schedule(&[], &dynamic, date());
    for item in schedule.iter().filter(|i| i.priority_score < 1000.0) {
        assert_eq!(item.confidence, confidence(item.priority_score));
        assert!(item.confidence <= 1.0);
    }
}

#[test]
fn standalone_scorer_agrees_with_scheduler() {
    let task: Task = DynamicTask::new(1, "t")
        .with_priority("high")
        .with_estimate(30)
        .into();
    let scheduler = Scheduler::new();
    let direct = PriorityScorer::new(scheduler.timezone()).score(&task, date());
    assert_eq!(direct, scheduler.score(&task, date()));
    assert_eq!(direct, 120.0);
}

#[test]
fn analyzer_handles_mixed_history() {
    let (regular, dynamic) = parse_tasks(
        r#"[
        {"kind": "regular", "id": 1, "title": "Class",
         "created_at": "2025-03-08T08:00:00"},
        {"kind": "dynamic", "id": 2, "title": "Homework", "priority": "high",
         "created_at": "2025-03-08T09:00:00", "completed": true,
         "completed_at": "2025-03-08T15:00:00"}
    ]"#,
    );
    let tasks: Vec<Task> = regular
        .into_iter()
        .map(Task::from)
        .chain(dynamic.into_iter().map(Task::from))
        .collect();

    let tz = Scheduler::new().timezone();
    let now = chrono::TimeZone::with_ymd_and_hms(&tz, 2025, 3, 10, 12, 0, 0).unwrap();
    let report = PatternAnalyzer::new(tz).analyze(&tasks, 7, now);

    assert_eq!(report.total_tasks, 2);
    assert_eq!(report.total_completed, 1);
    assert_eq!(report.completion_rate, 50.0);
    assert_eq!(report.tasks_by_type.regular, 1);
    assert_eq!(report.tasks_by_type.dynamic, 1);
    assert_eq!(report.average_completion_time_hours, Some(6.0));
    assert_eq!(report.preferred_time_slots.get(&15), Some(&1));
}

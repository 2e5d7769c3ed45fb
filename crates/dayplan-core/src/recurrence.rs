//! Occurrence resolution for recurring regular tasks.
//!
//! Decides whether a (possibly recurring) regular task materializes on a
//! given calendar date. Consulted both when computing free slots and when
//! appending the day's fixed commitments to a schedule.

use chrono::{Datelike, NaiveDate};

use crate::clock;
use crate::task::{RegularTask, RepeatRule};

/// Whether `task` occurs on `date`.
///
/// - `once`: the calendar date of `start_time` equals `date`
/// - `daily`: every date
/// - `weekly`: the weekday of `start_time` equals the weekday of `date`
///
/// An unrecognized rule, or `once`/`weekly` without a parseable
/// `start_time`, never occurs.
pub fn occurs_on(task: &RegularTask, date: NaiveDate) -> bool {
    match task.repeat() {
        Some(RepeatRule::Daily) => true,
        Some(RepeatRule::Once) => anchor_date(task).is_some_and(|d| d == date),
        Some(RepeatRule::Weekly) => anchor_date(task).is_some_and(|d| d.weekday() == date.weekday()),
        None => false,
    }
}

fn anchor_date(task: &RegularTask) -> Option<NaiveDate> {
    let raw = task.start_time.as_deref()?;
    clock::parse_date_portion(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::RegularTask;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_once_matches_exact_date_only() {
        let task = RegularTask::new(1, "Dentist")
            .with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00")
            .with_repeat("once");

        assert!(occurs_on(&task, date(2025, 3, 3)));
        assert!(!occurs_on(&task, date(2025, 3, 4)));
        assert!(!occurs_on(&task, date(2025, 3, 10)));
    }

    #[test]
    fn test_daily_matches_every_date() {
        let task = RegularTask::new(2, "Standup")
            .with_times("2025-01-01T09:30:00", "2025-01-01T09:45:00")
            .with_repeat("daily");

        assert!(occurs_on(&task, date(2025, 3, 3)));
        assert!(occurs_on(&task, date(2026, 12, 31)));
    }

    #[test]
    fn test_daily_without_start_time_still_occurs() {
        let task = RegularTask::new(3, "Journal").with_repeat("daily");
        assert!(occurs_on(&task, date(2025, 3, 3)));
    }

    #[test]
    fn test_weekly_matches_same_weekday() {
        // 2025-03-03 is a Monday
        let task = RegularTask::new(4, "Math class")
            .with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00")
            .with_repeat("weekly");

        assert!(occurs_on(&task, date(2025, 3, 10))); // next Monday
        assert!(!occurs_on(&task, date(2025, 3, 11))); // Tuesday
    }

    #[test]
    fn test_unrecognized_rule_never_occurs() {
        let task = RegularTask::new(5, "Rent")
            .with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00")
            .with_repeat("monthly");
        assert!(!occurs_on(&task, date(2025, 3, 3)));

        let task = RegularTask::new(6, "No rule").with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00");
        assert!(!occurs_on(&task, date(2025, 3, 3)));
    }

    #[test]
    fn test_once_without_start_time_never_occurs() {
        let task = RegularTask::new(7, "Orphan").with_repeat("once");
        assert!(!occurs_on(&task, date(2025, 3, 3)));

        let task = RegularTask::new(8, "Weekly orphan").with_repeat("weekly");
        assert!(!occurs_on(&task, date(2025, 3, 3)));
    }
}

//! Free-slot discovery around a day's fixed commitments.
//!
//! Sweeps the day's regular-task occurrences in start order with a
//! monotonic cursor, emitting every gap inside the work window that meets
//! the minimum duration. Occurrences nested inside earlier ones never
//! reopen already-consumed time, so overlapping input degrades gracefully.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::clock;
use crate::recurrence::occurs_on;
use crate::task::RegularTask;

/// A contiguous free interval on a given date. Duration is always derived
/// from the endpoints, never stored, so trimming a slot cannot desync it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether a task of `minutes` fits into this slot.
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }
}

/// Finds free slots between regular-task occurrences.
#[derive(Debug, Clone, Copy)]
pub struct SlotFinder {
    tz: Tz,
    min_duration_minutes: i64,
    work_start_hour: u32,
    work_end_hour: u32,
}

impl SlotFinder {
    /// Create a finder with the default 30-minute minimum and a
    /// 09:00-22:00 work window.
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            min_duration_minutes: 30,
            work_start_hour: 9,
            work_end_hour: 22,
        }
    }

    pub fn with_min_duration(mut self, minutes: i64) -> Self {
        self.min_duration_minutes = minutes;
        self
    }

    pub fn with_work_hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.work_start_hour = start_hour;
        self.work_end_hour = end_hour;
        self
    }

    /// Ordered free slots on `date`, given all of the caller's regular
    /// tasks. Only the day's pending occurrences with parseable times
    /// block the window; the rest are skipped with a warning.
    pub fn find_free_slots(&self, regular_tasks: &[RegularTask], date: NaiveDate) -> Vec<TimeSlot> {
        let window_start = clock::at_hour(date, self.work_start_hour, self.tz);
        let window_end = clock::at_hour(date, self.work_end_hour, self.tz);
        let (Some(window_start), Some(window_end)) = (window_start, window_end) else {
            tracing::warn!(%date, "work window does not exist in configured timezone");
            return Vec::new();
        };

        let mut occurrences: Vec<(DateTime<Tz>, DateTime<Tz>)> = Vec::new();
        for task in regular_tasks {
            if task.completed || !occurs_on(task, date) {
                continue;
            }
            let (Some(start_raw), Some(end_raw)) = (task.start_time.as_deref(), task.end_time.as_deref())
            else {
                continue;
            };
            match (
                clock::parse_timestamp(start_raw, self.tz),
                clock::parse_timestamp(end_raw, self.tz),
            ) {
                (Ok(start), Ok(end)) => occurrences.push((start, end)),
                _ => {
                    tracing::warn!(task = %task.title, "skipping occurrence with unparseable times");
                }
            }
        }
        occurrences.sort_by_key(|(start, _)| *start);

        let mut slots = Vec::new();
        let mut cursor = window_start;
        for (start, end) in occurrences {
            if start > cursor && (start - cursor).num_minutes() >= self.min_duration_minutes {
                slots.push(TimeSlot { start: cursor, end: start });
            }
            // Monotonic: a nested occurrence never moves the cursor back.
            cursor = cursor.max(end);
        }
        if window_end > cursor && (window_end - cursor).num_minutes() >= self.min_duration_minutes {
            slots.push(TimeSlot {
                start: cursor,
                end: window_end,
            });
        }
        slots
    }
}

//! Daily and weekly schedule building.
//!
//! Merges the day's regular-task occurrences with dynamic tasks packed
//! greedily into the remaining free slots. Placement is first-fit over
//! score-ranked candidates: no optimality guarantee, one placement per
//! candidate, unplaceable candidates are silently dropped. Output is
//! fully determined by the inputs and the date -- no wall-clock reads.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::recurrence::occurs_on;
use crate::scoring::{confidence, PriorityScorer};
use crate::slots::{SlotFinder, TimeSlot};
use crate::task::{DynamicTask, RegularTask, Task, TaskId};

/// Priority score assigned to regular occurrences: always above any
/// dynamic score so callers can tell the two apart.
const REGULAR_OCCURRENCE_SCORE: f64 = 1000.0;

/// One entry in a built schedule.
///
/// Times are naive local ISO strings in the engine's configured timezone.
/// Entries derived from a regular occurrence carry that task's times
/// verbatim, `priority_score` 1000 and `confidence` 1.0; entries derived
/// from a dynamic task span exactly its estimated duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub task_id: TaskId,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub priority_score: f64,
    pub confidence: f64,
}

/// A week of independently built daily schedules, keyed by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub start_date: String,
    pub end_date: String,
    pub total_tasks: usize,
    pub days: BTreeMap<String, Vec<ScheduleItem>>,
}

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Timezone every boundary timestamp is localized into.
    pub timezone: Tz,
    /// Minimum slot duration worth emitting (minutes).
    pub min_slot_minutes: i64,
    /// Work window start hour (local).
    pub work_start_hour: u32,
    /// Work window end hour (local).
    pub work_end_hour: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Shanghai,
            min_slot_minutes: 30,
            work_start_hour: 9,
            work_end_hour: 22,
        }
    }
}

/// The scheduling engine. Stateless between calls: every invocation
/// allocates its own working lists, so independent callers can share one
/// instance across threads freely.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a scheduler with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    fn slot_finder(&self) -> SlotFinder {
        SlotFinder::new(self.config.timezone)
            .with_min_duration(self.config.min_slot_minutes)
            .with_work_hours(self.config.work_start_hour, self.config.work_end_hour)
    }

    /// Free slots on `date` under this scheduler's configuration.
    pub fn find_free_slots(&self, regular_tasks: &[RegularTask], date: NaiveDate) -> Vec<TimeSlot> {
        self.slot_finder().find_free_slots(regular_tasks, date)
    }

    /// Priority score for any task against `date`.
    pub fn score(&self, task: &Task, date: NaiveDate) -> f64 {
        PriorityScorer::new(self.config.timezone).score(task, date)
    }

    /// Build the merged, time-ordered schedule for one date.
    ///
    /// Dynamic candidates (pending, with a positive duration estimate) are
    /// ranked by score -- stable, so equal scores keep input order -- and
    /// placed first-fit into the day's free slots. The day's regular
    /// occurrences are then appended with their own times.
    pub fn build_daily_schedule(
        &self,
        regular_tasks: &[RegularTask],
        dynamic_tasks: &[DynamicTask],
        date: NaiveDate,
    ) -> Vec<ScheduleItem> {
        let scorer = PriorityScorer::new(self.config.timezone);

        let mut ranked: Vec<(&DynamicTask, f64)> = dynamic_tasks
            .iter()
            .filter(|task| !task.completed)
            .filter(|task| task.estimated_minutes.is_some_and(|m| m > 0))
            .map(|task| (task, scorer.score_dynamic(task, date)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut slots = self.find_free_slots(regular_tasks, date);
        let mut items = Vec::new();

        for (task, score) in ranked {
            let minutes = task.estimated_minutes.unwrap_or(0);
            // First slot the task fits into; candidates that fit nowhere
            // are dropped without retry.
            let Some(index) = slots.iter().position(|slot| slot.can_fit(minutes)) else {
                continue;
            };
            let start = slots[index].start;
            let end = start + Duration::minutes(minutes);
            items.push(ScheduleItem {
                task_id: task.id.clone(),
                title: task.title.clone(),
                start_time: clock::format_local(&start),
                end_time: clock::format_local(&end),
                priority_score: score,
                confidence: confidence(score),
            });
            if end < slots[index].end {
                // Leave the remainder in place; no minimum re-check here.
                slots[index] = TimeSlot {
                    start: end,
                    end: slots[index].end,
                };
            } else {
                slots.remove(index);
            }
        }

        for task in regular_tasks {
            if !occurs_on(task, date) {
                continue;
            }
            let (Some(start), Some(end)) = (&task.start_time, &task.end_time) else {
                continue;
            };
            items.push(ScheduleItem {
                task_id: task.id.clone(),
                title: task.title.clone(),
                start_time: start.clone(),
                end_time: end.clone(),
                priority_score: REGULAR_OCCURRENCE_SCORE,
                confidence: 1.0,
            });
        }

        // Lexicographic order on naive local ISO strings is chronological;
        // the stable sort keeps append order for equal starts.
        items.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        items
    }

    /// Build seven consecutive daily schedules starting at `start`.
    /// Each day is packed independently; there is no cross-day lookahead.
    pub fn build_weekly_schedule(
        &self,
        regular_tasks: &[RegularTask],
        dynamic_tasks: &[DynamicTask],
        start: NaiveDate,
    ) -> WeeklySchedule {
        let mut days = BTreeMap::new();
        let mut total_tasks = 0;
        for offset in 0..7 {
            let date = start + Duration::days(offset);
            let schedule = self.build_daily_schedule(regular_tasks, dynamic_tasks, date);
            total_tasks += schedule.len();
            days.insert(date.format("%Y-%m-%d").to_string(), schedule);
        }
        WeeklySchedule {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: (start + Duration::days(6)).format("%Y-%m-%d").to_string(),
            total_tasks,
            days,
        }
    }
}

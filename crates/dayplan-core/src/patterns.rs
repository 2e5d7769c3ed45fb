//! Work pattern analysis over a task history window.
//!
//! Aggregates completion behavior into counters, histograms and a list of
//! qualitative insight/suggestion strings. Runs over the caller's full
//! task history, independent of any built schedule. The reference "now"
//! is injected so analysis stays reproducible; the production caller
//! passes real current time.
//!
//! Dirty data fails open: a task whose `created_at` cannot be parsed is
//! still counted, so totals remain representative.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::task::{Task, TaskKind, TaskPriority};

/// The window a report covers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub start_date: String,
    pub end_date: String,
    pub days_analyzed: i64,
}

/// Task counts per priority label. Unrecognized labels are not counted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PriorityTally {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// Task counts per kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KindTally {
    pub regular: u32,
    pub dynamic: u32,
}

/// Aggregate report over a task history window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPatternReport {
    pub analysis_period: AnalysisPeriod,
    pub total_tasks: usize,
    pub total_completed: usize,
    /// Percentage, rounded to 2 decimals; 0 when there are no tasks.
    pub completion_rate: f64,
    pub tasks_by_priority: PriorityTally,
    pub tasks_by_type: KindTally,
    /// Mean hours from creation to completion; absent without samples.
    pub average_completion_time_hours: Option<f64>,
    /// Completions per hour of day (0-23).
    pub preferred_time_slots: BTreeMap<u32, u32>,
    /// Completions per weekday name.
    pub weekly_pattern: BTreeMap<String, u32>,
    pub insights: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WorkPatternReport {
    /// Degraded report returned instead of propagating an internal
    /// analysis failure.
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: Some("work pattern analysis failed, please retry later".to_string()),
            suggestions: vec![
                "Make sure task records carry complete created/completed timestamps".to_string(),
            ],
            ..Self::default()
        }
    }
}

/// Analyzer for historical completion behavior.
#[derive(Debug, Clone, Copy)]
pub struct PatternAnalyzer {
    tz: Tz,
}

impl PatternAnalyzer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Analyze `tasks` over the `window_days` ending at `now`.
    pub fn analyze(&self, tasks: &[Task], window_days: i64, now: DateTime<Tz>) -> WorkPatternReport {
        let Some(window_start) = Duration::try_days(window_days)
            .and_then(|window| now.checked_sub_signed(window))
        else {
            return WorkPatternReport::degraded(format!(
                "analysis window of {window_days} days is out of range"
            ));
        };

        let recent: Vec<&Task> = tasks
            .iter()
            .filter(|task| match task.created_at() {
                None => false,
                Some(raw) => match clock::parse_timestamp(raw, self.tz) {
                    Ok(created) => created >= window_start,
                    // Fail open: keep the task so counts stay representative.
                    Err(_) => true,
                },
            })
            .collect();

        let mut report = WorkPatternReport {
            analysis_period: AnalysisPeriod {
                start_date: window_start.format("%Y-%m-%d").to_string(),
                end_date: now.format("%Y-%m-%d").to_string(),
                days_analyzed: window_days,
            },
            total_tasks: recent.len(),
            ..WorkPatternReport::default()
        };

        let completed: Vec<&Task> = recent.iter().copied().filter(|t| t.completed()).collect();
        report.total_completed = completed.len();
        if !recent.is_empty() {
            report.completion_rate = round2(completed.len() as f64 / recent.len() as f64 * 100.0);
        }

        for task in &recent {
            match task {
                Task::Regular(_) => report.tasks_by_type.regular += 1,
                Task::Dynamic(t) => {
                    report.tasks_by_type.dynamic += 1;
                    match t.priority_label() {
                        Some(TaskPriority::High) => report.tasks_by_priority.high += 1,
                        Some(TaskPriority::Medium) => report.tasks_by_priority.medium += 1,
                        Some(TaskPriority::Low) => report.tasks_by_priority.low += 1,
                        None => {}
                    }
                }
            }
        }

        report.average_completion_time_hours = self.average_completion_hours(&completed);
        let modal_hour = self.tally_completion_times(&completed, &mut report);
        self.generate_insights(&mut report, modal_hour);
        report
    }

    fn average_completion_hours(&self, completed: &[&Task]) -> Option<f64> {
        let mut samples = Vec::new();
        for task in completed {
            let (Some(created_raw), Some(completed_raw)) = (task.created_at(), task.completed_at())
            else {
                continue;
            };
            let (Ok(created), Ok(done)) = (
                clock::parse_timestamp(created_raw, self.tz),
                clock::parse_timestamp(completed_raw, self.tz),
            ) else {
                tracing::warn!(task = task.title(), "skipping completion-time sample with bad timestamps");
                continue;
            };
            if done > created {
                samples.push((done - created).num_seconds() as f64 / 3600.0);
            }
        }
        if samples.is_empty() {
            return None;
        }
        Some(round2(samples.iter().sum::<f64>() / samples.len() as f64))
    }

    /// Fill the hour and weekday histograms; returns the modal completion
    /// hour, ties resolved by first-encountered order.
    fn tally_completion_times(&self, completed: &[&Task], report: &mut WorkPatternReport) -> Option<u32> {
        let mut hour_counts = [0u32; 24];
        let mut hour_order: Vec<u32> = Vec::new();
        for task in completed {
            let Some(raw) = task.completed_at() else {
                continue;
            };
            let Ok(done) = clock::parse_timestamp(raw, self.tz) else {
                tracing::warn!(task = task.title(), "skipping histogram sample with bad completed_at");
                continue;
            };
            let hour = done.hour();
            if hour_counts[hour as usize] == 0 {
                hour_order.push(hour);
            }
            hour_counts[hour as usize] += 1;
            *report
                .weekly_pattern
                .entry(done.format("%A").to_string())
                .or_insert(0) += 1;
        }
        for hour in 0..24u32 {
            if hour_counts[hour as usize] > 0 {
                report.preferred_time_slots.insert(hour, hour_counts[hour as usize]);
            }
        }
        hour_order
            .iter()
            .copied()
            .max_by_key(|&hour| {
                // Stable max: earlier first-encounter wins ties.
                let first_seen = hour_order.iter().position(|&h| h == hour).unwrap_or(0);
                (hour_counts[hour as usize], std::cmp::Reverse(first_seen))
            })
            .filter(|&hour| hour_counts[hour as usize] > 0)
    }

    /// Fixed-order insight generation; every condition is evaluated
    /// independently.
    fn generate_insights(&self, report: &mut WorkPatternReport, modal_hour: Option<u32>) {
        if report.completion_rate >= 80.0 {
            report
                .insights
                .push("Your completion rate is high. Keep it up!".to_string());
        }
        if report.completion_rate < 50.0 {
            report
                .insights
                .push("Completion rate is on the low side; the task plan may need adjusting".to_string());
            report
                .suggestions
                .push("Try setting more realistic deadlines and avoid overcommitting".to_string());
        }
        if report.tasks_by_priority.high > report.tasks_by_priority.medium {
            report
                .insights
                .push("Many tasks are marked high priority; watch your workload".to_string());
            report
                .suggestions
                .push("Spread priorities out instead of marking everything high".to_string());
        }
        if let Some(hour) = modal_hour {
            report
                .insights
                .push(format!("You complete the most tasks around {hour}:00"));
            report
                .suggestions
                .push(format!("Schedule focus-heavy work around {hour}:00"));
        }
        report
            .suggestions
            .push("Review task progress regularly and adjust the plan".to_string());
        report
            .suggestions
            .push("Insert short rests between tasks to stay effective".to_string());
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Priority scoring for tasks relative to a reference date.
//!
//! Produces an unbounded urgency score from four additive terms:
//! - base score by kind and priority label
//! - deadline proximity in whole days
//! - estimated duration (short tasks are easier to place)
//! - important tags (+15 at most once)
//!
//! Completed tasks always score exactly 0. An unparseable deadline is
//! logged and its term skipped; a bad field never aborts a batch pass.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::clock;
use crate::task::{DynamicTask, RegularTask, Task, TaskPriority, IMPORTANT_TAGS};

/// Base score for a regular task occurrence.
const REGULAR_BASE_SCORE: f64 = 80.0;

/// Divisor mapping a priority score onto the 0..=1 confidence range.
const CONFIDENCE_CEILING: f64 = 300.0;

/// Normalized confidence proxy for a score: `min(1, score / 300)`.
pub fn confidence(score: f64) -> f64 {
    (score / CONFIDENCE_CEILING).min(1.0)
}

/// Scores tasks against a reference date in one configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct PriorityScorer {
    tz: Tz,
}

impl PriorityScorer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Score any task. Dispatches on kind.
    pub fn score(&self, task: &Task, reference: NaiveDate) -> f64 {
        match task {
            Task::Regular(t) => self.score_regular(t, reference),
            Task::Dynamic(t) => self.score_dynamic(t, reference),
        }
    }

    /// Score a dynamic task. Absent or unrecognized priority labels fall
    /// back to the low base score.
    pub fn score_dynamic(&self, task: &DynamicTask, reference: NaiveDate) -> f64 {
        if task.completed {
            return 0.0;
        }
        let base = task
            .priority_label()
            .unwrap_or(TaskPriority::Low)
            .base_score();
        let mut score = base + self.deadline_weight(task.deadline.as_deref(), &task.title, reference);
        if let Some(minutes) = task.estimated_minutes {
            score += duration_weight(minutes);
        }
        score + tag_weight(&task.tags)
    }

    /// Score a regular task occurrence.
    pub fn score_regular(&self, task: &RegularTask, reference: NaiveDate) -> f64 {
        if task.completed {
            return 0.0;
        }
        REGULAR_BASE_SCORE
            + self.deadline_weight(task.deadline.as_deref(), &task.title, reference)
            + tag_weight(&task.tags)
    }

    fn deadline_weight(&self, deadline: Option<&str>, title: &str, reference: NaiveDate) -> f64 {
        let Some(raw) = deadline else {
            return 0.0;
        };
        match clock::parse_timestamp(raw, self.tz) {
            Ok(deadline) => {
                let days_until = (deadline.date_naive() - reference).num_days();
                if days_until <= 0 {
                    150.0 // due today or overdue
                } else if days_until == 1 {
                    100.0
                } else if days_until <= 3 {
                    50.0
                } else if days_until <= 7 {
                    20.0
                } else {
                    0.0
                }
            }
            Err(err) => {
                tracing::warn!(task = title, %err, "skipping deadline weight");
                0.0
            }
        }
    }
}

fn duration_weight(estimated_minutes: i64) -> f64 {
    if estimated_minutes <= 30 {
        20.0 // short tasks are easy to place
    } else if estimated_minutes <= 60 {
        10.0
    } else if estimated_minutes > 180 {
        -10.0
    } else {
        0.0
    }
}

/// +15 if any tag is in the important vocabulary; counted at most once.
fn tag_weight(tags: &[String]) -> f64 {
    let important = tags
        .iter()
        .any(|tag| IMPORTANT_TAGS.iter().any(|known| tag.eq_ignore_ascii_case(known)));
    if important {
        15.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{DynamicTask, RegularTask};
    use chrono_tz::Asia::Shanghai;

    fn scorer() -> PriorityScorer {
        PriorityScorer::new(Shanghai)
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn test_completed_scores_zero() {
        let task = DynamicTask::new(1, "done")
            .with_priority("high")
            .with_estimate(20)
            .with_deadline("2025-03-03")
            .with_completed(true);
        assert_eq!(scorer().score_dynamic(&task, reference()), 0.0);

        let task = RegularTask::new(2, "past class")
            .with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00")
            .with_completed(true);
        assert_eq!(scorer().score_regular(&task, reference()), 0.0);
    }

    #[test]
    fn test_high_priority_short_task() {
        // 100 base + 20 short duration, no deadline
        let task = DynamicTask::new(1, "quick fix")
            .with_priority("high")
            .with_estimate(30);
        let score = scorer().score_dynamic(&task, reference());
        assert_eq!(score, 120.0);
        assert_eq!(confidence(score), 0.4);
    }

    #[test]
    fn test_deadline_today_medium_priority() {
        // 60 base + 150 due today + 10 medium duration
        let task = DynamicTask::new(1, "essay")
            .with_priority("medium")
            .with_estimate(45)
            .with_deadline("2025-03-03");
        assert_eq!(scorer().score_dynamic(&task, reference()), 220.0);
    }

    #[test]
    fn test_deadline_tiers() {
        let base = DynamicTask::new(1, "t").with_priority("low");
        let score_for = |deadline: &str| {
            scorer().score_dynamic(&base.clone().with_deadline(deadline), reference())
        };
        assert_eq!(score_for("2025-03-01"), 30.0 + 150.0); // overdue
        assert_eq!(score_for("2025-03-04"), 30.0 + 100.0); // tomorrow
        assert_eq!(score_for("2025-03-06"), 30.0 + 50.0); // within 3 days
        assert_eq!(score_for("2025-03-10"), 30.0 + 20.0); // within a week
        assert_eq!(score_for("2025-03-20"), 30.0); // far out
    }

    #[test]
    fn test_unparseable_deadline_skipped() {
        let task = DynamicTask::new(1, "t")
            .with_priority("high")
            .with_deadline("next tuesday");
        assert_eq!(scorer().score_dynamic(&task, reference()), 100.0);
    }

    #[test]
    fn test_unrecognized_priority_falls_back_to_low() {
        let task = DynamicTask::new(1, "t").with_priority("critical");
        assert_eq!(scorer().score_dynamic(&task, reference()), 30.0);

        let task = DynamicTask::new(2, "no label");
        assert_eq!(scorer().score_dynamic(&task, reference()), 30.0);
    }

    #[test]
    fn test_mid_length_task_gets_no_duration_term() {
        // 61-180 minutes sits between the short bonus and the long penalty.
        let task = DynamicTask::new(1, "essay").with_priority("high").with_estimate(90);
        assert_eq!(scorer().score_dynamic(&task, reference()), 100.0);

        let task = DynamicTask::new(2, "review").with_priority("high").with_estimate(180);
        assert_eq!(scorer().score_dynamic(&task, reference()), 100.0);
    }

    #[test]
    fn test_long_task_penalty() {
        let task = DynamicTask::new(1, "thesis").with_priority("low").with_estimate(240);
        assert_eq!(scorer().score_dynamic(&task, reference()), 20.0);
    }

    #[test]
    fn test_important_tag_counted_once() {
        let task = DynamicTask::new(1, "t")
            .with_priority("low")
            .with_tag("Exam")
            .with_tag("urgent");
        assert_eq!(scorer().score_dynamic(&task, reference()), 45.0);
    }

    #[test]
    fn test_regular_base_score() {
        let task = RegularTask::new(1, "class")
            .with_times("2025-03-03T10:00:00", "2025-03-03T11:00:00");
        assert_eq!(scorer().score_regular(&task, reference()), 80.0);
    }

    #[test]
    fn test_confidence_caps_at_one() {
        assert_eq!(confidence(300.0), 1.0);
        assert_eq!(confidence(450.0), 1.0);
        assert_eq!(confidence(150.0), 0.5);
    }
}

//! Unified task model shared by every engine component.
//!
//! Two kinds of commitments flow through the engine: regular tasks are
//! fixed-time commitments (classes, meetings), possibly recurring, and
//! dynamic tasks are flexible workload items with an estimated duration
//! that get placed into whatever time remains. Both are read-only for the
//! duration of one engine call; the engine never mutates or persists them.
//!
//! Timestamp fields are kept as the ISO-8601-like strings the caller
//! supplied. Individual fields may be missing or unparseable without
//! invalidating the whole record -- each algorithm skips what it cannot
//! read and logs a warning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags that mark a task as externally important for scoring.
pub const IMPORTANT_TAGS: [&str; 4] = ["assignment", "exam", "meeting", "urgent"];

/// Opaque task identifier. Callers use integers or strings; both are
/// accepted on the wire and preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Kind of commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Fixed-time commitment with its own start/end times.
    Regular,
    /// Flexible item placed opportunistically into free slots.
    Dynamic,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Dynamic => "dynamic",
        }
    }
}

/// User-assigned priority label for dynamic tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Parse a caller-supplied label, case-insensitively. Unrecognized
    /// labels yield `None`; scoring falls back to [`TaskPriority::Low`].
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("high") {
            Some(Self::High)
        } else if raw.eq_ignore_ascii_case("medium") {
            Some(Self::Medium)
        } else if raw.eq_ignore_ascii_case("low") {
            Some(Self::Low)
        } else {
            None
        }
    }

    /// Base score contribution for a dynamic task carrying this label.
    pub fn base_score(self) -> f64 {
        match self {
            Self::High => 100.0,
            Self::Medium => 60.0,
            Self::Low => 30.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Recurrence rule for regular tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatRule {
    Once,
    Daily,
    Weekly,
}

impl RepeatRule {
    /// Parse a caller-supplied rule. Unrecognized rules yield `None`,
    /// which the occurrence resolver treats as "never occurs".
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("once") {
            Some(Self::Once)
        } else if raw.eq_ignore_ascii_case("daily") {
            Some(Self::Daily)
        } else if raw.eq_ignore_ascii_case("weekly") {
            Some(Self::Weekly)
        } else {
            None
        }
    }
}

/// A fixed-time commitment, possibly recurring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub repeat_rule: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl RegularTask {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time: None,
            end_time: None,
            location: None,
            repeat_rule: None,
            completed: false,
            tags: Vec::new(),
            deadline: None,
            created_at: None,
            completed_at: None,
        }
    }

    /// Set start and end times.
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    /// Set the recurrence rule ("once", "daily", "weekly").
    pub fn with_repeat(mut self, rule: impl Into<String>) -> Self {
        self.repeat_rule = Some(rule.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Parsed recurrence rule, if recognized.
    pub fn repeat(&self) -> Option<RepeatRule> {
        self.repeat_rule.as_deref().and_then(RepeatRule::parse)
    }
}

/// A flexible workload item with an estimated duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub estimated_minutes: Option<i64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl DynamicTask {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: None,
            estimated_minutes: None,
            deadline: None,
            completed: false,
            tags: Vec::new(),
            created_at: None,
            completed_at: None,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_estimate(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Parsed priority label, if recognized.
    pub fn priority_label(&self) -> Option<TaskPriority> {
        self.priority.as_deref().and_then(TaskPriority::parse)
    }
}

/// Unified view over both task kinds, discriminated by a `kind` field on
/// the wire. Exposes only the fields shared by every algorithm; kind-
/// specific fields live on the variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Task {
    Regular(RegularTask),
    Dynamic(DynamicTask),
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::Regular(_) => TaskKind::Regular,
            Self::Dynamic(_) => TaskKind::Dynamic,
        }
    }

    pub fn id(&self) -> &TaskId {
        match self {
            Self::Regular(t) => &t.id,
            Self::Dynamic(t) => &t.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Regular(t) => &t.title,
            Self::Dynamic(t) => &t.title,
        }
    }

    pub fn completed(&self) -> bool {
        match self {
            Self::Regular(t) => t.completed,
            Self::Dynamic(t) => t.completed,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Regular(t) => &t.tags,
            Self::Dynamic(t) => &t.tags,
        }
    }

    pub fn deadline(&self) -> Option<&str> {
        match self {
            Self::Regular(t) => t.deadline.as_deref(),
            Self::Dynamic(t) => t.deadline.as_deref(),
        }
    }

    pub fn created_at(&self) -> Option<&str> {
        match self {
            Self::Regular(t) => t.created_at.as_deref(),
            Self::Dynamic(t) => t.created_at.as_deref(),
        }
    }

    pub fn completed_at(&self) -> Option<&str> {
        match self {
            Self::Regular(t) => t.completed_at.as_deref(),
            Self::Dynamic(t) => t.completed_at.as_deref(),
        }
    }

    /// True if any tag matches the important-tag vocabulary,
    /// case-insensitively.
    pub fn has_important_tag(&self) -> bool {
        self.tags()
            .iter()
            .any(|tag| IMPORTANT_TAGS.iter().any(|known| tag.eq_ignore_ascii_case(known)))
    }
}

impl From<RegularTask> for Task {
    fn from(task: RegularTask) -> Self {
        Self::Regular(task)
    }
}

impl From<DynamicTask> for Task {
    fn from(task: DynamicTask) -> Self {
        Self::Dynamic(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_accepts_int_and_string() {
        let int_id: TaskId = serde_json::from_str("42").unwrap();
        assert_eq!(int_id, TaskId::Int(42));

        let text_id: TaskId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(text_id, TaskId::Text("abc-1".to_string()));

        assert_eq!(int_id.to_string(), "42");
        assert_eq!(text_id.to_string(), "abc-1");
    }

    #[test]
    fn test_priority_parse_case_insensitive() {
        assert_eq!(TaskPriority::parse("HIGH"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse("Medium"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::parse("low"), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::parse("critical"), None);
    }

    #[test]
    fn test_repeat_rule_parse() {
        assert_eq!(RepeatRule::parse("once"), Some(RepeatRule::Once));
        assert_eq!(RepeatRule::parse("Daily"), Some(RepeatRule::Daily));
        assert_eq!(RepeatRule::parse("monthly"), None);
    }

    #[test]
    fn test_task_kind_tag_on_wire() {
        let json = r#"{
            "kind": "dynamic",
            "id": 7,
            "title": "Write report",
            "priority": "high",
            "estimated_minutes": 60
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind(), TaskKind::Dynamic);
        assert_eq!(task.title(), "Write report");

        let json = r#"{
            "kind": "regular",
            "id": "cls-1",
            "title": "Math class",
            "start_time": "2025-03-03T10:00:00",
            "end_time": "2025-03-03T11:00:00",
            "repeat_rule": "weekly"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind(), TaskKind::Regular);
    }

    #[test]
    fn test_important_tag_matching() {
        let task: Task = DynamicTask::new(1, "essay").with_tag("Assignment").into();
        assert!(task.has_important_tag());

        let task: Task = DynamicTask::new(2, "walk").with_tag("leisure").into();
        assert!(!task.has_important_tag());
    }
}

//! Shared helpers for commands that read task files.

use std::path::Path;

use chrono::NaiveDate;
use dayplan_core::{DynamicTask, RegularTask, Task};

/// Read a JSON array of task records from disk.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&raw)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(tasks)
}

/// Split a task list into its fixed and flexible halves.
pub fn partition(tasks: Vec<Task>) -> (Vec<RegularTask>, Vec<DynamicTask>) {
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

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date {raw:?}, expected YYYY-MM-DD").into())
}

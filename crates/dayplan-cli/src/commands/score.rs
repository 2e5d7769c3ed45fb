use std::path::PathBuf;

use clap::Args;
use dayplan_core::{confidence, Config, Scheduler};
use serde_json::json;

use super::common::{load_tasks, parse_date};

#[derive(Args)]
pub struct ScoreArgs {
    /// Reference date for deadline proximity (YYYY-MM-DD)
    pub date: String,
    /// JSON file with task records
    #[arg(long)]
    pub tasks: PathBuf,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let scheduler = Scheduler::with_config(config.scheduler_config()?);
    let date = parse_date(&args.date)?;
    let tasks = load_tasks(&args.tasks)?;

    let mut scored: Vec<serde_json::Value> = tasks
        .iter()
        .map(|task| {
            let score = scheduler.score(task, date);
            json!({
                "id": task.id(),
                "title": task.title(),
                "kind": task.kind().as_str(),
                "priority_score": score,
                "confidence": confidence(score),
            })
        })
        .collect();
    scored.sort_by(|a, b| {
        let sa = a["priority_score"].as_f64().unwrap_or(0.0);
        let sb = b["priority_score"].as_f64().unwrap_or(0.0);
        sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
    });

    let envelope = json!({
        "success": true,
        "date": date.format("%Y-%m-%d").to_string(),
        "scores": scored,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

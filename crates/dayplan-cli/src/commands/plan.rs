use std::path::PathBuf;

use clap::Subcommand;
use dayplan_core::{Config, Scheduler};
use serde_json::json;

use super::common::{load_tasks, parse_date, partition};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Build a schedule for one day
    Day {
        /// Target date (YYYY-MM-DD)
        date: String,
        /// JSON file with task records
        #[arg(long)]
        tasks: PathBuf,
    },
    /// Build schedules for seven days starting at a date
    Week {
        /// First day of the week (YYYY-MM-DD)
        date: String,
        /// JSON file with task records
        #[arg(long)]
        tasks: PathBuf,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let scheduler = Scheduler::with_config(config.scheduler_config()?);

    match action {
        PlanAction::Day { date, tasks } => {
            let date = parse_date(&date)?;
            let (regular, dynamic) = partition(load_tasks(&tasks)?);
            let schedule = scheduler.build_daily_schedule(&regular, &dynamic, date);
            let envelope = json!({
                "success": true,
                "date": date.format("%Y-%m-%d").to_string(),
                "total_tasks": schedule.len(),
                "schedule": schedule,
            });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        PlanAction::Week { date, tasks } => {
            let start = parse_date(&date)?;
            let (regular, dynamic) = partition(load_tasks(&tasks)?);
            let weekly = scheduler.build_weekly_schedule(&regular, &dynamic, start);
            let envelope = json!({
                "success": true,
                "weekly_schedule": weekly,
            });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }
    Ok(())
}

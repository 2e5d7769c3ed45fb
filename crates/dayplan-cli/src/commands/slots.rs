use std::path::PathBuf;

use clap::Args;
use dayplan_core::Config;
use dayplan_core::SlotFinder;
use serde_json::json;

use super::common::{load_tasks, parse_date, partition};

#[derive(Args)]
pub struct SlotsArgs {
    /// Target date (YYYY-MM-DD)
    pub date: String,
    /// JSON file with task records
    #[arg(long)]
    pub tasks: PathBuf,
    /// Minimum slot length in minutes
    #[arg(long)]
    pub min_minutes: Option<i64>,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let scheduler_config = config.scheduler_config()?;
    let date = parse_date(&args.date)?;
    let (regular, _) = partition(load_tasks(&args.tasks)?);

    let finder = SlotFinder::new(scheduler_config.timezone)
        .with_work_hours(
            scheduler_config.work_start_hour,
            scheduler_config.work_end_hour,
        )
        .with_min_duration(args.min_minutes.unwrap_or(scheduler_config.min_slot_minutes));
    let slots = finder.find_free_slots(&regular, date);

    let listed: Vec<serde_json::Value> = slots
        .iter()
        .map(|slot| {
            json!({
                "start": slot.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "end": slot.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "duration_minutes": slot.duration_minutes(),
            })
        })
        .collect();
    let envelope = json!({
        "success": true,
        "date": date.format("%Y-%m-%d").to_string(),
        "free_slots": listed,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

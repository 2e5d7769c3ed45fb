use std::path::PathBuf;

use clap::Args;
use dayplan_core::{AdvisoryClient, Config, Scheduler};

use super::common::{load_tasks, parse_date, partition};

#[derive(Args)]
pub struct AdviseArgs {
    /// Target date (YYYY-MM-DD)
    pub date: String,
    /// JSON file with task records
    #[arg(long)]
    pub tasks: PathBuf,
}

pub fn run(args: AdviseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let scheduler = Scheduler::with_config(config.scheduler_config()?);
    let date = parse_date(&args.date)?;
    let tasks = load_tasks(&args.tasks)?;
    let (regular, dynamic) = partition(tasks.clone());
    let schedule = scheduler.build_daily_schedule(&regular, &dynamic, date);

    let client = AdvisoryClient::from_env(config.advisory_config());
    let runtime = tokio::runtime::Runtime::new()?;
    let advisory = runtime.block_on(client.get_advisory(&schedule, &tasks, date));
    println!("{}", serde_json::to_string_pretty(&advisory)?);
    Ok(())
}

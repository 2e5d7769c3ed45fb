use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use dayplan_core::{Config, PatternAnalyzer};

use super::common::load_tasks;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file with task records
    #[arg(long)]
    pub tasks: PathBuf,
    /// Analysis window in days
    #[arg(long, default_value_t = 7)]
    pub days: i64,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tz = config.timezone()?;
    let tasks = load_tasks(&args.tasks)?;

    let now = Utc::now().with_timezone(&tz);
    let report = PatternAnalyzer::new(tz).analyze(&tasks, args.days, now);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

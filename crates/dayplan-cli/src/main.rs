use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dayplan-cli", version, about = "Dayplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule building
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Free time slot discovery
    Slots(commands::slots::SlotsArgs),
    /// Priority scoring
    Score(commands::score::ScoreArgs),
    /// Work pattern analysis
    Analyze(commands::analyze::AnalyzeArgs),
    /// Schedule recommendations
    Advise(commands::advise::AdviseArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Score(args) => commands::score::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Advise(args) => commands::advise::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

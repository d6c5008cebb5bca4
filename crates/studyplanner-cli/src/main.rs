use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyplanner", version, about = "Studyplanner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schedule from a JSON request
    Generate(commands::generate::GenerateArgs),
    /// List the free blocks available for task placement
    Blocks(commands::blocks::BlocksArgs),
    /// Split a duration into attention-span chunks
    Split(commands::split::SplitArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("STUDYPLANNER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Blocks(args) => commands::blocks::run(args),
        Commands::Split(args) => commands::split::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

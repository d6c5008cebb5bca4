//! Schedule generation command.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use studyplanner_core::{Config, ScheduleRequest, ScheduleResponse, Scheduler};

use super::{print_json, resolve_clock};

#[derive(Args)]
pub struct GenerateArgs {
    /// Request JSON file with `commitments`, `tasks` and `preferences` ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,
    /// Freeze the current time ("YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub now: Option<String>,
    /// Pretty-print the output
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,
    /// Print the output on one line
    #[arg(long)]
    pub compact: bool,
    /// Include skipped commitments, unrecognized preferences and dropped work
    #[arg(long)]
    pub report: bool,
}

fn read_request(input: &Path) -> Result<ScheduleRequest, Box<dyn std::error::Error>> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| format!("cannot read {}: {e}", input.display()))?
    };
    Ok(serde_json::from_str(&raw)?)
}

pub fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let request = read_request(&args.input)?;
    tracing::debug!(
        "Loaded request with {} commitments and {} tasks",
        request.commitments.len(),
        request.tasks.len()
    );
    let preferences = match request.preferences {
        Some(prefs) => config.preferences.fill(prefs),
        None => config.preferences.to_preferences(),
    };

    let scheduler = Scheduler::with_clock(resolve_clock(args.now.as_deref())?);
    let plan = scheduler.plan(&request.commitments, &request.tasks, &preferences)?;

    let pretty = args.pretty || (config.output.pretty && !args.compact);
    if args.report {
        print_json(&plan, pretty)
    } else {
        print_json(&ScheduleResponse { schedule: plan.schedule }, pretty)
    }
}

//! Available-block listing.

use clap::Args;
use studyplanner_core::schedule::expand_fixed_commitments;
use studyplanner_core::timeline::{
    filter_available_blocks, generate_time_blocks, DEFAULT_HORIZON_DAYS,
};
use studyplanner_core::{Clock, Config, FixedCommitment, PreferredHours};

use super::{print_json, resolve_clock};

#[derive(Args)]
pub struct BlocksArgs {
    /// Freeze the current time ("YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub now: Option<String>,
    /// Number of days to list
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
    pub days: u32,
    /// Preferred windows, overriding the configured ones (e.g. "morning,night")
    #[arg(long, value_delimiter = ',')]
    pub preferred: Option<Vec<String>>,
    /// Commitments JSON file to exclude from the listing
    #[arg(long)]
    pub commitments: Option<std::path::PathBuf>,
    /// Print only the number of available blocks
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: BlocksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let clock = resolve_clock(args.now.as_deref())?;

    let commitments: Vec<FixedCommitment> = match &args.commitments {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };
    let expansion = expand_fixed_commitments(&commitments, args.days, &clock)?;

    let names = args
        .preferred
        .unwrap_or_else(|| config.preferences.preferred_times.clone());
    let preferred = PreferredHours::resolve(names.as_slice());
    for name in &preferred.unrecognized {
        eprintln!("warning: ignoring unknown preferred time '{name}'");
    }

    let blocks = generate_time_blocks(clock.now().date(), args.days);
    let available = filter_available_blocks(&blocks, &preferred, &expansion.occurrences);

    if args.count {
        println!("{}", available.len());
        Ok(())
    } else {
        print_json(&available, config.output.pretty)
    }
}

//! Attention-span splitting preview.

use clap::Args;
use studyplanner_core::{split_task, Config};

#[derive(Args)]
pub struct SplitArgs {
    /// Total duration in minutes
    #[arg(allow_negative_numbers = true)]
    pub total: i64,
    /// Attention span in minutes (defaults to the configured one)
    #[arg(allow_negative_numbers = true)]
    pub span: Option<i64>,
}

pub fn run(args: SplitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let span = match args.span {
        Some(span) => span,
        None => Config::load()?.preferences.attention_span,
    };
    let chunks = split_task(args.total, span)?;
    println!("{}", serde_json::to_string(&chunks)?);
    Ok(())
}

pub mod blocks;
pub mod config;
pub mod generate;
pub mod split;

use chrono::NaiveDateTime;
use studyplanner_core::clock::parse_timestamp;
use studyplanner_core::{Clock, FixedClock, SystemClock};

/// Freeze "now" for a command: the `--now` value if given, else the wall clock.
pub fn resolve_clock(now: Option<&str>) -> Result<FixedClock, Box<dyn std::error::Error>> {
    let instant: NaiveDateTime = match now {
        Some(value) => parse_timestamp(value)?,
        None => SystemClock.now(),
    };
    Ok(FixedClock(instant))
}

/// Print `value` as JSON, pretty when asked.
pub fn print_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

//! Candidate time blocks over the scheduling horizon.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::clock::serde_timestamp;
use crate::error::ParseError;
use crate::schedule::parse_date;

/// First hour of the day that ever holds a block.
pub const DAY_START_HOUR: u32 = 8;
/// Hour (exclusive) at which the last block of the day ends.
pub const DAY_END_HOUR: u32 = 24;
/// Length of every generated block (minutes).
pub const BLOCK_MINUTES: i64 = 30;
/// Number of days covered by a schedule.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;
/// Blocks generated per day: 16 hours, two per hour.
pub const BLOCKS_PER_DAY: usize =
    ((DAY_END_HOUR - DAY_START_HOUR) as usize * 60) / BLOCK_MINUTES as usize;

/// A candidate 30-minute slot for task placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    #[serde(with = "serde_timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "serde_timestamp")]
    pub end: NaiveDateTime,
}

impl TimeBlock {
    /// Create a block of [`BLOCK_MINUTES`] starting at `start`.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + Duration::minutes(BLOCK_MINUTES),
        }
    }

    /// Hour of day the block starts in
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open intersection of `[start, end)` with `[other_start, other_end)`.
    pub fn overlaps(&self, other_start: NaiveDateTime, other_end: NaiveDateTime) -> bool {
        self.start < other_end && other_start < self.end
    }
}

/// Generate every block from 08:00 to 24:00 for `days` days from `start_date`.
///
/// Returns exactly `days * BLOCKS_PER_DAY` blocks in chronological order.
pub fn generate_time_blocks(start_date: NaiveDate, days: u32) -> Vec<TimeBlock> {
    let mut blocks = Vec::with_capacity(days as usize * BLOCKS_PER_DAY);
    for day in start_date.iter_days().take(days as usize) {
        let first = day.and_time(NaiveTime::MIN) + Duration::hours(DAY_START_HOUR as i64);
        blocks.extend((0..BLOCKS_PER_DAY as i64).map(|slot| {
            TimeBlock::starting_at(first + Duration::minutes(slot * BLOCK_MINUTES))
        }));
    }
    blocks
}

/// Like [`generate_time_blocks`] with a textual `YYYY-MM-DD` start date.
pub fn generate_time_blocks_from(
    start_date: &str,
    days: u32,
) -> Result<Vec<TimeBlock>, ParseError> {
    let date = parse_date("startDate", start_date)?;
    Ok(generate_time_blocks(date, days))
}

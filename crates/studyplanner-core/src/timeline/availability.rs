//! Availability filtering of candidate blocks.
//!
//! A block is usable when it starts in one of the user's preferred hours,
//! outside the sleep range, and does not intersect any fixed commitment.

use std::collections::BTreeSet;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::block::TimeBlock;
use crate::schedule::{ExpandedCommitment, Preferences};

/// Hours of the day reserved for sleep. Never schedulable.
pub const SLEEP_HOURS: Range<u32> = 0..8;

/// Named time-of-day window a user can prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Hour range `[start, end)` covered by this window.
    pub fn hours(&self) -> Range<u32> {
        match self {
            TimeOfDay::Morning => 9..12,
            TimeOfDay::Afternoon => 12..17,
            TimeOfDay::Evening => 17..19,
            TimeOfDay::Night => 20..24,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            other => Err(format!("unknown time of day: {other}")),
        }
    }
}

/// Union of the hours named by a preference list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferredHours {
    pub hours: BTreeSet<u32>,
    /// Names that matched no window and contributed no hours
    pub unrecognized: Vec<String>,
}

impl PreferredHours {
    /// Resolve preference names through the fixed window table.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Self {
        let mut resolved = Self::default();
        for name in names {
            let name = name.as_ref();
            match name.parse::<TimeOfDay>() {
                Ok(window) => resolved.hours.extend(window.hours()),
                Err(_) => {
                    tracing::debug!("Ignoring unrecognized preferred time '{}'", name);
                    resolved.unrecognized.push(name.to_string());
                }
            }
        }
        resolved
    }

    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self::resolve(preferences.preferred_times.as_slice())
    }

    /// Whether a block starting in `hour` may hold a task.
    pub fn allows(&self, hour: u32) -> bool {
        self.hours.contains(&hour) && !SLEEP_HOURS.contains(&hour)
    }
}

/// Whether `block` intersects any commitment occurrence.
pub fn conflicts_with_commitment(block: &TimeBlock, commitments: &[ExpandedCommitment]) -> bool {
    commitments
        .iter()
        .any(|c| block.overlaps(c.start, c.end))
}

/// Keep the blocks usable for task placement, in their original order.
pub fn filter_available_blocks(
    blocks: &[TimeBlock],
    preferred: &PreferredHours,
    commitments: &[ExpandedCommitment],
) -> Vec<TimeBlock> {
    let available: Vec<TimeBlock> = blocks
        .iter()
        .filter(|block| preferred.allows(block.start_hour()))
        .filter(|block| !conflicts_with_commitment(block, commitments))
        .copied()
        .collect();
    tracing::debug!(
        "{} of {} blocks available across hours {:?}",
        available.len(),
        blocks.len(),
        preferred.hours
    );
    available
}

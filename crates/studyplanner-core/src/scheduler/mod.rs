//! Greedy schedule generation.
//!
//! This module places tasks into free 30-minute blocks in a single pass:
//! - Expands weekly fixed commitments over the horizon
//! - Orders tasks by urgency-adjusted priority
//! - Splits each task into attention-span chunks
//! - Consumes available blocks in chronological order, optionally leaving a
//!   break block between chunks
//! - Merges commitments and placed chunks into one time-ordered schedule
//!
//! Placement is best-effort: once the available blocks run out, every
//! remaining chunk is dropped and each affected task is reported once in
//! [`SchedulePlan::dropped`]. Chunks are produced lazily, so the work done
//! is bounded by the number of blocks rather than by task estimates.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::error::{Result, ValidationError};
use crate::schedule::{
    expand_fixed_commitments, CommitmentSkip, EntryType, ExpandedCommitment, FixedCommitment,
    Preferences, ScheduleEntry, Task,
};
use crate::task::{sort_by_urgency, Chunks};
use crate::timeline::{
    filter_available_blocks, generate_time_blocks, PreferredHours, TimeBlock, DEFAULT_HORIZON_DAYS,
};

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Days covered by block generation and commitment expansion
    pub horizon_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// The part of a task that found no free block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedTask {
    pub subject: String,
    /// Number of chunks left unplaced
    pub chunks: i64,
    /// Total minutes left unplaced
    pub minutes: i64,
}

/// Full outcome of a scheduling pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePlan {
    /// Ordered ascending by start
    pub schedule: Vec<ScheduleEntry>,
    pub skipped_commitments: Vec<CommitmentSkip>,
    pub unrecognized_preferences: Vec<String>,
    pub dropped: Vec<DroppedTask>,
}

impl SchedulePlan {
    /// Entries of the given type, in schedule order
    pub fn entries_of(&self, entry_type: EntryType) -> impl Iterator<Item = &ScheduleEntry> + '_ {
        self.schedule
            .iter()
            .filter(move |e| e.entry_type == entry_type)
    }
}

/// Greedy scheduler over an injected clock.
pub struct Scheduler<C: Clock = SystemClock> {
    clock: C,
    config: SchedulerConfig,
}

impl Scheduler<SystemClock> {
    /// Create a scheduler reading the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Scheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate the ordered schedule.
    ///
    /// # Errors
    /// Malformed dates/times, inverted commitment ranges, and non-positive
    /// durations or attention spans. Running out of blocks is not an error.
    pub fn generate_schedule(
        &self,
        commitments: &[FixedCommitment],
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Result<Vec<ScheduleEntry>> {
        Ok(self.plan(commitments, tasks, preferences)?.schedule)
    }

    /// Generate the schedule along with everything the pass skipped.
    pub fn plan(
        &self,
        commitments: &[FixedCommitment],
        tasks: &[Task],
        preferences: &Preferences,
    ) -> Result<SchedulePlan> {
        // One reading of the clock for the whole pass
        let now = self.clock.now();
        let frozen = FixedClock(now);
        let days = self.config.horizon_days;

        // 1. Expand fixed commitments
        let expansion = expand_fixed_commitments(commitments, days, &frozen)?;

        // 2. Order tasks and split them up front so bad input fails before placement
        let attention_span = preferences.attention_span();
        if attention_span <= 0 {
            return Err(ValidationError::NonPositiveAttentionSpan {
                minutes: attention_span,
            }
            .into());
        }
        let sorted = sort_by_urgency(tasks, now)?;
        let mut chunked = sorted
            .into_iter()
            .map(|task| task.chunks(attention_span).map(|chunks| (task, chunks)))
            .collect::<Result<Vec<_>, _>>()?;

        // 3. Available blocks over the horizon
        let blocks = generate_time_blocks(now.date(), days);
        let preferred = PreferredHours::from_preferences(preferences);
        let available = filter_available_blocks(&blocks, &preferred, &expansion.occurrences);

        // 4. Commitments first, then placed chunks
        let mut schedule: Vec<ScheduleEntry> = expansion
            .occurrences
            .iter()
            .map(commitment_entry)
            .collect();
        let mut dropped = Vec::new();
        place_chunks(
            &mut chunked,
            &available,
            preferences.prefer_breaks(),
            &mut schedule,
            &mut dropped,
        )?;

        // 5. Chronological order; stable so equal starts keep commitments first
        schedule.sort_by_key(|entry| entry.start);

        if !dropped.is_empty() {
            tracing::warn!(
                "Dropped {} chunks ({} minutes) of {} tasks: {}-day horizon is full",
                dropped.iter().fold(0i64, |acc, d| acc.saturating_add(d.chunks)),
                dropped.iter().fold(0i64, |acc, d| acc.saturating_add(d.minutes)),
                dropped.len(),
                days
            );
        }
        tracing::debug!(
            "Generated schedule with {} entries from {} tasks at {}",
            schedule.len(),
            tasks.len(),
            now
        );

        Ok(SchedulePlan {
            schedule,
            skipped_commitments: expansion.skipped,
            unrecognized_preferences: preferred.unrecognized,
            dropped,
        })
    }
}

fn commitment_entry(occurrence: &ExpandedCommitment) -> ScheduleEntry {
    ScheduleEntry {
        entry_type: EntryType::FixedCommitment,
        subject: occurrence.subject.clone(),
        start: occurrence.start,
        end: occurrence.end,
    }
}

fn task_entry(task: &Task, start: NaiveDateTime, minutes: i64) -> Result<ScheduleEntry> {
    let end = TimeDelta::try_minutes(minutes)
        .and_then(|length| start.checked_add_signed(length))
        .ok_or_else(|| ValidationError::EndOutOfRange {
            subject: task.subject.clone(),
            start,
            minutes,
        })?;
    Ok(ScheduleEntry {
        entry_type: EntryType::Task,
        subject: task.subject.clone(),
        start,
        end,
    })
}

/// Walk the chunks in order, consuming one block each and skipping one more
/// as a break when requested. Entries span the chunk, not the block.
///
/// Whatever a task has left once the blocks run out is recorded as a single
/// [`DroppedTask`] without drawing the remaining chunks.
fn place_chunks(
    chunked: &mut [(&Task, Chunks)],
    available: &[TimeBlock],
    prefer_breaks: bool,
    schedule: &mut Vec<ScheduleEntry>,
    dropped: &mut Vec<DroppedTask>,
) -> Result<()> {
    let mut cursor = 0;
    for (task, chunks) in chunked.iter_mut() {
        while let Some(block) = available.get(cursor) {
            let Some(minutes) = chunks.next() else {
                break;
            };
            schedule.push(task_entry(task, block.start, minutes)?);

            cursor += 1;
            if prefer_breaks && cursor < available.len() {
                cursor += 1;
            }
        }

        if !chunks.is_exhausted() {
            dropped.push(DroppedTask {
                subject: task.subject.clone(),
                chunks: chunks.remaining_chunks(),
                minutes: chunks.remaining_minutes(),
            });
        }
    }
    Ok(())
}

/// Generate a schedule against the system clock.
pub fn generate_schedule(
    commitments: &[FixedCommitment],
    tasks: &[Task],
    preferences: &Preferences,
) -> Result<Vec<ScheduleEntry>> {
    Scheduler::new().generate_schedule(commitments, tasks, preferences)
}

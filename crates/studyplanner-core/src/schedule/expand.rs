//! Weekly commitment expansion.
//!
//! Turns each recurring [`FixedCommitment`] into one dated occurrence per
//! matching weekday inside the horizon. Commitments whose day name is not a
//! weekday are reported as skips rather than errors.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::FixedCommitment;
use crate::clock::{serde_timestamp, Clock};
use crate::error::{CoreError, ValidationError};

/// One concrete occurrence of a fixed commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedCommitment {
    pub subject: String,
    #[serde(with = "serde_timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "serde_timestamp")]
    pub end: NaiveDateTime,
}

/// Why a commitment produced no occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    UnknownWeekday { day: String },
}

/// A commitment dropped during expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentSkip {
    pub subject: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of expanding a commitment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Occurrences in input order, then by date
    pub occurrences: Vec<ExpandedCommitment>,
    pub skipped: Vec<CommitmentSkip>,
}

/// Outcome for a single commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitmentExpansion {
    Expanded(Vec<ExpandedCommitment>),
    Skipped(CommitmentSkip),
}

const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Resolve a full English weekday name, case-insensitively. Abbreviations
/// such as `Mon` are not weekdays here.
pub fn resolve_weekday(day: &str) -> Option<Weekday> {
    let day = day.trim();
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(day))
        .map(|&(_, weekday)| weekday)
}

/// Expand one commitment over `days` days starting at the clock's today.
///
/// # Errors
/// Returns a parse error for malformed `startTime`/`endTime`, or a
/// validation error when the end is not after the start.
pub fn expand_commitment<C: Clock>(
    commitment: &FixedCommitment,
    days: u32,
    clock: &C,
) -> Result<CommitmentExpansion, CoreError> {
    let Some(weekday) = resolve_weekday(&commitment.day) else {
        return Ok(CommitmentExpansion::Skipped(CommitmentSkip {
            subject: commitment.subject.clone(),
            reason: SkipReason::UnknownWeekday {
                day: commitment.day.clone(),
            },
        }));
    };

    let start_time = commitment.start()?;
    let end_time = commitment.end()?;
    let today = clock.now().date();
    if end_time <= start_time {
        return Err(ValidationError::InvalidTimeRange {
            subject: commitment.subject.clone(),
            start: today.and_time(start_time),
            end: today.and_time(end_time),
        }
        .into());
    }

    let occurrences = today
        .iter_days()
        .take(days as usize)
        .filter(|date| date.weekday() == weekday)
        .map(|date| ExpandedCommitment {
            subject: commitment.subject.clone(),
            start: date.and_time(start_time),
            end: date.and_time(end_time),
        })
        .collect();

    Ok(CommitmentExpansion::Expanded(occurrences))
}

/// Expand every commitment over `days` days starting at the clock's today.
pub fn expand_fixed_commitments<C: Clock>(
    commitments: &[FixedCommitment],
    days: u32,
    clock: &C,
) -> Result<Expansion, CoreError> {
    let mut expansion = Expansion::default();
    for commitment in commitments {
        match expand_commitment(commitment, days, clock)? {
            CommitmentExpansion::Expanded(occurrences) => {
                expansion.occurrences.extend(occurrences);
            }
            CommitmentExpansion::Skipped(skip) => {
                tracing::warn!(
                    "Skipping commitment '{}': unknown weekday '{}'",
                    commitment.subject,
                    commitment.day
                );
                expansion.skipped.push(skip);
            }
        }
    }
    tracing::debug!(
        "Expanded {} commitments into {} occurrences ({} skipped)",
        commitments.len(),
        expansion.occurrences.len(),
        expansion.skipped.len()
    );
    Ok(expansion)
}

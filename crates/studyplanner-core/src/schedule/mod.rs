//! Request and response types for schedule generation.
//!
//! Field names follow the JSON contract callers already speak
//! (`startTime`, `preferredTimes`, `attentionSpan`, ...). Dates and times
//! stay as strings here and are parsed by the pipeline stage that needs
//! them, so a malformed value surfaces as a [`ParseError`] naming the field.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::serde_timestamp;
use crate::error::ParseError;

mod expand;

pub use expand::{
    expand_commitment, expand_fixed_commitments, resolve_weekday, CommitmentExpansion,
    CommitmentSkip, ExpandedCommitment, Expansion, SkipReason,
};

// Re-export Task from the task module
pub use crate::task::Task;

/// Attention span used when preferences do not name one (minutes).
pub const DEFAULT_ATTENTION_SPAN: i64 = 60;

/// A recurring weekly obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedCommitment {
    pub subject: String,
    pub day: String,        // Monday ... Sunday
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
}

impl FixedCommitment {
    pub fn new(subject: &str, day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            subject: subject.to_string(),
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    pub fn start(&self) -> Result<NaiveTime, ParseError> {
        parse_time("startTime", &self.start_time)
    }

    pub fn end(&self) -> Result<NaiveTime, ParseError> {
        parse_time("endTime", &self.end_time)
    }
}

/// User scheduling preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Names from {morning, afternoon, evening, night}
    #[serde(default)]
    pub preferred_times: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_span: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_breaks: Option<bool>,
}

impl Preferences {
    pub fn new<I, S>(preferred_times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preferred_times: preferred_times.into_iter().map(Into::into).collect(),
            attention_span: None,
            prefer_breaks: None,
        }
    }

    pub fn with_attention_span(mut self, minutes: i64) -> Self {
        self.attention_span = Some(minutes);
        self
    }

    pub fn with_breaks(mut self, prefer_breaks: bool) -> Self {
        self.prefer_breaks = Some(prefer_breaks);
        self
    }

    /// Attention span in minutes, falling back to [`DEFAULT_ATTENTION_SPAN`].
    pub fn attention_span(&self) -> i64 {
        self.attention_span.unwrap_or(DEFAULT_ATTENTION_SPAN)
    }

    /// Whether to leave a break block between chunks; off unless set.
    pub fn prefer_breaks(&self) -> bool {
        self.prefer_breaks.unwrap_or(false)
    }
}

/// Kind of schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "Fixed Commitment")]
    FixedCommitment,
    #[serde(rename = "Task")]
    Task,
}

/// One row of the generated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub subject: String,
    #[serde(with = "serde_timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "serde_timestamp")]
    pub end: NaiveDateTime,
}

impl ScheduleEntry {
    /// Duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Body accepted by schedule generation. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub commitments: Vec<FixedCommitment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Body returned by schedule generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduleEntry>,
}

/// Parse a `YYYY-MM-DD` calendar date, naming `field` on failure.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ParseError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a 24-hour `HH:MM` time of day, naming `field` on failure.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| ParseError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

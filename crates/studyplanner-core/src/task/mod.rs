//! Tasks to place and their urgency-adjusted ordering.
//!
//! Priority follows "lower number = more urgent". Tasks due within a week
//! get an urgency bonus subtracted from their priority, so the sort key is
//! `priority - bonus` and tasks are placed in ascending key order.

mod split;

pub use split::{split_task, Chunks};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};
use crate::schedule::parse_date;

/// Tasks due further out than this many days get no urgency bonus.
pub const URGENCY_WINDOW_DAYS: i64 = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// A unit of work to place into free blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub subject: String,
    /// Estimated duration in minutes
    pub estimated: i64,
    pub priority: i64,
    pub due: String, // YYYY-MM-DD
}

impl Task {
    pub fn new(subject: &str, estimated: i64, priority: i64, due: &str) -> Self {
        Self {
            subject: subject.to_string(),
            estimated,
            priority,
            due: due.to_string(),
        }
    }

    pub fn due_date(&self) -> Result<NaiveDate, ParseError> {
        parse_date("due", &self.due)
    }

    /// Whole days from `now` until the start of the due date.
    ///
    /// Rounds toward negative infinity: a task due today is already `-1`
    /// once the day has started.
    pub fn days_until_due(&self, now: NaiveDateTime) -> Result<i64, ParseError> {
        let due = self.due_date()?.and_time(NaiveTime::MIN);
        Ok((due - now).num_seconds().div_euclid(SECONDS_PER_DAY))
    }

    pub fn urgency_bonus(&self, now: NaiveDateTime) -> Result<i64, ParseError> {
        let days_left = self.days_until_due(now)?;
        Ok(urgency_bonus_for(days_left))
    }

    /// Placement key; smaller keys are placed first. Saturates at the `i64` bounds.
    pub fn sort_key(&self, now: NaiveDateTime) -> Result<i64, ParseError> {
        Ok(self.priority.saturating_sub(self.urgency_bonus(now)?))
    }

    /// Split the estimated duration into attention-span chunks.
    pub fn chunks(&self, attention_span: i64) -> Result<Chunks, ValidationError> {
        Chunks::new(self.estimated, attention_span).map_err(|e| ValidationError::Task {
            subject: self.subject.clone(),
            source: Box::new(e),
        })
    }
}

/// `0` beyond the urgency window, otherwise `7 - days_left`. Overdue tasks
/// (negative `days_left`) get a bonus above 7.
pub fn urgency_bonus_for(days_left: i64) -> i64 {
    if days_left > URGENCY_WINDOW_DAYS {
        0
    } else {
        URGENCY_WINDOW_DAYS.saturating_sub(days_left)
    }
}

/// Stable ascending sort by urgency-adjusted priority. Ties keep input order.
pub fn sort_by_urgency(tasks: &[Task], now: NaiveDateTime) -> Result<Vec<&Task>, ParseError> {
    let mut keyed = tasks
        .iter()
        .map(|task| task.sort_key(now).map(|key| (key, task)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, task)| task).collect())
}

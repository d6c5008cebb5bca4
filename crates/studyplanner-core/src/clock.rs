//! Injected wall-clock capability.
//!
//! Every scheduling call reads "now" exactly once through a [`Clock`], so
//! commitment expansion, block generation and urgency scoring all observe the
//! same instant. Tests and the CLI `--now` flag freeze it with [`FixedClock`].

use chrono::{Local, NaiveDateTime};

use crate::error::ParseError;

/// Output and `--now` timestamp format. Lexicographic order on this format
/// is chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the process wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Build a fixed clock from a `YYYY-MM-DD HH:MM` string.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        parse_timestamp(value).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Format a timestamp the way schedule entries carry it.
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD HH:MM` timestamp.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

/// `#[serde(with = "...")]` adapter for `YYYY-MM-DD HH:MM` timestamps.
pub mod serde_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

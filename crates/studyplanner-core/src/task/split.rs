//! Attention-span task splitting.

use crate::error::ValidationError;

/// Lazily yields attention-span chunks of a duration.
///
/// Holds only the minutes still to hand out, so a huge estimate costs
/// nothing until its chunks are actually taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks {
    remaining: i64,
    span: i64,
}

impl Chunks {
    /// Validate the inputs and start chunking `total_minutes`.
    pub fn new(total_minutes: i64, attention_span: i64) -> Result<Self, ValidationError> {
        if attention_span <= 0 {
            return Err(ValidationError::NonPositiveAttentionSpan {
                minutes: attention_span,
            });
        }
        if total_minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration {
                minutes: total_minutes,
            });
        }
        Ok(Self {
            remaining: total_minutes,
            span: attention_span,
        })
    }

    /// Minutes not yet yielded.
    pub fn remaining_minutes(&self) -> i64 {
        self.remaining
    }

    /// Chunks not yet yielded.
    pub fn remaining_chunks(&self) -> i64 {
        let whole = self.remaining / self.span;
        if self.remaining % self.span == 0 {
            whole
        } else {
            whole + 1
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl Iterator for Chunks {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let part = self.span.min(self.remaining);
        self.remaining -= part;
        Some(part)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining_chunks()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Break `total_minutes` into chunks of at most `attention_span` minutes.
///
/// Chunks are taken greedily from the front, so every chunk except the last
/// equals `attention_span`. Non-positive inputs are rejected.
pub fn split_task(total_minutes: i64, attention_span: i64) -> Result<Vec<i64>, ValidationError> {
    Ok(Chunks::new(total_minutes, attention_span)?.collect())
}

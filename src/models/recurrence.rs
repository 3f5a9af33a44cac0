//! Recurring availability specification.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::slot::UserId;
use crate::services::EngineError;

/// Highest number of occurrences a recurring series may expand to.
pub const MAX_OCCURRENCES: u32 = 100;

fn default_occurrences() -> u32 {
    30
}

/// A recurring availability series: the same `[start, end)` window repeated
/// every `interval` starting at `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSlot {
    pub start_date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub user_id: UserId,
    /// Named recurrence unit, e.g. "weekly". Parsed case-insensitively.
    pub interval: String,
    /// Number of windows to generate, capped at [`MAX_OCCURRENCES`].
    #[serde(default = "default_occurrences")]
    pub occurrences: u32,
}

impl RecurringSlot {
    /// Validate the parts of the spec the generator does not re-check:
    /// the time range and the occurrence cap.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.start >= self.end {
            return Err(EngineError::Validation(format!(
                "recurring slot start {} must be before end {}",
                self.start, self.end
            )));
        }
        if self.occurrences == 0 || self.occurrences > MAX_OCCURRENCES {
            return Err(EngineError::Validation(format!(
                "occurrences must be between 1 and {}, got {}",
                MAX_OCCURRENCES, self.occurrences
            )));
        }
        Ok(())
    }
}

/// A named recurrence interval, mapped to a day count.
///
/// Only weekly recurrence exists today; the name -> days lookup leaves room
/// for units like "daily" or "biweekly" without touching the expansion
/// algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Weekly,
}

impl IntervalUnit {
    /// Length of one interval in days.
    pub fn days(&self) -> u64 {
        match self {
            Self::Weekly => 7,
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            other => Err(EngineError::InvalidInterval(other.to_string())),
        }
    }
}

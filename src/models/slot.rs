//! Availability slot types.
//!
//! A [`TimeSlot`] is a half-open time range `[start, end)` on a single
//! calendar date, owned by one user. All dates and times are UTC; callers
//! are expected to convert from other timezones before reaching this layer.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::EngineError;

/// Identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted availability slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(i64);

impl SlotId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One availability window: a date, a `[start, end)` time range and a user.
///
/// Two slots are equal iff all four fields match. The `start < end`
/// invariant is enforced at construction; zero-length and inverted ranges
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub user_id: UserId,
}

impl TimeSlot {
    /// Create a slot, enforcing `start < end`.
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        user_id: UserId,
    ) -> Result<Self, EngineError> {
        if start >= end {
            return Err(EngineError::Validation(format!(
                "slot start {} must be before end {}",
                start, end
            )));
        }

        Ok(Self {
            date,
            start,
            end,
            user_id,
        })
    }

    /// Check the `start < end` invariant on an already-built slot.
    ///
    /// Used by the HTTP layer after deserializing request bodies, which
    /// bypass [`TimeSlot::new`].
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.start >= self.end {
            return Err(EngineError::Validation(format!(
                "slot start {} must be before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}) user={}",
            self.date, self.start, self.end, self.user_id
        )
    }
}

/// A slot as persisted in the store, with its row identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSlot {
    pub id: SlotId,
    #[serde(flatten)]
    pub slot: TimeSlot,
}

/// One overlapping window between two users' availability on a date.
///
/// Produced by the store's overlap query; the time range is the
/// intersection of the two users' slots, boundary-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub date: NaiveDate,
    pub first_user: UserId,
    pub second_user: UserId,
    pub overlap_start: NaiveTime,
    pub overlap_end: NaiveTime,
}

//! Expansion of recurring availability into concrete slots.

use chrono::Days;

use crate::models::{IntervalUnit, RecurringSlot, TimeSlot};

use super::EngineError;

/// Expand a recurring series into its concrete slots, one every interval
/// starting at `spec.start_date`.
///
/// Every generated slot shares the spec's `[start, end)` range and user.
/// An unknown interval name fails the whole expansion before any slot is
/// built. Zero occurrences yield an empty sequence; the 1..=100 cap is the
/// validation layer's job (see [`RecurringSlot::validate`]).
pub fn expand(spec: &RecurringSlot) -> Result<Vec<TimeSlot>, EngineError> {
    let unit: IntervalUnit = spec.interval.parse()?;
    let step_days = unit.days();

    let mut slots = Vec::with_capacity(spec.occurrences as usize);
    for i in 0..u64::from(spec.occurrences) {
        let date = spec
            .start_date
            .checked_add_days(Days::new(i * step_days))
            .ok_or_else(|| {
                EngineError::Validation(format!(
                    "recurrence overflows the calendar at occurrence {}",
                    i
                ))
            })?;

        slots.push(TimeSlot::new(date, spec.start, spec.end, spec.user_id)?);
    }

    Ok(slots)
}

//! Interval arithmetic for availability deletion.
//!
//! Deleting availability is expressed as interval subtraction: given an
//! existing slot and a "cut" range, compute the zero, one or two slots that
//! remain once the cut's overlap is removed. The function here is pure and
//! total over well-formed slots; the orchestrator in
//! [`crate::services::availability`] applies it to every stored slot for the
//! target (user, date) pair.
//!
//! Boundary policy: slots are half-open `[start, end)` ranges, so a cut that
//! merely touches a boundary (`cut.end == existing.start` or
//! `cut.start == existing.end`) shares no time with the existing slot and
//! removes nothing. Overlap requires
//! `cut.start < existing.end && cut.end > existing.start`.

use crate::models::TimeSlot;

/// Remove the overlap between `cut` and `existing`, returning the remaining
/// slots in chronological order.
///
/// Outputs always carry `existing`'s date and user; `cut`'s own date and
/// user are the caller's responsibility to match before calling. Zero-length
/// fragments are never emitted, so an exact-match cut yields an empty
/// result.
pub fn subtract_slot(existing: &TimeSlot, cut: &TimeSlot) -> Vec<TimeSlot> {
    // Four cases, first match wins:
    //   1. no overlap               -> existing survives unchanged
    //   2. cut contains existing's range within [existing.start, existing.end]
    //      (includes exact match)   -> keep the pieces on either side
    //   3. cut starts inside, ends beyond -> keep the leading piece
    //   4. cut starts before, ends inside -> keep the trailing piece

    if cut.end <= existing.start || cut.start >= existing.end {
        return vec![*existing];
    }

    let mut remaining = Vec::with_capacity(2);

    if cut.start >= existing.start && cut.end <= existing.end {
        push_fragment(&mut remaining, existing, existing.start, cut.start);
        push_fragment(&mut remaining, existing, cut.end, existing.end);
    } else if cut.start >= existing.start {
        // cut.end > existing.end here; the part past the slot's end is
        // irrelevant to this slot.
        push_fragment(&mut remaining, existing, existing.start, cut.start);
    } else {
        // cut.start < existing.start && cut.end < existing.end
        push_fragment(&mut remaining, existing, cut.end, existing.end);
    }

    remaining
}

fn push_fragment(
    out: &mut Vec<TimeSlot>,
    existing: &TimeSlot,
    start: chrono::NaiveTime,
    end: chrono::NaiveTime,
) {
    if start < end {
        out.push(TimeSlot {
            date: existing.date,
            start,
            end,
            user_id: existing.user_id,
        });
    }
}

//! Availability orchestration: insertion, recurring insertion, deletion
//! and overlap lookup.
//!
//! Deletion is the interesting path. The cut window is resolved against
//! every stored slot for its (user, date) pair with
//! [`subtract_slot`](super::interval::subtract_slot), and the store then
//! swaps the old slots for the computed replacements in a single
//! transaction. Readers never observe a partially applied replacement.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::db::repository::FullRepository;
use crate::models::{Overlap, Page, PageRequest, RecurringSlot, StoredSlot, TimeSlot, UserId};

use super::{interval, recurrence, ServiceError};

/// Persist a batch of new availability slots.
///
/// Each slot is validated (`start < end`) before anything is written. A
/// duplicate of an already stored `(date, start, end, user)` row surfaces
/// as [`RepositoryError::Conflict`](crate::db::repository::RepositoryError),
/// with no partial rows committed.
pub async fn add_availability(
    repo: &dyn FullRepository,
    slots: &[TimeSlot],
) -> Result<Vec<StoredSlot>, ServiceError> {
    if slots.is_empty() {
        return Err(super::EngineError::Validation(
            "availability list must not be empty".to_string(),
        )
        .into());
    }
    for slot in slots {
        slot.validate()?;
    }

    let stored = repo.insert_slots(slots).await?;
    info!(count = stored.len(), "stored availability slots");
    Ok(stored)
}

/// Fetch all slots for a user on one date.
pub async fn list_availability(
    repo: &dyn FullRepository,
    user_id: UserId,
    date: NaiveDate,
) -> Result<Vec<StoredSlot>, ServiceError> {
    Ok(repo.find_slots(user_id, date).await?)
}

/// Expand a recurring series and persist every generated slot atomically.
///
/// An unknown interval name or an occurrence count outside 1..=100 fails
/// the request before any slot is generated; a uniqueness conflict rolls
/// the whole series back.
pub async fn add_recurring(
    repo: &dyn FullRepository,
    spec: &RecurringSlot,
) -> Result<Vec<StoredSlot>, ServiceError> {
    spec.validate()?;
    let slots = recurrence::expand(spec)?;

    let stored = repo.insert_slots(&slots).await?;
    info!(
        user = %spec.user_id,
        occurrences = stored.len(),
        interval = %spec.interval,
        "stored recurring availability"
    );
    Ok(stored)
}

/// Delete the `cut` range from a user's availability on its date.
///
/// Every stored slot for `(cut.user_id, cut.date)` is resolved against the
/// cut independently; the store then deletes all fetched slots and inserts
/// the union of the replacements as one transaction. Returns the
/// replacement set, which is empty when the cut consumed everything.
pub async fn delete_availability(
    repo: &dyn FullRepository,
    cut: &TimeSlot,
) -> Result<Vec<StoredSlot>, ServiceError> {
    cut.validate()?;

    let existing = repo.find_slots(cut.user_id, cut.date).await?;
    debug!(
        user = %cut.user_id,
        date = %cut.date,
        existing = existing.len(),
        "resolving availability deletion"
    );

    let replacements: Vec<TimeSlot> = existing
        .iter()
        .flat_map(|stored| interval::subtract_slot(&stored.slot, cut))
        .collect();
    let old_ids: Vec<_> = existing.iter().map(|stored| stored.id).collect();

    let stored = repo.replace_slots(&old_ids, &replacements).await?;
    info!(
        user = %cut.user_id,
        date = %cut.date,
        removed = old_ids.len(),
        remaining = stored.len(),
        "deleted availability"
    );
    Ok(stored)
}

/// Find overlapping availability between two users on a date.
///
/// The overlap predicate is the store's:
/// `max(start1, start2) <= min(end1, end2)` with differing users on the
/// same date. Boundary touch counts as overlap and pairs are not
/// directionally deduplicated.
pub async fn find_overlap(
    repo: &dyn FullRepository,
    first: UserId,
    second: UserId,
    date: NaiveDate,
    page: PageRequest,
) -> Result<Page<Overlap>, ServiceError> {
    Ok(repo.find_overlap(first, second, date, page).await?)
}

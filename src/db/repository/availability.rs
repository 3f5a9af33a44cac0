//! Availability repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{Overlap, Page, PageRequest, SlotId, StoredSlot, TimeSlot, UserId};

/// Storage operations for availability slots.
///
/// Implementations must be `Send + Sync`. The store enforces a uniqueness
/// constraint on `(date, start, end, user_id)`; violating it fails the whole
/// batch with [`RepositoryError::Conflict`](super::RepositoryError) and
/// leaves no partial rows.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Insert a batch of slots as one atomic unit.
    ///
    /// Returns the stored rows with their assigned ids.
    async fn insert_slots(&self, slots: &[TimeSlot]) -> RepositoryResult<Vec<StoredSlot>>;

    /// Fetch every stored slot for the exact (user, date) pair.
    ///
    /// Result order is store-defined; callers must not rely on it.
    async fn find_slots(&self, user_id: UserId, date: NaiveDate)
        -> RepositoryResult<Vec<StoredSlot>>;

    /// Atomically delete the given slots by id and insert the replacements.
    ///
    /// The delete and insert happen in one transaction; a failure of either
    /// rolls back both. Returns the inserted rows.
    async fn replace_slots(
        &self,
        delete: &[SlotId],
        insert: &[TimeSlot],
    ) -> RepositoryResult<Vec<StoredSlot>>;

    /// Find overlapping availability between two users on a date.
    ///
    /// Two slots overlap when `max(start1, start2) <= min(end1, end2)` on
    /// the same date with differing users: boundary touch counts. Pairs are
    /// not directionally deduplicated.
    async fn find_overlap(
        &self,
        first: UserId,
        second: UserId,
        date: NaiveDate,
        page: PageRequest,
    ) -> RepositoryResult<Page<Overlap>>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

//! In-memory repository for unit testing and local development.
//!
//! Mirrors the Postgres backend's semantics: the same uniqueness
//! constraints, the same overlap predicate, and atomic batch mutations.
//! Atomicity comes from performing each mutation under a single write
//! lock, with all constraint checks done before anything is modified.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::db::repository::{
    AvailabilityRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::{Overlap, Page, PageRequest, SlotId, StoredSlot, TimeSlot, User, UserId};

#[derive(Debug, Default)]
struct Tables {
    slots: Vec<StoredSlot>,
    users: Vec<User>,
    next_slot_id: i64,
    next_user_id: i32,
}

/// In-memory implementation of the repository traits.
#[derive(Debug, Default)]
pub struct LocalRepository {
    tables: RwLock<Tables>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn contains_slot(&self, slot: &TimeSlot) -> bool {
        self.slots.iter().any(|stored| stored.slot == *slot)
    }

    fn assign_slot_id(&mut self) -> SlotId {
        self.next_slot_id += 1;
        SlotId::new(self.next_slot_id)
    }

    fn insert_all(&mut self, slots: &[TimeSlot]) -> RepositoryResult<Vec<StoredSlot>> {
        // Check the uniqueness constraint for the whole batch (including
        // duplicates within the batch itself) before touching the table.
        for (i, slot) in slots.iter().enumerate() {
            if self.contains_slot(slot) || slots[..i].contains(slot) {
                return Err(RepositoryError::conflict(format!(
                    "duplicate availability slot: {}",
                    slot
                )));
            }
        }

        let mut stored = Vec::with_capacity(slots.len());
        for slot in slots {
            let row = StoredSlot {
                id: self.assign_slot_id(),
                slot: *slot,
            };
            self.slots.push(row);
            stored.push(row);
        }
        Ok(stored)
    }
}

#[async_trait]
impl AvailabilityRepository for LocalRepository {
    async fn insert_slots(&self, slots: &[TimeSlot]) -> RepositoryResult<Vec<StoredSlot>> {
        self.tables.write().insert_all(slots)
    }

    async fn find_slots(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<StoredSlot>> {
        let tables = self.tables.read();
        Ok(tables
            .slots
            .iter()
            .filter(|stored| stored.slot.user_id == user_id && stored.slot.date == date)
            .copied()
            .collect())
    }

    async fn replace_slots(
        &self,
        delete: &[SlotId],
        insert: &[TimeSlot],
    ) -> RepositoryResult<Vec<StoredSlot>> {
        let mut tables = self.tables.write();

        let removed: Vec<StoredSlot> = tables
            .slots
            .iter()
            .filter(|stored| delete.contains(&stored.id))
            .copied()
            .collect();
        tables.slots.retain(|stored| !delete.contains(&stored.id));

        match tables.insert_all(insert) {
            Ok(stored) => Ok(stored),
            Err(e) => {
                // Roll the deletion back so the failed replace is invisible.
                tables.slots.extend(removed);
                Err(e)
            }
        }
    }

    async fn find_overlap(
        &self,
        first: UserId,
        second: UserId,
        date: NaiveDate,
        page: PageRequest,
    ) -> RepositoryResult<Page<Overlap>> {
        let tables = self.tables.read();

        let of_user = |user: UserId| {
            tables
                .slots
                .iter()
                .filter(move |stored| stored.slot.user_id == user && stored.slot.date == date)
        };

        let mut overlaps = Vec::new();
        if first != second {
            for a in of_user(first) {
                for b in of_user(second) {
                    let start = a.slot.start.max(b.slot.start);
                    let end = a.slot.end.min(b.slot.end);
                    // Boundary-inclusive: a shared instant counts as overlap.
                    if start <= end {
                        overlaps.push(Overlap {
                            date,
                            first_user: first,
                            second_user: second,
                            overlap_start: start,
                            overlap_end: end,
                        });
                    }
                }
            }
        }
        overlaps.sort_by_key(|o| (o.overlap_start, o.overlap_end));
        overlaps.dedup();

        Ok(Page::from_vec(overlaps, page))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn insert_users(&self, users: &[User]) -> RepositoryResult<Vec<User>> {
        let mut tables = self.tables.write();

        for (i, user) in users.iter().enumerate() {
            let dup_stored = tables.users.iter().any(|u| u.email == user.email);
            let dup_batch = users[..i].iter().any(|u| u.email == user.email);
            if dup_stored || dup_batch {
                return Err(RepositoryError::conflict(format!(
                    "duplicate user email: {}",
                    user.email
                )));
            }
        }

        let mut stored = Vec::with_capacity(users.len());
        for user in users {
            tables.next_user_id += 1;
            let row = User {
                id: Some(UserId::new(tables.next_user_id)),
                ..user.clone()
            };
            tables.users.push(row.clone());
            stored.push(row);
        }
        Ok(stored)
    }

    async fn list_users(&self, page: PageRequest) -> RepositoryResult<Page<User>> {
        let tables = self.tables.read();
        Ok(Page::from_vec(tables.users.clone(), page))
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read();
        Ok(tables.users.iter().find(|u| u.id == Some(id)).cloned())
    }
}

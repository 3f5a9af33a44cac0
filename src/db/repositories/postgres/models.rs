use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use diesel::sql_types::{Date, Int4, Time};

use super::schema::{user_availability, users};
use crate::models::{Overlap, SlotId, StoredSlot, TimeSlot, User, UserId};

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = user_availability)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SlotRow {
    pub id: i64,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub user_id: i32,
}

impl From<SlotRow> for StoredSlot {
    fn from(row: SlotRow) -> Self {
        StoredSlot {
            id: SlotId::new(row.id),
            slot: TimeSlot {
                date: row.slot_date,
                start: row.start_time,
                end: row.end_time,
                user_id: UserId::new(row.user_id),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = user_availability)]
pub struct NewSlotRow {
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub user_id: i32,
}

impl From<&TimeSlot> for NewSlotRow {
    fn from(slot: &TimeSlot) -> Self {
        NewSlotRow {
            slot_date: slot.date,
            start_time: slot.start,
            end_time: slot.end,
            user_id: slot.user_id.value(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: Some(UserId::new(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for NewUserRow {
    fn from(user: &User) -> Self {
        NewUserRow {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Row shape of the raw overlap join.
#[derive(Debug, QueryableByName)]
pub struct OverlapRow {
    #[diesel(sql_type = Date)]
    pub slot_date: NaiveDate,
    #[diesel(sql_type = Int4)]
    pub first_user: i32,
    #[diesel(sql_type = Int4)]
    pub second_user: i32,
    #[diesel(sql_type = Time)]
    pub overlap_start: NaiveTime,
    #[diesel(sql_type = Time)]
    pub overlap_end: NaiveTime,
}

impl From<OverlapRow> for Overlap {
    fn from(row: OverlapRow) -> Self {
        Overlap {
            date: row.slot_date,
            first_user: UserId::new(row.first_user),
            second_user: UserId::new(row.second_user),
            overlap_start: row.overlap_start,
            overlap_end: row.overlap_end,
        }
    }
}

/// Row shape of `SELECT count(*)`.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
}

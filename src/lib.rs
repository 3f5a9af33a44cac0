//! # slotwise
//!
//! Backend for tracking per-user time availability on calendar dates and
//! computing overlaps between two users' schedules. All dates and times
//! are UTC; callers convert from other timezones before reaching the API.
//!
//! ## Architecture
//!
//! - [`models`]: domain types (slots, recurrence specs, users, pagination)
//! - [`services`]: interval arithmetic, recurrence expansion, and the
//!   orchestration that ties them to the store
//! - [`db`]: repository traits plus Postgres and in-memory backends
//! - [`http`]: axum-based REST API over the service layer
//!
//! The core of the crate is interval subtraction: deleting an availability
//! range resolves the cut against every stored slot for that (user, date)
//! pair and atomically replaces the old slots with the remaining fragments.
//! See [`services::interval`].

pub mod constants;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

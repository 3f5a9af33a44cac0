//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository. The interval
//! arithmetic and recurrence expansion are pure functions; the availability
//! service orchestrates them with store calls.

pub mod availability;
pub mod interval;
pub mod recurrence;
pub mod users;



pub use availability::{
    add_availability, add_recurring, delete_availability, find_overlap, list_availability,
};
pub use interval::subtract_slot;
pub use recurrence::expand;
pub use users::{add_users, get_user_by_email, get_user_by_id, list_users};

use thiserror::Error;

use crate::db::repository::RepositoryError;

/// Errors produced by the pure computation layer and request validation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed input: inverted time range, empty request body,
    /// out-of-range occurrence count.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unrecognized recurrence unit name. Fails the whole recurring-add
    /// request before any window is generated.
    #[error("unknown recurrence interval: {0}")]
    InvalidInterval(String),
}

/// Error type for service-layer operations: either a computation/validation
/// failure or a store failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

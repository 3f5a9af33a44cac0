//! Repository trait definitions.
//!
//! The traits here are the narrow storage interface the service layer
//! consumes: fetch-by-key, transactional batch delete+insert, and the
//! overlap query. Implementations live in
//! [`repositories`](crate::db::repositories).

mod availability;
mod error;
mod users;

pub use availability::AvailabilityRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use users::UserRepository;

/// Combined repository surface used by the application.
pub trait FullRepository: AvailabilityRepository + UserRepository + std::fmt::Debug {}

impl<T: AvailabilityRepository + UserRepository + std::fmt::Debug> FullRepository for T {}

//! User repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Page, PageRequest, User, UserId};

/// Storage operations for user accounts. Emails are unique; duplicates
/// fail the batch with a conflict.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a batch of users as one atomic unit, returning them with ids.
    async fn insert_users(&self, users: &[User]) -> RepositoryResult<Vec<User>>;

    /// List users, paginated.
    async fn list_users(&self, page: PageRequest) -> RepositoryResult<Page<User>>;

    /// Find a user by exact email.
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Find a user by id.
    async fn find_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
}

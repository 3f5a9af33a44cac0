//! User account services.

use tracing::info;

use crate::db::repository::FullRepository;
use crate::models::{Page, PageRequest, User, UserId};

use super::{EngineError, ServiceError};

/// Register a batch of users. Emails must be unique; a duplicate surfaces
/// as a conflict with nothing committed.
pub async fn add_users(
    repo: &dyn FullRepository,
    users: &[User],
) -> Result<Vec<User>, ServiceError> {
    if users.is_empty() {
        return Err(EngineError::Validation("user list must not be empty".to_string()).into());
    }
    for user in users {
        if user.email.trim().is_empty() {
            return Err(EngineError::Validation("user email must not be blank".to_string()).into());
        }
    }

    let stored = repo.insert_users(users).await?;
    info!(count = stored.len(), "registered users");
    Ok(stored)
}

/// List users, paginated.
pub async fn list_users(
    repo: &dyn FullRepository,
    page: PageRequest,
) -> Result<Page<User>, ServiceError> {
    Ok(repo.list_users(page).await?)
}

/// Look up a user by email.
pub async fn get_user_by_email(
    repo: &dyn FullRepository,
    email: &str,
) -> Result<Option<User>, ServiceError> {
    Ok(repo.find_user_by_email(email).await?)
}

/// Look up a user by id.
pub async fn get_user_by_id(
    repo: &dyn FullRepository,
    id: UserId,
) -> Result<Option<User>, ServiceError> {
    Ok(repo.find_user_by_id(id).await?)
}

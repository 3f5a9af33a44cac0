//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AvailabilityQuery, Envelope, HealthResponse, OverlapQuery, UserByEmailQuery, UsersQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::constants;
use crate::models::{Overlap, Page, RecurringSlot, StoredSlot, TimeSlot, User, UserId};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Availability
// =============================================================================

/// POST /v1/availability
///
/// Bulk-insert availability slots. A duplicate slot fails the whole batch
/// with the "already exists" envelope.
pub async fn add_availability(
    State(state): State<AppState>,
    Json(slots): Json<Vec<TimeSlot>>,
) -> HandlerResult<Envelope> {
    services::add_availability(state.repository.as_ref(), &slots)
        .await
        .map_err(|e| AppError::from(e).with_conflict_message(constants::ADD_AVAILABILITY_CONFLICT_MSG))?;

    Ok(Json(Envelope::success(
        constants::ADD_AVAILABILITY_SUCCESS_MSG,
    )))
}

/// GET /v1/availability?user_id&date&page&size
///
/// Show availability for a user on a date.
pub async fn list_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<Page<StoredSlot>> {
    let slots = services::list_availability(
        state.repository.as_ref(),
        UserId::new(query.user_id),
        query.date,
    )
    .await?;

    Ok(Json(Page::from_vec(slots, query.page_request())))
}

/// DELETE /v1/availability
///
/// Delete the given range from the user's availability on its date. The
/// range may partially overlap one or more stored slots; the store ends up
/// with the remaining fragments only.
pub async fn delete_availability(
    State(state): State<AppState>,
    Json(cut): Json<TimeSlot>,
) -> HandlerResult<Envelope> {
    services::delete_availability(state.repository.as_ref(), &cut).await?;

    Ok(Json(Envelope::success(
        constants::DELETE_AVAILABILITY_SUCCESS_MSG,
    )))
}

/// POST /v1/recurring
///
/// Set recurring availability for a user.
pub async fn add_recurring(
    State(state): State<AppState>,
    Json(spec): Json<RecurringSlot>,
) -> Result<(StatusCode, Json<Envelope>), AppError> {
    services::add_recurring(state.repository.as_ref(), &spec)
        .await
        .map_err(|e| {
            AppError::from(e).with_conflict_message(constants::RECURRING_AVAILABILITY_CONFLICT_MSG)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(
            constants::RECURRING_AVAILABILITY_SUCCESS_MSG,
        )),
    ))
}

/// GET /v1/overlap?user1&user2&date&page&size
///
/// Show overlapping availability between two users on a date.
pub async fn find_overlap(
    State(state): State<AppState>,
    Query(query): Query<OverlapQuery>,
) -> HandlerResult<Page<Overlap>> {
    let page = services::find_overlap(
        state.repository.as_ref(),
        UserId::new(query.user1),
        UserId::new(query.user2),
        query.date,
        query.page_request(),
    )
    .await?;

    Ok(Json(page))
}

// =============================================================================
// Users
// =============================================================================

/// POST /v1/users
///
/// Register new users. Emails are unique.
pub async fn add_users(
    State(state): State<AppState>,
    Json(users): Json<Vec<User>>,
) -> Result<(StatusCode, Json<Envelope>), AppError> {
    services::add_users(state.repository.as_ref(), &users)
        .await
        .map_err(|e| AppError::from(e).with_conflict_message(constants::ADD_USERS_CONFLICT_MSG))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(constants::ADD_USERS_SUCCESS_MSG)),
    ))
}

/// GET /v1/users?page&size
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> HandlerResult<Page<User>> {
    let page = services::list_users(state.repository.as_ref(), query.page_request()).await?;
    Ok(Json(page))
}

/// GET /v1/user?email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<UserByEmailQuery>,
) -> HandlerResult<User> {
    let user = services::get_user_by_email(state.repository.as_ref(), &query.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user with email {}", query.email)))?;

    Ok(Json(user))
}

/// GET /v1/user/{id}
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> HandlerResult<User> {
    let user = services::get_user_by_id(state.repository.as_ref(), UserId::new(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user with id {}", user_id)))?;

    Ok(Json(user))
}

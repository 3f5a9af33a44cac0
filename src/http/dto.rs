//! Data Transfer Objects for the HTTP API.
//!
//! Domain types ([`TimeSlot`], [`RecurringSlot`], [`User`], [`Overlap`],
//! [`Page`]) already derive Serialize/Deserialize and are used directly as
//! request and response bodies; this module adds the response envelope and
//! query-parameter types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
pub use crate::models::{Overlap, Page, RecurringSlot, StoredSlot, TimeSlot, User};

use crate::constants;
use crate::models::PageRequest;

/// `{message, status}` envelope returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub message: String,
    pub status: String,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: constants::SUCCESS.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: constants::ERROR.to_string(),
        }
    }
}

/// Query parameters for `GET /v1/availability`.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub user_id: i32,
    pub date: NaiveDate,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

/// Query parameters for `GET /v1/overlap`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverlapQuery {
    pub user1: i32,
    pub user2: i32,
    pub date: NaiveDate,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

/// Query parameters for `GET /v1/users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

/// Query parameters for `GET /v1/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserByEmailQuery {
    pub email: String,
}

impl AvailabilityQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

impl OverlapQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

impl UsersQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_USER_SIZE),
        )
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

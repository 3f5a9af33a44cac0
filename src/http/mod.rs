//! HTTP server module.
//!
//! An axum-based REST API over the service layer and repository pattern.
//! Handlers parse and validate requests, delegate to
//! [`crate::services`], and serialize responses; mutation endpoints reply
//! with the `{message, status}` envelope.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

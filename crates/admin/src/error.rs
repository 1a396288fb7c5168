//! Unified error handling with Sentry integration.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use cakestack_core::access::{Decision, DenyReason};
use cakestack_core::lifecycle::IllegalTransition;
use cakestack_core::pricing::PricingError;
use cakestack_store::StoreError;

use crate::identity::IdentityError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Identity provider failure.
    #[error("Identity error: {0}")]
    Identity(IdentityError),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("Forbidden")]
    Forbidden(DenyReason),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The target already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Order status change violates the lifecycle.
    #[error("{0}")]
    Transition(#[from] IllegalTransition),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("document".to_string()),
            StoreError::AlreadyExists(path) => Self::Conflict(path),
            other => Self::Store(other),
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken => Self::Unauthorized("invalid token".to_string()),
            other => Self::Identity(other),
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_) | Self::Identity(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Identity(_) => StatusCode::BAD_GATEWAY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Transition(_) => StatusCode::CONFLICT,
        };

        let body = match &self {
            Self::Store(_) | Self::Internal(_) => json!({ "error": "Internal server error" }),
            Self::Identity(_) => json!({ "error": "Identity provider error" }),
            // The reason code is returned, but nothing about the target:
            // a shop-not-assigned denial must not confirm the shop exists.
            Self::Forbidden(reason) => json!({ "error": "Forbidden", "reason": reason }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Turn an access decision into a handler result.
///
/// # Errors
///
/// Returns `AppError::Forbidden` carrying the deny reason.
pub fn require(decision: Decision) -> Result<()> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => Err(AppError::Forbidden(reason)),
    }
}

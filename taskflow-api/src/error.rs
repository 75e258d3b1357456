/// Error handling for the API server
///
/// Unified error type that maps to HTTP responses. All handlers return
/// `Result<T, ApiError>` which converts into a response with the payload
/// shape `{"detail": <message>}`.
///
/// # Taxonomy
///
/// - 400: illegal status transitions, pagination bounds, bad enum values,
///   duplicate email, missing organization
/// - 401: missing, malformed, or expired token — one generic message, no
///   distinction surfaced
/// - 403: role or tenancy denial (where tenancy is surfaced at all)
/// - 404: task absent or cross-tenant, deliberately indistinguishable
/// - 500: data-store failures, never retried
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskflow_shared::auth::jwt::AuthError;
use taskflow_shared::auth::password::PasswordError;
use taskflow_shared::auth::policy::PolicyError;
use taskflow_shared::models::task::FilterError;
use taskflow_shared::workflow::{IllegalTransition, ParseStatusError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response body: `{"detail": <message>}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error message
    pub detail: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorDetail { detail })).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// A unique-constraint violation on `email` is a validation failure of the
/// signup request, so it maps to 400 rather than 409.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::BadRequest("Email already registered".to_string());
                    }
                    if constraint.contains("organization") {
                        return ApiError::BadRequest(
                            "Organization does not exist".to_string(),
                        );
                    }
                }
                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert token errors to API errors
///
/// Every verification failure becomes the same 401; issuance failures are
/// internal.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidOrExpired => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::CreateError(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Convert policy denials to API errors
impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::CrossTenant { .. } => {
                ApiError::Forbidden("Resource belongs to another organization".to_string())
            }
            PolicyError::InsufficientRole { .. } => {
                ApiError::Forbidden("Admin privileges required".to_string())
            }
        }
    }
}

/// Convert illegal workflow transitions to API errors
///
/// The message names both states, per the error contract.
impl From<IllegalTransition> for ApiError {
    fn from(err: IllegalTransition) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Convert pagination bound violations to API errors
impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Convert unknown status strings to API errors
impl From<ParseStatusError> for ApiError {
    fn from(err: ParseStatusError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

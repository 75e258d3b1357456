/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /signup` - Create a user in an existing organization
/// - `POST /login` - Exchange credentials for a session token
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{jwt, password},
    models::{
        organization::Organization,
        user::{CreateUser, Role, User},
    },
};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address (globally unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    pub password: String,

    /// Role within the organization: "ADMIN" or "USER"
    pub role: String,

    /// Organization the user joins; must already exist
    pub organization_id: i64,
}

/// Signup response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// New user ID
    pub id: i64,

    /// Email address
    pub email: String,

    /// Assigned role
    pub role: Role,

    /// Organization the user belongs to
    pub organization_id: i64,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token, valid for 30 minutes
    pub access_token: String,

    /// Token scheme for the Authorization header
    pub token_type: String,
}

/// Signup handler
///
/// Creates a user in an existing organization. The password is
/// strength-checked and hashed with Argon2id; the role string must be one of
/// the two known roles.
///
/// # Errors
///
/// - `400 Bad Request`: invalid email, weak password, unknown role,
///   missing organization, or duplicate email
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    req.validate().map_err(|e| {
        ApiError::BadRequest(first_validation_message(&e))
    })?;

    let role: Role = req
        .role
        .parse()
        .map_err(|e: taskflow_shared::models::user::ParseRoleError| {
            ApiError::BadRequest(e.to_string())
        })?;

    password::validate_password_strength(&req.password).map_err(ApiError::BadRequest)?;

    // Reject a missing organization up front so the caller gets a 400, not
    // a constraint-violation surprise
    if !Organization::exists(&state.db, req.organization_id).await? {
        return Err(ApiError::BadRequest("Organization does not exist".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            role,
            organization_id: req.organization_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, org_id = user.organization_id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            email: user.email,
            role: user.role,
            organization_id: user.organization_id,
        }),
    ))
}

/// Login handler
///
/// Verifies credentials and issues a session token embedding the user's id,
/// organization, and role.
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password, same message for
///   both
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(first_validation_message(&e)))?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let access_token = jwt::issue(user.id, user.organization_id, user.role, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Extracts the first message from a validator error set
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Request validation failed".to_string())
}

/// Organization endpoints
///
/// # Endpoints
///
/// - `POST /organizations` - Create an organization (token, ADMIN)
///
/// Organization creation is an authenticated, admin-only operation. The
/// first organization and its admin are provisioned out of band (seed data
/// or ops tooling); this endpoint cannot be reached anonymously.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::jwt::Identity,
    models::{
        organization::{CreateOrganization, Organization},
        user::Role,
    },
};
use validator::Validate;

/// Organization creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Organization name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

/// Organization creation response
#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    /// New organization ID
    pub id: i64,

    /// Organization name
    pub name: String,
}

/// Organization creation handler
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `403 Forbidden`: caller is not an admin
/// - `400 Bad Request`: empty or oversized name
pub async fn create_organization(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateOrganizationRequest>,
) -> ApiResult<(StatusCode, Json<OrganizationResponse>)> {
    // Organizations sit above tenancy, so the policy engine's org-scoped
    // actions don't apply; the role gate is checked directly.
    if identity.role != Role::Admin {
        return Err(ApiError::Forbidden("Admin privileges required".to_string()));
    }

    req.validate().map_err(|e| {
        ApiError::BadRequest(
            e.field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "Request validation failed".to_string()),
        )
    })?;

    let org = Organization::create(&state.db, CreateOrganization { name: req.name }).await?;

    tracing::info!(org_id = org.id, created_by = identity.subject_id, "Organization created");

    Ok((
        StatusCode::CREATED,
        Json(OrganizationResponse {
            id: org.id,
            name: org.name,
        }),
    ))
}

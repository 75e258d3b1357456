/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks` - List tasks in the caller's organization (any role)
/// - `POST /tasks` - Create a task (ADMIN)
/// - `PUT /tasks/:id` - Update a task's status (ADMIN)
/// - `DELETE /tasks/:id` - Delete a task (ADMIN)
///
/// # Check order on id-bearing routes
///
/// The tenancy-scoped lookup runs before the role check: a task outside the
/// caller's organization yields 404 whether it exists or not, and never a
/// 403 that would confirm its existence to another tenant. A same-org
/// non-admin gets 403 only after the scoped lookup has succeeded.
///
/// Every mutation invalidates the organization's cached list queries before
/// success is reported.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{
        jwt::Identity,
        policy::{authorize, Action},
    },
    cache::ListCache,
    models::task::{Task, TaskFilter},
    workflow::{validate_transition, TaskStatus},
};
use validator::Validate;

/// Query parameters for `GET /tasks`
///
/// `status` is parsed manually so an unknown value is a 400 with a named
/// message rather than an axum body rejection.
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    /// Optional status-equality filter
    pub status: Option<String>,

    /// 1-indexed page number (default 1)
    pub page: Option<i64>,

    /// Page size, 1-100 (default 10)
    pub limit: Option<i64>,
}

/// Task creation request
///
/// The schema constrains the optional initial status to `CREATED`; the
/// stored status is always `CREATED` regardless.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: String,

    /// Optional initial status; only "CREATED" is accepted
    pub status: Option<String>,
}

/// Task update request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// Requested status
    pub status: String,
}

/// Task as returned by the API
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: i64,

    /// Task title
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Owning organization
    pub organization_id: i64,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            status: task.status,
            created_at: task.created_at,
            organization_id: task.organization_id,
        }
    }
}

/// List tasks handler
///
/// Scoped to the caller's organization, with optional status filter and
/// validated pagination. Results are served read-through from the list
/// cache.
///
/// # Errors
///
/// - `400 Bad Request`: unknown status value, `page < 1`, or `limit`
///   outside 1-100
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<ListTasksParams>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    authorize(&identity, Action::ReadTask, identity.org_id)?;

    let status = params
        .status
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()?;

    let filter = TaskFilter::new(status, params.page.unwrap_or(1), params.limit.unwrap_or(10))?;

    let query_key = ListCache::query_key(&filter);
    if let Some(cached) = state.list_cache.get(identity.org_id, &query_key) {
        return Ok(Json(cached.into_iter().map(TaskResponse::from).collect()));
    }

    let tasks = Task::list_by_org(&state.db, identity.org_id, &filter).await?;
    state
        .list_cache
        .insert(identity.org_id, &query_key, tasks.clone());

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create task handler
///
/// The task is created in the caller's organization with status `CREATED`.
///
/// # Errors
///
/// - `403 Forbidden`: caller is not an admin
/// - `400 Bad Request`: empty title, or an initial status other than
///   "CREATED"
pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    authorize(&identity, Action::CreateTask, identity.org_id)?;

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

    // Schema constraint: a caller-supplied initial status must be CREATED
    if let Some(status) = req.status.as_deref() {
        if status.parse::<TaskStatus>()? != TaskStatus::Created {
            return Err(ApiError::BadRequest(
                "New tasks must have status CREATED".to_string(),
            ));
        }
    }

    let task = Task::create(&state.db, identity.org_id, &req.title).await?;

    state.list_cache.invalidate_org(identity.org_id);
    tracing::info!(task_id = task.id, org_id = task.organization_id, "Task created");

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// Update task handler
///
/// Validates the status transition against the workflow, then applies the
/// update under the same tenancy predicate.
///
/// # Errors
///
/// - `404 Not Found`: task absent or in another organization
/// - `403 Forbidden`: same-org caller is not an admin
/// - `400 Bad Request`: unknown status value or illegal transition, with
///   both states named in the message
pub async fn update_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    // Scoped lookup first: cross-tenant and nonexistent are the same 404
    let task = Task::find_by_id_and_org(&state.db, id, identity.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorize(&identity, Action::UpdateTask, task.organization_id)?;

    let requested: TaskStatus = req.status.parse()?;
    validate_transition(task.status, requested)?;

    let updated = Task::update_status_scoped(&state.db, id, identity.org_id, requested)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    state.list_cache.invalidate_org(identity.org_id);
    tracing::info!(
        task_id = updated.id,
        from = %task.status,
        to = %updated.status,
        "Task status updated"
    );

    Ok(Json(updated.into()))
}

/// Delete task handler
///
/// # Errors
///
/// - `404 Not Found`: task absent or in another organization
/// - `403 Forbidden`: same-org caller is not an admin
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let task = Task::find_by_id_and_org(&state.db, id, identity.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorize(&identity, Action::DeleteTask, task.organization_id)?;

    let deleted = Task::delete_scoped(&state.db, id, identity.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    state.list_cache.invalidate_org(identity.org_id);
    tracing::info!(task_id = id, org_id = identity.org_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Task model and tenancy-scoped database operations
///
/// Tasks are the resource the whole authorization core exists to protect.
/// Every query in this module carries `organization_id = $org` as a hard
/// predicate, with the organization id taken from the verified identity and
/// never from a client-supplied field. A task outside the caller's
/// organization is indistinguishable from a task that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('CREATED', 'IN_PROGRESS', 'COMPLETED');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     status task_status NOT NULL DEFAULT 'CREATED',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     organization_id BIGINT NOT NULL REFERENCES organizations(id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{Task, TaskFilter};
/// use taskflow_shared::workflow::TaskStatus;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, org_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let task = Task::create(&pool, org_id, "Ship release").await?;
///
/// // Scoped update: no row is touched if the task is in another org
/// let updated = Task::update_status_scoped(&pool, task.id, org_id, TaskStatus::InProgress).await?;
/// assert!(updated.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::workflow::TaskStatus;

/// Inclusive upper bound on the `limit` pagination parameter
pub const MAX_PAGE_SIZE: i64 = 100;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Task title
    pub title: String,

    /// Current workflow status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Organization the task belongs to
    pub organization_id: i64,
}

/// Validated filter and pagination parameters for list queries
///
/// Construction is the only way to get a `TaskFilter`, so a filter in hand
/// is always within bounds. Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    page: i64,
    limit: i64,
}

/// Error for out-of-range pagination parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// `page` below 1
    #[error("page must be >= 1, got {0}")]
    PageOutOfRange(i64),

    /// `limit` outside 1..=100
    #[error("limit must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
    LimitOutOfRange(i64),
}

impl TaskFilter {
    /// Builds a filter, validating pagination bounds
    ///
    /// # Errors
    ///
    /// - `FilterError::PageOutOfRange` if `page < 1`
    /// - `FilterError::LimitOutOfRange` if `limit` is not in 1..=100
    pub fn new(status: Option<TaskStatus>, page: i64, limit: i64) -> Result<Self, FilterError> {
        if page < 1 {
            return Err(FilterError::PageOutOfRange(page));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(FilterError::LimitOutOfRange(limit));
        }

        // The resulting OFFSET must also fit in i64, so pages large enough
        // to overflow (page - 1) * limit are out of range too
        if (page - 1).checked_mul(limit).is_none() {
            return Err(FilterError::PageOutOfRange(page));
        }

        Ok(Self {
            status,
            page,
            limit,
        })
    }

    /// Optional status-equality filter
    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// 1-indexed page number
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Page size
    pub fn limit(&self) -> i64 {
        self.limit
    }

    fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Task {
    /// Creates a task in the caller's organization
    ///
    /// The initial status is always `CREATED`; nothing the caller sends can
    /// change that.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, org_id: i64, title: &str) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, status, organization_id)
            VALUES ($1, 'CREATED', $2)
            RETURNING id, title, status, created_at, organization_id
            "#,
        )
        .bind(title)
        .bind(org_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID within an organization
    ///
    /// Returns `None` both when the task does not exist and when it belongs
    /// to another organization. Callers must not try to tell these apart.
    pub async fn find_by_id_and_org(
        pool: &PgPool,
        id: i64,
        org_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, created_at, organization_id
            FROM tasks
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Updates a task's status, scoped to an organization
    ///
    /// The caller is responsible for validating the transition first (see
    /// [`crate::workflow::validate_transition`]). The update and the
    /// returned row are one statement, so the pair is atomic.
    ///
    /// Returns `None` if no row matched the id + organization predicate.
    pub async fn update_status_scoped(
        pool: &PgPool,
        id: i64,
        org_id: i64,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $3
            WHERE id = $1 AND organization_id = $2
            RETURNING id, title, status, created_at, organization_id
            "#,
        )
        .bind(id)
        .bind(org_id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped to an organization
    ///
    /// Returns `true` if a row was deleted, `false` if no row matched the
    /// id + organization predicate.
    pub async fn delete_scoped(pool: &PgPool, id: i64, org_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists tasks in an organization, in insertion order
    ///
    /// Applies the optional status filter and the validated pagination from
    /// `filter`.
    pub async fn list_by_org(
        pool: &PgPool,
        org_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, status, created_at, organization_id
            FROM tasks
            WHERE organization_id = $1
              AND ($2::task_status IS NULL OR status = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(org_id)
        .bind(filter.status())
        .bind(filter.limit())
        .bind(filter.offset())
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_valid_bounds() {
        assert!(TaskFilter::new(None, 1, 1).is_ok());
        assert!(TaskFilter::new(None, 1, 100).is_ok());
        assert!(TaskFilter::new(Some(TaskStatus::Created), 500, 50).is_ok());
    }

    #[test]
    fn test_filter_rejects_page_zero() {
        let err = TaskFilter::new(None, 0, 10).unwrap_err();
        assert_eq!(err, FilterError::PageOutOfRange(0));
    }

    #[test]
    fn test_filter_rejects_negative_page() {
        assert!(TaskFilter::new(None, -3, 10).is_err());
    }

    #[test]
    fn test_filter_rejects_limit_out_of_range() {
        assert_eq!(
            TaskFilter::new(None, 1, 101).unwrap_err(),
            FilterError::LimitOutOfRange(101)
        );
        assert_eq!(
            TaskFilter::new(None, 1, 0).unwrap_err(),
            FilterError::LimitOutOfRange(0)
        );
    }

    #[test]
    fn test_filter_does_not_clamp() {
        // Out-of-range values are errors, never adjusted
        assert!(TaskFilter::new(None, 0, 100).is_err());
        assert!(TaskFilter::new(None, 1, 1000).is_err());
    }

    #[test]
    fn test_filter_rejects_page_whose_offset_overflows() {
        // (page - 1) * limit must stay within i64; pages past that are
        // rejected at construction instead of overflowing later
        let err = TaskFilter::new(None, i64::MAX, 100).unwrap_err();
        assert_eq!(err, FilterError::PageOutOfRange(i64::MAX));

        // The largest page that still fits is fine
        let last_safe = i64::MAX / 100 + 1;
        let filter = TaskFilter::new(None, last_safe, 100).unwrap();
        assert_eq!(filter.offset(), (last_safe - 1) * 100);
    }

    #[test]
    fn test_offset_is_one_indexed() {
        let filter = TaskFilter::new(None, 1, 10).unwrap();
        assert_eq!(filter.offset(), 0);

        let filter = TaskFilter::new(None, 3, 25).unwrap();
        assert_eq!(filter.offset(), 50);
    }
}

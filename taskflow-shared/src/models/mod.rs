/// Database models for TaskFlow
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `organization`: Tenant container; the hard isolation boundary
/// - `user`: Accounts with a role, scoped to one organization
/// - `task`: Tasks with a status workflow, scoped to one organization
///
/// Every query touching tenant-owned data takes the acting identity's
/// organization id as a hard predicate; there is no unscoped task access.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::task::{Task, TaskFilter};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, org_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let filter = TaskFilter::new(None, 1, 10)?;
/// let tasks = Task::list_by_org(&pool, org_id, &filter).await?;
/// # Ok(())
/// # }
/// ```
pub mod organization;
pub mod task;
pub mod user;

/// Organization model and database operations
///
/// Organizations are the tenancy boundary: users and tasks belong to exactly
/// one organization by foreign key. Organizations are immutable after
/// creation and never deleted by this core.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Organization model representing a tenant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID
    pub id: i64,

    /// Organization name
    pub name: String,
}

/// Input for creating a new organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    /// Organization name
    pub name: String,
}

impl Organization {
    /// Creates a new organization
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateOrganization) -> Result<Self, sqlx::Error> {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(org)
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(org)
    }

    /// Checks whether an organization exists
    ///
    /// Used at signup to reject users pointing at a missing organization
    /// before attempting the insert.
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }
}

/// User model and database operations
///
/// Users belong to exactly one organization and carry a role that governs
/// mutation rights. Email uniqueness is global, not per-organization. Users
/// are created at signup and never mutated or deleted by this core.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('ADMIN', 'USER');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     role user_role NOT NULL,
///     organization_id BIGINT NOT NULL REFERENCES organizations(id)
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

/// User role within an organization
///
/// Governs mutation rights, not read-scope boundaries: both roles read only
/// within their own organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// May create, update, and delete tasks
    #[sqlx(rename = "ADMIN")]
    Admin,

    /// Read-only access to the organization's tasks
    #[sqlx(rename = "USER")]
    User,
}

impl Role {
    /// Converts role to its wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Error for unrecognized role strings
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// User model representing an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Email address (globally unique)
    pub email: String,

    /// Argon2id password hash (PHC string format)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role within the organization
    pub role: Role,

    /// Organization the user belongs to
    pub organization_id: i64,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Pre-hashed password
    pub password_hash: String,

    /// Role within the organization
    pub role: Role,

    /// Organization the user belongs to
    pub organization_id: i64,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns a database error on failure; a unique-constraint violation on
    /// `email` surfaces as `sqlx::Error::Database` and is mapped to a 400 at
    /// the API boundary.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, organization_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, organization_id
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.organization_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email, for login
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, organization_id
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_roundtrip() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!(Role::Admin.as_str(), "ADMIN");
        assert!("SUPERUSER".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_representation() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"USER\"").unwrap(),
            Role::User
        );
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::User,
            organization_id: 1,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}

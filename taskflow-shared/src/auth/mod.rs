/// Authentication and authorization utilities
///
/// This module provides the security primitives for TaskFlow:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed, time-bound session tokens (issue / verify)
/// - [`policy`]: The access policy engine — tenancy and role checks
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with constant-time verification
/// - **Session Tokens**: HS256-signed JWTs with a fixed 30-minute TTL
/// - **Uniform Rejection**: malformed, forged, and expired tokens are all
///   reported as the same error, so callers cannot distinguish them
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::auth::password::{hash_password, verify_password};
/// use taskflow_shared::auth::jwt::{issue, verify};
/// use taskflow_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = issue(1, 1, Role::Admin, "secret-key-at-least-32-bytes-long")?;
/// let identity = verify(&token, "secret-key-at-least-32-bytes-long")?;
/// assert_eq!(identity.subject_id, 1);
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod password;
pub mod policy;

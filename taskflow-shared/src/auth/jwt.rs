/// Session token codec
///
/// Issues and verifies the signed, time-bound identity assertions presented
/// as bearer tokens on every authenticated request. Tokens are JWTs signed
/// with HS256 (HMAC-SHA256) using a single process-wide symmetric key that is
/// loaded at startup and injected explicitly — there is no ambient key lookup.
///
/// # Security
///
/// - **Algorithm**: HS256
/// - **TTL**: fixed 30 minutes from issuance
/// - **Statelessness**: tokens are never stored and cannot be revoked;
///   compromise mitigation is TTL-bounded only (no logout)
/// - **Uniform failure**: signature mismatch, malformed token, and expiry all
///   surface as [`AuthError::InvalidOrExpired`] so the caller cannot tell
///   which check failed
///
/// # Example
///
/// ```
/// use taskflow_shared::auth::jwt::{issue, verify};
/// use taskflow_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let token = issue(42, 7, Role::User, secret)?;
/// let identity = verify(&token, secret)?;
///
/// assert_eq!(identity.subject_id, 42);
/// assert_eq!(identity.org_id, 7);
/// assert_eq!(identity.role, Role::User);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Token issuer claim, checked on verification
const ISSUER: &str = "taskflow";

/// Fixed session lifetime
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token failed verification for any reason: bad signature, malformed
    /// structure, or past expiry. Deliberately a single variant.
    #[error("Invalid or expired token")]
    InvalidOrExpired,

    /// Failed to sign a new token
    #[error("Failed to create token: {0}")]
    CreateError(String),
}

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: i64,

    /// Organization the subject belongs to (custom claim)
    pub org_id: i64,

    /// Role of the subject within the organization (custom claim)
    pub role: Role,

    /// Issuer - always "taskflow"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Identity recovered from a verified token
///
/// Derived per-request and never persisted. Everything downstream — policy
/// decisions, repository scoping — trusts these fields and nothing from the
/// request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated user ID
    pub subject_id: i64,

    /// Organization the user acts within
    pub org_id: i64,

    /// Role governing mutation rights
    pub role: Role,
}

/// Issues a signed session token for the given identity
///
/// The token expires [`TOKEN_TTL_MINUTES`] after issuance.
///
/// # Errors
///
/// Returns `AuthError::CreateError` if signing fails
pub fn issue(subject_id: i64, org_id: i64, role: Role, secret: &str) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject_id,
        org_id,
        role,
        iss: ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp(),
    };

    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &key)
        .map_err(|e| AuthError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a session token and recovers the embedded identity
///
/// Checks the HS256 signature, the issuer, and that the token has not
/// expired.
///
/// # Errors
///
/// Returns `AuthError::InvalidOrExpired` on any failure. The reason is
/// intentionally not surfaced.
pub fn verify(token: &str, secret: &str) -> Result<Identity, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data =
        decode::<Claims>(token, &key, &validation).map_err(|_| AuthError::InvalidOrExpired)?;

    Ok(Identity {
        subject_id: token_data.claims.sub,
        org_id: token_data.claims.org_id,
        role: token_data.claims.role,
    })
}

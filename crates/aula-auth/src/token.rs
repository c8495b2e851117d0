//! HS256 JWT verification and bearer extraction.

use aula_core::{UserIdentity, UserRole};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AuthError;

/// Claims carried by an LMS-issued token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user ID.
    pub sub: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl From<Claims> for UserIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Verifies LMS-issued HS256 tokens against a shared secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the given shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return the identity it carries.
    pub fn verify(&self, token: &str) -> Result<UserIdentity, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(e.to_string()),
            }
        })?;
        Ok(data.claims.into())
    }

    /// Lenient verification for registration: an absent, malformed, or
    /// expired credential yields `None` and the caller proceeds anonymously.
    #[must_use]
    pub fn identity_if_valid(&self, token: Option<&str>) -> Option<UserIdentity> {
        let token = token?;
        match self.verify(token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!(error = %e, "credential did not verify, proceeding anonymously");
                None
            }
        }
    }

    /// Strict verification for privileged routes: the credential must be
    /// present, valid, and carry the admin role.
    pub fn require_admin(&self, token: Option<&str>) -> Result<UserIdentity, AuthError> {
        let token = token.ok_or(AuthError::Missing)?;
        let identity = self.verify(token)?;
        if !identity.role.is_admin() {
            return Err(AuthError::InsufficientRole {
                role: identity.role.to_string(),
            });
        }
        Ok(identity)
    }
}

/// Extract a bearer token from an `Authorization` header value.
#[must_use]
pub fn bearer_from_headers(authorization: Option<&str>) -> Option<&str> {
    let value = authorization?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Extract a named token from a `Cookie` header value.
#[must_use]
pub fn bearer_from_cookie<'a>(cookie_header: Option<&'a str>, cookie_name: &str) -> Option<&'a str> {
    let header = cookie_header?;
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == cookie_name && !value.is_empty() {
            return Some(value);
        }
    }
    None
}

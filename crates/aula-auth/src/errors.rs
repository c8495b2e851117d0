//! Auth error types.

/// Errors that can occur while verifying a credential.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No credential was presented.
    #[error("no credential presented")]
    Missing,

    /// The token failed signature or structural validation.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// The token is structurally valid but expired.
    #[error("token expired")]
    Expired,

    /// The credential is valid but the role is insufficient.
    #[error("role '{role}' may not perform this operation")]
    InsufficientRole {
        /// The role the credential carries.
        role: String,
    },
}

impl AuthError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "UNAUTHORIZED",
            Self::Invalid(_) | Self::Expired => "INVALID_TOKEN",
            Self::InsufficientRole { .. } => "FORBIDDEN",
        }
    }
}

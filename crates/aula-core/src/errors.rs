//! API error codes and error type.

// ── Error code constants ────────────────────────────────────────────

/// Invalid or missing parameters.
pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
/// No credential presented where one is required.
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
/// Credential valid but lacks the required role.
pub const FORBIDDEN: &str = "FORBIDDEN";
/// Unexpected internal error.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Error type returned by API handlers.
///
/// The registry itself cannot fail; the only failure surface is caller-input
/// validation and privilege checks, which is exactly what these variants
/// cover.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required parameter missing or wrong type.
    #[error("{message}")]
    InvalidParams {
        /// Description of what is wrong.
        message: String,
    },

    /// No valid credential on a privileged route.
    #[error("{message}")]
    Unauthorized {
        /// Description.
        message: String,
    },

    /// Valid credential without the required role.
    #[error("{message}")]
    Forbidden {
        /// Description.
        message: String,
    },

    /// Internal server error.
    #[error("{message}")]
    Internal {
        /// Description.
        message: String,
    },
}

impl ApiError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParams { .. } => INVALID_PARAMS,
            Self::Unauthorized { .. } => UNAUTHORIZED,
            Self::Forbidden { .. } => FORBIDDEN,
            Self::Internal { .. } => INTERNAL_ERROR,
        }
    }

    /// Message safe to return to the client.
    ///
    /// Validation and privilege messages are user-facing; internal details
    /// (paths, source chains) are stripped.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidParams { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message } => message.clone(),
            Self::Internal { .. } => "Internal error".to_string(),
        }
    }

    /// Convenience constructor for a missing/invalid parameter.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Convenience constructor for a missing credential.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Convenience constructor for an insufficient role.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
}

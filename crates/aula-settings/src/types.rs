//! Settings types with compiled defaults.

use serde::{Deserialize, Serialize};

/// Top-level settings for the presence service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AulaSettings {
    /// Network and runtime settings.
    pub server: ServerSettings,
    /// Credential verification settings.
    pub auth: AuthSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Server network settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// HTTP port (`0` for auto-assign).
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4820,
        }
    }
}

/// Credential verification settings.
///
/// The presence service never issues tokens; it shares the LMS signing
/// secret so it can verify them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSettings {
    /// HS256 shared secret for verifying LMS-issued tokens.
    pub token_secret: String,
    /// Name of the cookie carrying the token.
    pub cookie_name: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            cookie_name: "auth_token".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Tracing filter directive (e.g. `"info"` or `"aula_server=debug"`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

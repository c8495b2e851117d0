//! Connection record value types.

use aula_core::UserIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked client connection.
///
/// Keyed by the client-supplied session identifier, which is distinct from
/// the authenticated user identity: the same user can hold several sessions,
/// and a session can be anonymous.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Opaque client-generated session identifier.
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Identity snapshot at last update, `None` for anonymous sessions.
    pub identity: Option<UserIdentity>,
    /// Client IP resolved from proxy headers, `"unknown"` when unresolvable.
    pub ip: String,
    /// Opaque client diagnostic payload, stored verbatim.
    #[serde(rename = "networkInfo")]
    pub network_info: Option<serde_json::Value>,
    /// Client user agent string.
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    /// First time this session ID was seen. Set once, never changed.
    #[serde(rename = "connectedAt")]
    pub connected_at: DateTime<Utc>,
    /// Last upsert time for this session ID.
    #[serde(rename = "lastActivity")]
    pub last_activity: DateTime<Utc>,
}

/// Fields supplied on each registration upsert.
///
/// A full replacement, not a merge: an update with `identity: None`
/// overwrites a previously-known identity with absence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionUpdate {
    /// Identity resolved from the caller's credential, if any.
    pub identity: Option<UserIdentity>,
    /// Resolved client IP.
    pub ip: String,
    /// Client diagnostic payload.
    pub network_info: Option<serde_json::Value>,
    /// Client user agent.
    pub user_agent: String,
}

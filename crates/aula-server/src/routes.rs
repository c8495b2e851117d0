//! Route handlers: registration, privileged clear, privileged listing.

use aula_core::ApiError;
use aula_registry::{ConnectionRecord, ConnectionUpdate};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::HttpError;
use crate::net;
use crate::server::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Client-generated session identifier.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Opaque client diagnostic payload, stored verbatim.
    #[serde(default)]
    pub network_info: Option<serde_json::Value>,
}

/// Registration response body.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always `true`; registration has no failure path past validation.
    pub success: bool,
}

/// Clear response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    /// Always `true` on a successful clear.
    pub success: bool,
    /// Number of records removed, stale ones included.
    pub deleted_count: usize,
}

/// Privileged listing response body.
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    /// All live (non-stale) records.
    pub connections: Vec<ConnectionRecord>,
    /// Convenience count, equal to `connections.len()`.
    pub count: usize,
}

/// `POST /api/network/register`
///
/// Upserts the caller's connection record. Identity is resolved from the
/// bearer credential when present and valid; otherwise the connection is
/// tracked anonymously. Succeeds unconditionally past the `sessionId`
/// presence check.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    // The identifier is opaque: validate that it is not blank, but store it
    // exactly as the client sent it.
    let session_id = body
        .session_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::invalid_params("sessionId es requerido"))?;

    let identity = state
        .verifier
        .identity_if_valid(credential(&headers, &state.cookie_name).as_deref());
    let ip = net::client_ip(&headers);

    debug!(
        session_id,
        ip,
        authenticated = identity.is_some(),
        "connection registered"
    );

    state.registry.upsert(
        session_id,
        ConnectionUpdate {
            identity,
            ip,
            network_info: body.network_info,
            user_agent: net::user_agent(&headers),
        },
    );

    Ok(Json(RegisterResponse { success: true }))
}

/// `POST /api/admin/connections/clear`
///
/// Bulk-deletes every record regardless of staleness. Admin only; the
/// privilege check happens before the registry is touched.
pub async fn clear_connections(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ClearResponse>, HttpError> {
    let admin = state
        .verifier
        .require_admin(credential(&headers, &state.cookie_name).as_deref())?;

    let deleted_count = state.registry.clear_all();
    info!(
        admin_id = admin.user_id,
        deleted_count, "admin cleared connection registry"
    );

    Ok(Json(ClearResponse {
        success: true,
        deleted_count,
    }))
}

/// `GET /api/admin/connections`
///
/// Lists all live (non-stale) records. Admin only.
pub async fn list_connections(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConnectionsResponse>, HttpError> {
    let _ = state
        .verifier
        .require_admin(credential(&headers, &state.cookie_name).as_deref())?;

    let connections = state.registry.list_active();
    let count = connections.len();
    Ok(Json(ConnectionsResponse { connections, count }))
}

/// Pull the bearer token from the `Authorization` header, falling back to
/// the configured auth cookie.
fn credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if let Some(token) = aula_auth::bearer_from_headers(authorization) {
        return Some(token.to_string());
    }
    let cookie = headers.get(COOKIE).and_then(|v| v.to_str().ok());
    aula_auth::bearer_from_cookie(cookie, cookie_name).map(ToString::to_string)
}

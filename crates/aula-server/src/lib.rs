//! # aula-server
//!
//! Axum HTTP server around the connection registry.
//!
//! - `POST /api/network/register` — heartbeat/registration upsert, open to
//!   anonymous and authenticated callers
//! - `POST /api/admin/connections/clear` — privileged bulk delete
//! - `GET /api/admin/connections` — privileged listing of live connections
//! - `GET /health` — liveness with uptime and connection count
//! - Graceful shutdown via [`ShutdownCoordinator`] (`CancellationToken`)

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod health;
pub mod net;
pub mod routes;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{AppState, PresenceServer};
pub use shutdown::ShutdownCoordinator;

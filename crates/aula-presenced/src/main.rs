//! # aula-presenced
//!
//! Aula presence daemon binary — loads settings, builds the connection
//! registry, and starts the HTTP server.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use aula_auth::TokenVerifier;
use aula_registry::{ConnectionRegistry, SystemClock};
use aula_server::{PresenceServer, ServerConfig};
use clap::Parser;

/// Aula presence daemon.
#[derive(Parser, Debug)]
#[command(name = "aula-presenced", about = "Aula presence daemon")]
struct Cli {
    /// Host to bind (overrides settings if specified).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (0 for auto-assign; overrides settings if specified).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the settings file (defaults to `~/.aula/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load settings early (needed for log level before logging init).
    let settings_path = args
        .settings
        .unwrap_or_else(aula_settings::settings_path);
    let settings = aula_settings::load_settings_from_path(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level)),
        )
        .init();

    if settings.auth.token_secret.is_empty() {
        bail!("No token secret configured (set auth.tokenSecret in settings or AULA_TOKEN_SECRET)");
    }

    let registry = Arc::new(ConnectionRegistry::new(Arc::new(SystemClock)));
    let verifier = Arc::new(TokenVerifier::new(&settings.auth.token_secret));

    let config = ServerConfig {
        host: args.host.unwrap_or(settings.server.host),
        port: args.port.unwrap_or(settings.server.port),
        cookie_name: settings.auth.cookie_name,
    };

    let server = PresenceServer::new(config, registry, verifier);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;

    tracing::info!("Aula presence daemon listening on http://{addr}");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    let drained = server.shutdown().drain(handle, None).await;
    if !drained {
        tracing::warn!("server did not drain in time, exiting anyway");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_settings() {
        let cli = Cli::parse_from(["aula-presenced"]);
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
        assert_eq!(cli.settings, None);
    }

    #[test]
    fn cli_custom_host_and_port() {
        let cli = Cli::parse_from(["aula-presenced", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn cli_settings_path() {
        let cli = Cli::parse_from(["aula-presenced", "--settings", "/tmp/settings.json"]);
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/settings.json")));
    }
}

//! Shutdown coordination.
//!
//! A [`ShutdownCoordinator`] wraps a `CancellationToken` shared between the
//! serve task and whoever decides to stop (the signal handler, or a test).
//! Cancelling the token lets axum stop accepting connections and finish
//! in-flight requests; [`drain`](ShutdownCoordinator::drain) then waits for
//! the serve task itself, bounded by a timeout so a wedged request cannot
//! keep the process alive.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How long `drain` waits for the serve task before giving up.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Signals and awaits server shutdown.
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// Create a coordinator with a fresh token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// A clone of the cancellation token, for the serve task to watch.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Signal shutdown. Idempotent.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Whether shutdown has been signalled.
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Signal shutdown and wait for the serve task to finish.
    ///
    /// Returns `true` if the task completed within `timeout`
    /// ([`DRAIN_TIMEOUT`] when `None`), `false` if it was still running when
    /// the timeout expired.
    pub async fn drain(&self, server: JoinHandle<()>, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or(DRAIN_TIMEOUT);
        self.shutdown();
        info!(timeout_secs = timeout.as_secs(), "draining server task");

        match tokio::time::timeout(timeout, server).await {
            Ok(_) => true,
            Err(_) => {
                warn!("server task still running after {timeout:?}");
                false
            }
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

//! Refresh-token watcher.
//!
//! The origin context polls the store on a fixed interval. A token that is
//! set and differs from the last one seen is cleared before the reload
//! callback runs, so concurrent pollers and later polls never act on it
//! twice.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use capture_protocols::RefreshToken;

use crate::store::HandoffStore;

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Nothing to do.
    Idle,
    /// A fresh token was consumed; the page should reload.
    Reload(RefreshToken),
}

/// Polls the handoff store for refresh tokens.
pub struct TokenWatcher {
    store: HandoffStore,
    interval: Duration,
}

impl TokenWatcher {
    pub fn new(store: HandoffStore, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check the store once.
    ///
    /// Store failures are logged and reported as [`WatchOutcome::Idle`].
    pub async fn poll_once(&self, last_observed: RefreshToken) -> WatchOutcome {
        let token = match self.store.refresh_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read refresh token: {}", e);
                return WatchOutcome::Idle;
            }
        };

        if !token.is_set() || token == last_observed {
            return WatchOutcome::Idle;
        }

        if let Err(e) = self.store.clear_refresh_token().await {
            warn!("Failed to clear refresh token {}: {}", token, e);
            return WatchOutcome::Idle;
        }

        debug!("Consumed refresh token {}", token);
        WatchOutcome::Reload(token)
    }

    /// Run the poll loop on a tokio task.
    ///
    /// The first poll happens one interval after spawning. `initial` is the
    /// token treated as already seen.
    pub fn spawn<F, Fut>(self, initial: RefreshToken, on_reload: F) -> WatcherHandle
    where
        F: Fn(RefreshToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let reloads = Arc::new(AtomicU64::new(0));

        let task_cancel = cancel.clone();
        let task_reloads = reloads.clone();
        let join = tokio::spawn(async move {
            info!("Starting refresh token watcher (interval: {:?})", self.interval);

            let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_observed = initial;

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        info!("Refresh token watcher shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let WatchOutcome::Reload(token) = self.poll_once(last_observed).await {
                            last_observed = token;
                            task_reloads.fetch_add(1, Ordering::SeqCst);
                            info!("Refresh token {} received, reloading", token);
                            on_reload(token).await;
                        }
                    }
                }
            }
        });

        WatcherHandle {
            cancel,
            reloads,
            join,
        }
    }
}

/// Handle to a running watcher.
pub struct WatcherHandle {
    cancel: CancellationToken,
    reloads: Arc<AtomicU64>,
    join: JoinHandle<()>,
}

impl WatcherHandle {
    /// Number of reloads triggered so far.
    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop polling without waiting for the task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Stop polling and wait for the loop to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.join.await {
            warn!("Refresh token watcher task failed: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;

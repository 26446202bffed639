//! Waiting for a GitHub sync to finish.
//!
//! Travis syncs run in the background. [`wait_for_sync`] polls the current
//! user at a fixed interval until `is_syncing` drops, bounded by a timeout
//! and a cancellation token.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::client::TravisClient;
use crate::error::{Result, TravisError};
use crate::models::User;

/// Default time between sync status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default upper bound on a blocking sync.
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(300);

/// Progress callback, invoked once per poll while a sync is running.
pub type SyncProgress<'a> = &'a mut (dyn FnMut(&User) + Send);

/// How to wait for a sync to finish.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Give up after this long.
    pub timeout: Duration,
    /// Time between status polls.
    pub poll_interval: Duration,
    /// Stops the wait early when cancelled.
    pub cancel: CancellationToken,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SYNC_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }
}

impl SyncOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Poll the authenticated user until Travis reports the sync finished.
///
/// Returns the first user snapshot with `is_syncing == false`. While the
/// sync is running, `on_progress` sees every snapshot.
///
/// # Errors
///
/// Returns `SyncCancelled` if `options.cancel` fires, `SyncTimedOut` once
/// `options.timeout` has elapsed, and any error from fetching the user.
#[tracing::instrument(skip(client, options, on_progress), fields(timeout = ?options.timeout))]
pub async fn wait_for_sync(
    client: &TravisClient,
    options: &SyncOptions,
    mut on_progress: Option<SyncProgress<'_>>,
) -> Result<User> {
    let started = Instant::now();
    // `None` when the timeout runs past the clock's range: wait without a deadline.
    let deadline = started.checked_add(options.timeout);
    let mut polls: u32 = 0;

    loop {
        let user = tokio::select! {
            biased;
            _ = options.cancel.cancelled() => return Err(TravisError::SyncCancelled),
            user = User::current(client) => user?,
        };
        polls = polls.saturating_add(1);

        if !user.is_syncing {
            tracing::info!(polls, elapsed = ?started.elapsed(), "sync finished");
            return Ok(user);
        }

        if let Some(callback) = on_progress.as_mut() {
            callback(&user);
        }

        let now = Instant::now();
        let nap = match deadline {
            Some(deadline) if now >= deadline => {
                tracing::warn!(polls, "gave up waiting for sync");
                return Err(TravisError::SyncTimedOut {
                    waited: now - started,
                });
            }
            Some(deadline) => options.poll_interval.min(deadline - now),
            None => options.poll_interval,
        };

        tokio::select! {
            biased;
            _ = options.cancel.cancelled() => return Err(TravisError::SyncCancelled),
            _ = tokio::time::sleep(nap) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SyncOptions::default();
        assert_eq!(options.poll_interval, Duration::from_secs(1));
        assert_eq!(options.timeout, Duration::from_secs(300));
        assert!(!options.cancel.is_cancelled());
    }

    #[test]
    fn test_builder_methods() {
        let token = CancellationToken::new();
        let options = SyncOptions::default()
            .with_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(10))
            .with_cancel(token.clone());

        token.cancel();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.poll_interval, Duration::from_millis(10));
        assert!(options.cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_unbounded_timeout_still_honours_cancel() {
        // Nothing listens here; cancellation must win before any request
        let client = TravisClient::new("test-token", "http://127.0.0.1:1").unwrap();
        let token = CancellationToken::new();
        token.cancel();

        for timeout in [Duration::MAX, Duration::from_secs(u64::MAX)] {
            let options = SyncOptions::default()
                .with_timeout(timeout)
                .with_cancel(token.clone());

            let err = wait_for_sync(&client, &options, None).await.unwrap_err();
            assert!(matches!(err, TravisError::SyncCancelled));
        }
    }
}

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::config::{RefreshConfig, RetryConfig};
use crate::error::AppError;
use crate::model::TokenList;
use crate::screener::ScreenerRestClient;

/// Exponential backoff between fetch retries.
pub struct ExponentialBackoff {
    current: Duration,
    initial: Duration,
    max: Duration,
    factor: f64,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration, factor: f64) -> Self {
        Self {
            current: initial,
            initial,
            max,
            factor,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = Duration::from_secs_f64(
            (self.current.as_secs_f64() * self.factor).min(self.max.as_secs_f64()),
        );
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    /// First fetch has not completed yet.
    Loading,
    Ready,
    /// All retry attempts failed; `tokens` keeps the last good list.
    Failed { code: &'static str, message: String },
}

/// Latest snapshot from the remote source, published over a watch channel.
#[derive(Debug, Clone)]
pub struct FetchState {
    pub status: FetchStatus,
    pub tokens: TokenList,
    pub fetched_at_ms: Option<i64>,
    /// Increments on every successful full fetch; consumers use it to tell a
    /// fresh list from a repeat of the previous snapshot.
    pub generation: u64,
}

impl FetchState {
    fn initial() -> Self {
        Self {
            status: FetchStatus::Loading,
            tokens: Vec::new(),
            fetched_at_ms: None,
            generation: 0,
        }
    }
}

/// Handle to the background fetch task.
///
/// Staleness policy is always-stale: every cadence tick and every manual
/// `refetch()` performs a real network fetch; there is no retention window.
pub struct TokenSource {
    state_rx: watch::Receiver<FetchState>,
    refetch_tx: mpsc::Sender<()>,
}

impl TokenSource {
    pub fn spawn(
        client: ScreenerRestClient,
        retry: RetryConfig,
        refresh: RefreshConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(FetchState::initial());
        let (refetch_tx, refetch_rx) = mpsc::channel(1);
        tokio::spawn(run_fetch_loop(
            client, retry, refresh, state_tx, refetch_rx, shutdown,
        ));
        Self {
            state_rx,
            refetch_tx,
        }
    }

    pub fn state(&self) -> watch::Receiver<FetchState> {
        self.state_rx.clone()
    }

    /// Request an immediate out-of-cadence fetch (pull-to-refresh, retry
    /// button, connectivity regained). Coalesces if one is already queued.
    pub fn refetch(&self) {
        let _ = self.refetch_tx.try_send(());
    }
}

async fn run_fetch_loop(
    client: ScreenerRestClient,
    retry: RetryConfig,
    refresh: RefreshConfig,
    state_tx: watch::Sender<FetchState>,
    mut refetch_rx: mpsc::Receiver<()>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(refresh.refetch_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut generation: u64 = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            Some(()) = refetch_rx.recv() => {
                // Manual refetch restarts the cadence from now.
                interval.reset();
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    tracing::debug!("token source shutting down");
                    return;
                }
                continue;
            }
        }

        match fetch_with_retry(&client, &retry, &mut shutdown).await {
            Ok(Some(tokens)) => {
                generation += 1;
                let sent = state_tx.send(FetchState {
                    status: FetchStatus::Ready,
                    tokens,
                    fetched_at_ms: Some(chrono::Utc::now().timestamp_millis()),
                    generation,
                });
                if sent.is_err() {
                    tracing::debug!("all fetch-state receivers dropped, stopping source");
                    return;
                }
            }
            Ok(None) => return, // shutdown during backoff
            Err(e) => {
                tracing::warn!(error = %e, "token list fetch failed after retries");
                let previous = state_tx.borrow().clone();
                let _ = state_tx.send(FetchState {
                    status: FetchStatus::Failed {
                        code: e.code(),
                        message: e.to_string(),
                    },
                    ..previous
                });
            }
        }
    }
}

/// One fetch with bounded retries. Returns `Ok(None)` when shutdown was
/// requested while waiting out a backoff delay.
async fn fetch_with_retry(
    client: &ScreenerRestClient,
    retry: &RetryConfig,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<Option<TokenList>, AppError> {
    let mut backoff = ExponentialBackoff::new(retry.base_delay(), retry.max_delay(), 2.0);
    let mut last_err = None;

    for attempt in 1..=retry.attempts.max(1) {
        match client.fetch_token_list().await {
            Ok(tokens) => return Ok(Some(tokens)),
            Err(e) => {
                let retryable = e.is_retryable() && attempt < retry.attempts.max(1);
                tracing::warn!(attempt, error = %e, retryable, "token list fetch attempt failed");
                if !retryable {
                    return Err(e);
                }
                last_err = Some(e);
            }
        }

        let delay = backoff.next_delay();
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    return Ok(None);
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| AppError::Unknown("fetch retries exhausted".to_string())))
}

//! Bounded exponential backoff around a `StatsSource`.
//!
//! Every failed attempt is retried, whatever its kind, until one succeeds, the
//! cancellation token fires, or the next wait would carry the run past its
//! elapsed-time budget. Only cancellation ends the loop early.

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

use crate::config::Credentials;
use crate::error::{FetchError, RetryError};
use crate::github::StatsSource;
use crate::schema::RawApiResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// First wait, before jitter.
    pub initial_interval: Duration,
    /// Growth applied to the interval after every failure.
    pub multiplier: f64,
    /// Jitter: each wait is drawn from `interval * (1 ± factor)`. Clamped to `[0, 1]`.
    pub randomization_factor: f64,
    /// Cap on the un-jittered interval.
    pub max_interval: Duration,
    /// Total wall-clock budget across all attempts and waits.
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 1.5,
            randomization_factor: 0.5,
            max_interval: Duration::from_secs(60),
            max_elapsed: Duration::from_secs(120),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    /// Start a backoff sequence. Non-finite tuning values fall back to the defaults.
    pub fn backoff(&self) -> ExponentialBackoff {
        let defaults = RetryPolicy::default();
        let multiplier = if self.multiplier.is_finite() {
            self.multiplier.max(1.0)
        } else {
            defaults.multiplier
        };
        let randomization_factor = if self.randomization_factor.is_finite() {
            self.randomization_factor.clamp(0.0, 1.0)
        } else {
            defaults.randomization_factor
        };

        ExponentialBackoff {
            current: self.initial_interval,
            multiplier,
            randomization_factor,
            max_interval: self.max_interval,
        }
    }
}

/// Interval state for one retry loop.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    current: Duration,
    multiplier: f64,
    randomization_factor: f64,
    max_interval: Duration,
}

impl ExponentialBackoff {
    /// Draw the next (jittered) wait and grow the interval.
    pub fn next_delay<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Duration {
        let base = self.current.as_secs_f64();
        let delay = if self.randomization_factor == 0.0 {
            base
        } else {
            let delta = base * self.randomization_factor;
            rng.gen_range((base - delta)..=(base + delta))
        };

        let grown = Duration::try_from_secs_f64(base * self.multiplier).unwrap_or(Duration::MAX);
        self.current = grown.min(self.max_interval);

        Duration::try_from_secs_f64(delay).unwrap_or(Duration::MAX)
    }
}

/// Retry orchestrator: owns the attempt loop around `source`.
pub struct Retrying<S> {
    source: S,
    policy: RetryPolicy,
}

impl<S: StatsSource> Retrying<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch until success, cancellation, or budget exhaustion.
    pub async fn fetch_with_retry(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<RawApiResponse, RetryError> {
        let started = Instant::now();
        let mut backoff = self.policy.backoff();
        let mut rng = StdRng::from_entropy();
        let mut attempts = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Err(RetryError::Cancelled { attempts });
            }

            attempts += 1;
            debug!("Fetch attempt {attempts}");

            let err = match self.source.fetch(credentials, cancel).await {
                Ok(raw) => {
                    if attempts > 1 {
                        info!("Fetch succeeded after {attempts} attempts");
                    }
                    return Ok(raw);
                }
                Err(FetchError::Cancelled) => return Err(RetryError::Cancelled { attempts }),
                Err(err) => err,
            };

            let elapsed = started.elapsed();
            let delay = backoff.next_delay(&mut rng);
            if elapsed.saturating_add(delay) > self.policy.max_elapsed {
                warn!("Fetch attempt {attempts} failed: {err}. Retry budget exhausted");
                return Err(RetryError::BudgetExhausted {
                    attempts,
                    elapsed,
                    last_cause: err,
                });
            }

            report_failure(&err, attempts, delay);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RetryError::Cancelled { attempts }),
                _ = sleep(delay) => {}
            }
        }
    }
}

fn report_failure(err: &FetchError, attempt: u32, delay: Duration) {
    warn!("Fetch attempt {attempt} failed: {err}. Retrying in {delay:?}");

    if let Some(reset_at) = err.reset_at() {
        warn!("Rate limit resets at {}", reset_at.to_rfc3339());
    }
    if err.is_authorization_failure() {
        warn!("Authorization failures are retried like any other error; check the token");
    }
}

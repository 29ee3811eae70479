//! Circuit breaker shared by all worker threads hitting one provider.
//!
//! HTTP 403 (IP ban) trips it immediately; repeated 429s or server errors trip
//! it after `failure_threshold` consecutive failures. While open, every fetch
//! fails fast with `DataError::CircuitBreakerTripped` so the remaining tickers
//! are skipped instead of hammering the provider.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Closed { consecutive_failures: u32 },
    Open { tripped_at: Instant },
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<State>,
    cooldown: Duration,
    failure_threshold: u32,
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            state: Mutex::new(State::Closed {
                consecutive_failures: 0,
            }),
            cooldown,
            failure_threshold: 3,
        }
    }

    /// 15-minute cooldown, trips after 3 consecutive failures.
    pub fn default_provider() -> Self {
        Self::new(Duration::from_secs(15 * 60))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is plain data; a panicked holder cannot leave it inconsistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_allowed(&self) -> bool {
        let mut state = self.lock();
        match *state {
            State::Closed { .. } => true,
            State::Open { tripped_at } if tripped_at.elapsed() >= self.cooldown => {
                *state = State::Closed {
                    consecutive_failures: 0,
                };
                tracing::info!("provider circuit breaker closed after cooldown");
                true
            }
            State::Open { .. } => false,
        }
    }

    pub fn record_success(&self) {
        let mut state = self.lock();
        if let State::Closed { .. } = *state {
            *state = State::Closed {
                consecutive_failures: 0,
            };
        }
    }

    pub fn record_failure(&self) {
        let mut state = self.lock();
        if let State::Closed {
            consecutive_failures,
        } = *state
        {
            let failures = consecutive_failures + 1;
            *state = if failures >= self.failure_threshold {
                tracing::warn!(failures, "provider circuit breaker tripped");
                State::Open {
                    tripped_at: Instant::now(),
                }
            } else {
                State::Closed {
                    consecutive_failures: failures,
                }
            };
        }
    }

    /// Immediately open the breaker (IP ban).
    pub fn trip(&self) {
        tracing::warn!("provider circuit breaker tripped by ban response");
        *self.lock() = State::Open {
            tripped_at: Instant::now(),
        };
    }
}

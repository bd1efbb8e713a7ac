//! Cooperative pacing for bulk requests against the official API.
//!
//! The neighbours lookup issues one competitor-list request per attended
//! competition. Callers hold a single async lock while they wait out the
//! spacing, so requests leave one at a time. A 429 response doubles the
//! extra delay up to a ceiling; a success halves it again.
//!
//! ```text
//! wait() ──► lock ──► sleep(spacing + backoff + jitter) ──► stamp ──► unlock
//! ```

use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::ClientConfig;

#[derive(Debug)]
struct ThrottleState {
    last_request: Option<Instant>,
    backoff: Duration,
}

/// Shared request pacer.
#[derive(Debug)]
pub struct Throttle {
    spacing: Duration,
    max_backoff: Duration,
    state: Mutex<ThrottleState>,
}

impl Throttle {
    /// Create a throttle with explicit spacing and backoff ceiling.
    pub fn new(spacing: Duration, max_backoff: Duration) -> Self {
        Self {
            spacing,
            max_backoff,
            state: Mutex::new(ThrottleState {
                last_request: None,
                backoff: Duration::ZERO,
            }),
        }
    }

    /// Create a throttle from the neighbour settings in `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Duration::from_millis(config.neighbour_spacing_ms),
            Duration::from_millis(config.neighbour_backoff_max_ms),
        )
    }

    /// Wait until the next request may leave.
    ///
    /// The first call returns immediately.
    pub async fn wait(&self) {
        let mut state = self.state.lock().await;
        if let Some(last) = state.last_request {
            let gap = self.spacing + state.backoff + self.jitter();
            let ready_at = last + gap;
            let now = Instant::now();
            if ready_at > now {
                tracing::trace!(delay_ms = (ready_at - now).as_millis() as u64, "throttling");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        state.last_request = Some(Instant::now());
    }

    /// Grow the backoff after the server signalled rate limiting.
    pub async fn record_rate_limited(&self) {
        let mut state = self.state.lock().await;
        let doubled = if state.backoff.is_zero() {
            self.spacing.max(Duration::from_millis(100))
        } else {
            state.backoff * 2
        };
        state.backoff = doubled.min(self.max_backoff);
        tracing::debug!(backoff_ms = state.backoff.as_millis() as u64, "rate limited; backing off");
    }

    /// Shrink the backoff after a successful request.
    pub async fn record_success(&self) {
        let mut state = self.state.lock().await;
        state.backoff /= 2;
        if state.backoff < Duration::from_millis(10) {
            state.backoff = Duration::ZERO;
        }
    }

    /// Current extra delay on top of the base spacing.
    pub async fn current_backoff(&self) -> Duration {
        self.state.lock().await.backoff
    }

    fn jitter(&self) -> Duration {
        let max = (self.spacing.as_millis() as u64) / 4;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_wait_is_immediate() {
        let throttle = Throttle::new(Duration::from_secs(5), Duration::from_secs(10));
        let started = std::time::Instant::now();
        throttle.wait().await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn second_wait_respects_spacing() {
        let throttle = Throttle::new(Duration::from_millis(40), Duration::from_millis(400));
        throttle.wait().await;
        let started = std::time::Instant::now();
        throttle.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(35));
    }

    #[tokio::test]
    async fn rate_limit_doubles_up_to_ceiling() {
        let throttle = Throttle::new(Duration::from_millis(200), Duration::from_millis(700));
        throttle.record_rate_limited().await;
        assert_eq!(throttle.current_backoff().await, Duration::from_millis(200));
        throttle.record_rate_limited().await;
        assert_eq!(throttle.current_backoff().await, Duration::from_millis(400));
        throttle.record_rate_limited().await;
        assert_eq!(throttle.current_backoff().await, Duration::from_millis(700));
    }

    #[tokio::test]
    async fn zero_spacing_backoff_starts_at_floor() {
        let throttle = Throttle::new(Duration::ZERO, Duration::from_secs(1));
        throttle.record_rate_limited().await;
        assert_eq!(throttle.current_backoff().await, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn success_decays_backoff_to_zero() {
        let throttle = Throttle::new(Duration::from_millis(100), Duration::from_secs(1));
        throttle.record_rate_limited().await;
        for _ in 0..5 {
            throttle.record_success().await;
        }
        assert_eq!(throttle.current_backoff().await, Duration::ZERO);
    }

    #[test]
    fn throttle_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Throttle>();
    }
}

//! Configuration types for the facade.

use std::time::Duration;

use crate::routing_policy::RoutingPolicy;
use serde::{Deserialize, Serialize};

/// Exponential backoff between retries of a transient fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Minimum backoff delay in milliseconds.
    pub min_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor to increase delay after each failure (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_backoff_ms: 500,
            max_backoff_ms: 30_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

impl BackoffConfig {
    /// Delay before retry number `retry` (1-based), without jitter.
    #[must_use]
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 1..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                break;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Bounded retry of transient faults on the same connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first call (total calls = 1 + `max_retries`).
    pub max_retries: u32,
    /// Time budget for retries on one candidate, measured from its first call.
    pub max_retry_elapsed: Duration,
    /// Delay schedule between retries.
    pub backoff: BackoffConfig,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            max_retry_elapsed: Duration::from_secs(10),
            backoff: BackoffConfig::default(),
        }
    }
}

/// Global configuration for the `Vnfin` facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VnfinConfig {
    /// Provider ordering; unknown connector keys are rejected when the facade is built.
    pub routing_policy: RoutingPolicy,
    /// Retry policy for transient faults.
    pub retry: RetryConfig,
    /// Timeout for individual provider calls.
    pub provider_timeout: Duration,
    /// Optional overall deadline applied when the request does not carry its own.
    pub request_timeout: Option<Duration>,
    /// Consecutive schema-drift classifications per (connector, domain) before an alert.
    pub drift_alert_threshold: u32,
}

impl Default for VnfinConfig {
    fn default() -> Self {
        Self {
            routing_policy: RoutingPolicy::default(),
            retry: RetryConfig::default(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
            drift_alert_threshold: 3,
        }
    }
}

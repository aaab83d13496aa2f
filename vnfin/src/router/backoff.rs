use std::time::Duration;

use rand::Rng;
use vnfin_core::BackoffConfig;

/// Delay before retry number `retry` (1-based).
///
/// The capped exponential step from [`BackoffConfig::base_delay_ms`] is
/// stretched by a uniform draw of up to `jitter_percent` percent.
pub fn retry_delay(cfg: &BackoffConfig, retry: u32) -> Duration {
    let base = cfg.base_delay_ms(retry);
    let spread = base.saturating_mul(u64::from(cfg.jitter_percent)) / 100;
    let extra = if spread == 0 {
        0
    } else {
        rand::rng().random_range(0..=spread)
    };
    Duration::from_millis(base.saturating_add(extra))
}

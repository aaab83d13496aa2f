use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use vnfin_core::Domain;

/// Consecutive schema-drift counters per (connector, domain).
///
/// Counters only feed operator alerts; routing never reads them.
#[derive(Debug, Default)]
pub struct DriftTracker {
    counts: Mutex<HashMap<(&'static str, Domain), u32>>,
}

impl DriftTracker {
    /// Bump the counter and return the new streak length.
    pub fn record(&self, connector: &'static str, domain: Domain) -> u32 {
        let mut guard = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let n = guard.entry((connector, domain)).or_insert(0);
        *n = n.saturating_add(1);
        *n
    }

    pub fn reset(&self, connector: &'static str, domain: Domain) {
        let mut guard = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(&(connector, domain));
    }

    pub fn count(&self, connector: &str, domain: Domain) -> u32 {
        let guard = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .iter()
            .find(|((name, d), _)| *name == connector && *d == domain)
            .map_or(0, |(_, n)| *n)
    }
}

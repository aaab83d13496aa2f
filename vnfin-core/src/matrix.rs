//! Which connectors can serve which domain, in priority order.

use std::collections::HashMap;
use std::sync::Arc;

use vnfin_types::{Domain, RoutingPolicy};

use crate::connector::VnConnector;

/// Ordered candidate lists per domain, computed once and immutable after.
#[derive(Clone, Default)]
pub struct CapabilityMatrix {
    candidates: HashMap<Domain, Vec<Arc<dyn VnConnector>>>,
}

impl std::fmt::Debug for CapabilityMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for domain in Domain::ALL {
            if let Some(list) = self.candidates.get(domain) {
                let names: Vec<&str> = list.iter().map(|c| c.name()).collect();
                map.entry(&domain.as_str(), &names);
            }
        }
        map.finish()
    }
}

impl CapabilityMatrix {
    /// Build the matrix from connectors in registration order.
    ///
    /// For each domain, connectors that declare support are ordered by their
    /// policy rank; ties (including every unlisted connector) keep
    /// registration order. Connectors excluded by a strict rule are left out.
    #[must_use]
    pub fn build(connectors: &[Arc<dyn VnConnector>], policy: &RoutingPolicy) -> Self {
        let mut candidates = HashMap::new();
        for &domain in Domain::ALL {
            let mut ranked: Vec<(usize, usize, Arc<dyn VnConnector>)> = connectors
                .iter()
                .enumerate()
                .filter(|(_, c)| c.supports(domain))
                .filter_map(|(idx, c)| {
                    policy
                        .provider_rank(domain, c.name())
                        .map(|rank| (rank, idx, Arc::clone(c)))
                })
                .collect();
            if ranked.is_empty() {
                continue;
            }
            ranked.sort_by_key(|(rank, idx, _)| (*rank, *idx));
            candidates.insert(domain, ranked.into_iter().map(|(_, _, c)| c).collect());
        }
        Self { candidates }
    }

    /// Connectors able to serve `domain`, primary first. Empty when none can.
    #[must_use]
    pub fn candidates(&self, domain: Domain) -> &[Arc<dyn VnConnector>] {
        self.candidates.get(&domain).map_or(&[], Vec::as_slice)
    }

    /// Candidate names for `domain`, primary first.
    #[must_use]
    pub fn candidate_names(&self, domain: Domain) -> Vec<&'static str> {
        self.candidates(domain).iter().map(|c| c.name()).collect()
    }

    /// Whether any connector serves `domain`.
    #[must_use]
    pub fn is_served(&self, domain: Domain) -> bool {
        !self.candidates(domain).is_empty()
    }
}

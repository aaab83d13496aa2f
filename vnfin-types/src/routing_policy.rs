//! Provider ordering policy.
//!
//! A policy holds an optional global ordering plus per-domain rules. The
//! per-domain rule wins when present; otherwise the global ordering applies.
//! A `strict` list excludes every connector it does not name; a non-strict
//! list keeps unlisted connectors eligible after the listed ones, in
//! registration order.
//!
//! Connector names are stored as strings so policies round-trip through
//! serde. The facade rejects names that match no registered connector when
//! it is built.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{ConnectorKey, Domain};

/// Ordered connector names with a strict flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderList {
    providers: Vec<String>,
    /// Exclude connectors that are not listed.
    pub strict: bool,
}

impl ProviderList {
    fn new(list: &[ConnectorKey], strict: bool) -> Self {
        let mut seen = HashSet::new();
        let providers = list
            .iter()
            .map(|k| k.as_str())
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect();
        Self { providers, strict }
    }

    /// Listed connector names, highest priority first.
    #[must_use]
    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    fn rank(&self, name: &str) -> Option<usize> {
        self.providers.iter().position(|p| p == name)
    }

    fn retain_known(&mut self, known: &HashSet<&'static str>) -> Vec<String> {
        let mut missing = Vec::new();
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(self.providers.len());
        for name in self.providers.drain(..) {
            if !known.contains(name.as_str()) {
                missing.push(name);
            } else if seen.insert(name.clone()) {
                kept.push(name);
            }
        }
        self.providers = kept;
        missing
    }
}

/// Global ordering plus per-domain overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    global: Option<ProviderList>,
    rules: BTreeMap<Domain, ProviderList>,
}

impl RoutingPolicy {
    /// The rule in force for `domain`, if any.
    #[must_use]
    pub fn rule_for(&self, domain: Domain) -> Option<&ProviderList> {
        self.rules.get(&domain).or(self.global.as_ref())
    }

    /// Rank of `connector` for `domain`.
    ///
    /// Returns `None` when a strict rule excludes the connector; unlisted
    /// connectors under a non-strict rule rank `usize::MAX`.
    #[must_use]
    pub fn provider_rank(&self, domain: Domain, connector: &str) -> Option<usize> {
        match self.rule_for(domain) {
            Some(list) => match list.rank(connector) {
                Some(rank) => Some(rank),
                None if list.strict => None,
                None => Some(usize::MAX),
            },
            None => Some(usize::MAX),
        }
    }

    /// Set or replace the global ordering.
    pub fn set_global(&mut self, list: &[ConnectorKey], strict: bool) {
        self.global = Some(ProviderList::new(list, strict));
    }

    /// Set or replace the ordering for one domain.
    pub fn set_domain(&mut self, domain: Domain, list: &[ConnectorKey], strict: bool) {
        self.rules.insert(domain, ProviderList::new(list, strict));
    }

    /// Drop connector names that are not in `known` and return them, keyed
    /// by the domain rule they came from (`None` for the global ordering).
    pub fn normalize_and_collect_unknown(
        &mut self,
        known: &HashSet<&'static str>,
    ) -> Vec<(Option<Domain>, Vec<String>)> {
        let mut unknown = Vec::new();
        if let Some(global) = &mut self.global {
            let missing = global.retain_known(known);
            if !missing.is_empty() {
                unknown.push((None, missing));
            }
        }
        for (domain, list) in &mut self.rules {
            let missing = list.retain_known(known);
            if !missing.is_empty() {
                unknown.push((Some(*domain), missing));
            }
        }
        unknown
    }
}

/// Builder for a [`RoutingPolicy`]. Later calls for the same scope overwrite
/// earlier ones.
#[derive(Debug, Clone, Default)]
pub struct RoutingPolicyBuilder {
    policy: RoutingPolicy,
}

impl RoutingPolicyBuilder {
    /// Create a new empty routing policy builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Global ordering; unlisted connectors stay eligible after listed ones.
    #[must_use]
    pub fn providers_global(mut self, list: &[ConnectorKey]) -> Self {
        self.policy.set_global(list, false);
        self
    }

    /// Global ordering with no fallback to unlisted connectors.
    #[must_use]
    pub fn providers_global_strict(mut self, list: &[ConnectorKey]) -> Self {
        self.policy.set_global(list, true);
        self
    }

    /// Ordering for one domain; unlisted connectors stay eligible.
    #[must_use]
    pub fn providers_for_domain(mut self, domain: Domain, list: &[ConnectorKey]) -> Self {
        self.policy.set_domain(domain, list, false);
        self
    }

    /// Ordering for one domain with no fallback to unlisted connectors.
    #[must_use]
    pub fn providers_for_domain_strict(mut self, domain: Domain, list: &[ConnectorKey]) -> Self {
        self.policy.set_domain(domain, list, true);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RoutingPolicy {
        self.policy
    }
}

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use vnfin_core::{
    AdapterFault, Attempt, BackoffConfig, CanonicalTable, CapabilityMatrix, CoerceOptions, Domain,
    Fault, FaultClass, FaultClassifier, RawRows, RequestParams, RetryConfig, RoutingPolicy,
    VnConnector, VnError, VnfinConfig, validate_and_coerce_with,
};

use crate::router::backoff::retry_delay;
use crate::router::drift::DriftTracker;

/// Facade that routes each request across the registered connectors.
pub struct Vnfin {
    pub(crate) connectors: Vec<Arc<dyn VnConnector>>,
    pub(crate) matrix: CapabilityMatrix,
    pub(crate) cfg: VnfinConfig,
    classifier: FaultClassifier,
    drift: DriftTracker,
}

impl std::fmt::Debug for Vnfin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vnfin")
            .field(
                "connectors",
                &self.connectors.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("matrix", &self.matrix)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Vnfin`].
pub struct VnfinBuilder {
    connectors: Vec<Arc<dyn VnConnector>>,
    cfg: VnfinConfig,
}

impl Default for VnfinBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VnfinBuilder {
    /// Create a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: VnfinConfig::default(),
        }
    }

    /// Register a connector. Registration order breaks routing ties.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn VnConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: VnfinConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the routing policy.
    ///
    /// Behavior and trade-offs:
    /// - Per-domain rules win over the global ordering.
    /// - Strict rules drop unlisted connectors for that scope; a domain can end
    ///   up with no candidates and fail with `NoCapableProvider`.
    /// - Unknown connector names make [`build`](Self::build) fail.
    #[must_use]
    pub fn routing_policy(mut self, policy: RoutingPolicy) -> Self {
        self.cfg.routing_policy = policy;
        self
    }

    /// Prefer `connectors`, in order, for one domain (non-strict).
    #[must_use]
    pub fn prefer_for_domain(
        mut self,
        domain: Domain,
        connectors: &[Arc<dyn VnConnector>],
    ) -> Self {
        let keys: Vec<_> = connectors.iter().map(|c| c.key()).collect();
        self.cfg.routing_policy.set_domain(domain, &keys, false);
        self
    }

    /// Set the per-provider call timeout.
    ///
    /// Behavior and trade-offs:
    /// - Lower values fail over faster on slow providers but may cut off large
    ///   payloads (long quote histories, full listings).
    /// - An expired call is a transient `Timeout` fault and is retried.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set a default overall deadline for requests that do not carry their own.
    ///
    /// Behavior and trade-offs:
    /// - Checked before every provider call and every backoff sleep.
    /// - On expiry, remaining candidates are abandoned and the attempts made so
    ///   far are reported in `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the retry policy for transient faults.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Cap retries per candidate (0 disables retrying).
    #[must_use]
    pub const fn max_retries(mut self, n: u32) -> Self {
        self.cfg.retry.max_retries = n;
        self
    }

    /// Configure the delay schedule between retries.
    ///
    /// Behavior and trade-offs:
    /// - Larger delays reduce pressure on a throttling provider but add latency
    ///   before fallback.
    /// - Jitter spreads retries from concurrent callers.
    #[must_use]
    pub const fn backoff(mut self, cfg: BackoffConfig) -> Self {
        self.cfg.retry.backoff = cfg;
        self
    }

    /// Consecutive schema-drift results per (connector, domain) before an
    /// `error`-level alert is logged.
    #[must_use]
    pub const fn drift_alert_threshold(mut self, n: u32) -> Self {
        self.cfg.drift_alert_threshold = n;
        self
    }

    /// Build the `Vnfin` facade.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered, two connectors
    /// share a name, the routing policy names an unknown connector, or the
    /// retry configuration is out of range.
    pub fn build(mut self) -> Result<Vnfin, VnError> {
        if self.connectors.is_empty() {
            return Err(VnError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        let mut known: HashSet<&'static str> = HashSet::new();
        for c in &self.connectors {
            if !known.insert(c.name()) {
                return Err(VnError::InvalidArg(format!(
                    "connector name registered twice: {}",
                    c.name()
                )));
            }
        }

        let unknown = self.cfg.routing_policy.normalize_and_collect_unknown(&known);
        if !unknown.is_empty() {
            let detail = unknown
                .iter()
                .map(|(domain, names)| {
                    let scope = domain.map_or_else(|| "global".to_string(), |d| d.to_string());
                    format!("{scope}: {}", names.join(", "))
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(VnError::InvalidArg(format!(
                "routing policy references unknown connectors ({detail})"
            )));
        }

        let backoff = &self.cfg.retry.backoff;
        if backoff.jitter_percent > 100 {
            return Err(VnError::InvalidArg(
                "backoff jitter_percent must be within 0..=100".to_string(),
            ));
        }
        if backoff.min_backoff_ms > backoff.max_backoff_ms {
            return Err(VnError::InvalidArg(
                "backoff min_backoff_ms must not exceed max_backoff_ms".to_string(),
            ));
        }
        if self.cfg.drift_alert_threshold == 0 {
            return Err(VnError::InvalidArg(
                "drift_alert_threshold must be at least 1".to_string(),
            ));
        }

        let matrix = CapabilityMatrix::build(&self.connectors, &self.cfg.routing_policy);
        Ok(Vnfin {
            connectors: self.connectors,
            matrix,
            cfg: self.cfg,
            classifier: FaultClassifier,
            drift: DriftTracker::default(),
        })
    }
}

/// How one candidate ended.
enum CandidateOutcome {
    Success(CanonicalTable),
    Failed(Attempt),
    /// The overall deadline expired while this candidate was in play.
    Expired(Attempt),
}

impl Vnfin {
    /// Start building a new `Vnfin` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use vnfin::{Domain, RoutingPolicyBuilder, Vnfin};
    ///
    /// // `tcbs_http` / `vci_http` are your transports (`Arc<dyn TcbsApi>`, `Arc<dyn VciApi>`).
    /// let tcbs = Arc::new(vnfin_tcbs::TcbsConnector::with_api(tcbs_http));
    /// let vci = Arc::new(vnfin_vci::VciConnector::with_api(vci_http));
    ///
    /// let policy = RoutingPolicyBuilder::new()
    ///     .providers_global(&[vci.key(), tcbs.key()])
    ///     .providers_for_domain_strict(Domain::GoldPrice, &[vci.key()])
    ///     .build();
    ///
    /// let vnfin = Vnfin::builder()
    ///     .with_connector(tcbs)
    ///     .with_connector(vci)
    ///     .routing_policy(policy)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> VnfinBuilder {
        VnfinBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &VnfinConfig {
        &self.cfg
    }

    /// Capability matrix computed at build time.
    #[must_use]
    pub const fn matrix(&self) -> &CapabilityMatrix {
        &self.matrix
    }

    /// Candidate connector names for `domain`, primary first.
    #[must_use]
    pub fn candidates(&self, domain: Domain) -> Vec<&'static str> {
        self.matrix.candidate_names(domain)
    }

    /// Current consecutive schema-drift streak for a (connector, domain) pair.
    #[must_use]
    pub fn drift_count(&self, connector: &str, domain: Domain) -> u32 {
        self.drift.count(connector, domain)
    }

    /// Fetch one canonical table for `domain`.
    ///
    /// Candidates are tried in capability-matrix order and the first result
    /// that passes validation wins; results are never merged. Transient faults
    /// are retried on the same connector with backoff, every other class moves
    /// on to the next candidate.
    ///
    /// # Errors
    /// - `InvalidArg` when `params` do not fit the domain (missing symbol).
    /// - `NoCapableProvider` when no connector serves the domain.
    /// - `AllProvidersFailed` with one attempt per candidate when all fail.
    /// - `RequestTimeout` when the request deadline expires first.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "vnfin::core::get",
            skip(self, params),
            fields(domain = %domain, symbol = ?params.symbol),
        )
    )]
    pub async fn get(
        &self,
        domain: Domain,
        params: &RequestParams,
    ) -> Result<CanonicalTable, VnError> {
        params.validate_for(domain)?;

        let candidates = self.matrix.candidates(domain);
        if candidates.is_empty() {
            return Err(VnError::NoCapableProvider { domain });
        }

        let deadline = params
            .deadline
            .or(self.cfg.request_timeout)
            .map(|d| Instant::now() + d);
        let opts = CoerceOptions::for_params(params);
        let mut attempts: Vec<Attempt> = Vec::with_capacity(candidates.len());

        for c in candidates {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(VnError::request_timeout(domain, attempts));
            }
            match self.try_candidate(c, domain, params, opts, deadline).await {
                CandidateOutcome::Success(table) => {
                    self.drift.reset(c.name(), domain);
                    return Ok(table);
                }
                CandidateOutcome::Failed(attempt) => {
                    self.track_drift(c.name(), domain, &attempt);
                    attempts.push(attempt);
                }
                CandidateOutcome::Expired(attempt) => {
                    self.track_drift(c.name(), domain, &attempt);
                    attempts.push(attempt);
                    return Err(VnError::request_timeout(domain, attempts));
                }
            }
        }

        Err(VnError::all_failed(domain, attempts))
    }

    /// Call one candidate until it succeeds, fails for good, or runs out of
    /// retry budget.
    async fn try_candidate(
        &self,
        c: &Arc<dyn VnConnector>,
        domain: Domain,
        params: &RequestParams,
        opts: CoerceOptions,
        deadline: Option<Instant>,
    ) -> CandidateOutcome {
        let retry = self.cfg.retry;
        let started = Instant::now();
        let mut tries: u32 = 0;

        loop {
            tries += 1;
            let now = Instant::now();
            let mut timeout = self.cfg.provider_timeout;
            let mut bounded_by_deadline = false;
            if let Some(d) = deadline {
                let left = d.saturating_duration_since(now);
                if left <= timeout {
                    timeout = left;
                    bounded_by_deadline = true;
                }
            }

            let fault: Fault = match Self::provider_call_with_timeout(
                c.name(),
                domain,
                timeout,
                c.fetch(domain, params),
            )
            .await
            {
                Ok(raw) => match validate_and_coerce_with(domain, &raw, opts) {
                    Ok(table) => return CandidateOutcome::Success(table),
                    Err(v) => v.into(),
                },
                Err(f) => f.into(),
            };

            let classification = self.classifier.classify(&fault);
            let attempt = Attempt {
                connector: c.name().to_string(),
                classification,
                fault,
                tries,
            };

            if deadline.is_some_and(|d| Instant::now() >= d) && bounded_by_deadline {
                return CandidateOutcome::Expired(attempt);
            }
            if !classification.is_retryable() || tries > retry.max_retries {
                return CandidateOutcome::Failed(attempt);
            }

            let delay = retry_delay(&retry.backoff, tries);
            if started.elapsed() + delay > retry.max_retry_elapsed {
                return CandidateOutcome::Failed(attempt);
            }
            if deadline.is_some_and(|d| Instant::now() + delay >= d) {
                return CandidateOutcome::Expired(attempt);
            }

            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "vnfin::router",
                connector = c.name(),
                domain = %domain,
                retry = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                fault = %attempt.fault,
                "transient fault; retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Wrap a provider future with a timeout that surfaces as a `Timeout` fault.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "vnfin::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                domain = %domain,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<Fut>(
        connector_name: &'static str,
        domain: Domain,
        timeout: Duration,
        fut: Fut,
    ) -> Result<RawRows, AdapterFault>
    where
        Fut: core::future::Future<Output = Result<RawRows, AdapterFault>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(AdapterFault::timeout(format!(
                "{connector_name} did not answer {domain} within {} ms",
                timeout.as_millis()
            )))
        })
    }

    fn track_drift(&self, connector: &'static str, domain: Domain, attempt: &Attempt) {
        if attempt.classification != FaultClass::SchemaDrift {
            return;
        }
        let streak = self.drift.record(connector, domain);
        #[cfg(feature = "tracing")]
        {
            if streak >= self.cfg.drift_alert_threshold {
                tracing::error!(
                    target: "vnfin::drift",
                    connector,
                    domain = %domain,
                    consecutive = streak,
                    fault = %attempt.fault,
                    "schema drift alert: provider payload no longer matches the canonical schema"
                );
            } else {
                tracing::warn!(
                    target: "vnfin::drift",
                    connector,
                    domain = %domain,
                    consecutive = streak,
                    fault = %attempt.fault,
                    "schema drift"
                );
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = streak;
    }
}

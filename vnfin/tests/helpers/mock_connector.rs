#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use vnfin::{AdapterFault, Domain, RawRows, RequestParams, VnConnector};

/// In-memory connector used by router tests.
///
/// Serves the listed domains through `fetch_fn`, or through `script`
/// (one entry per call, last entry sticky) when set.
pub struct MockConnector {
    pub name: &'static str,
    pub domains: Vec<Domain>,
    pub delay_ms: u64,
    pub fetch_fn:
        Option<Arc<dyn Fn(Domain, &RequestParams) -> Result<RawRows, AdapterFault> + Send + Sync>>,
    pub script: Option<Arc<Mutex<VecDeque<Result<RawRows, AdapterFault>>>>>,
    pub calls: Arc<AtomicUsize>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            domains: Vec::new(),
            delay_ms: 0,
            fetch_fn: None,
            script: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockConnector {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VnConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Test"
    }

    fn supports(&self, domain: Domain) -> bool {
        self.domains.contains(&domain)
    }

    async fn fetch(&self, domain: Domain, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(script) = &self.script {
            let mut guard = script.lock().await;
            let next = if guard.len() > 1 {
                guard.pop_front()
            } else {
                guard.front().cloned()
            };
            return next.unwrap_or_else(|| Err(AdapterFault::unsupported(domain)));
        }
        match &self.fetch_fn {
            Some(f) => f(domain, params),
            None => Err(AdapterFault::unsupported(domain)),
        }
    }
}

/// Connector answering `domain` with fixed raw rows.
pub fn m_rows(name: &'static str, domain: Domain, rows: RawRows) -> Arc<MockConnector> {
    Arc::new(MockConnector {
        name,
        domains: vec![domain],
        fetch_fn: Some(Arc::new(move |_, _| Ok(rows.clone()))),
        ..Default::default()
    })
}

/// Connector failing every `domain` call with `fault`.
pub fn m_fail(name: &'static str, domain: Domain, fault: AdapterFault) -> Arc<MockConnector> {
    Arc::new(MockConnector {
        name,
        domains: vec![domain],
        fetch_fn: Some(Arc::new(move |_, _| Err(fault.clone()))),
        ..Default::default()
    })
}

/// Connector replaying `steps` in order; the last step repeats.
pub fn m_seq(
    name: &'static str,
    domain: Domain,
    steps: Vec<Result<RawRows, AdapterFault>>,
) -> Arc<MockConnector> {
    Arc::new(MockConnector {
        name,
        domains: vec![domain],
        script: Some(Arc::new(Mutex::new(steps.into()))),
        ..Default::default()
    })
}

/// Connector that never answers within a reasonable time.
pub fn m_slow(
    name: &'static str,
    domain: Domain,
    delay_ms: u64,
    rows: RawRows,
) -> Arc<MockConnector> {
    Arc::new(MockConnector {
        name,
        domains: vec![domain],
        delay_ms,
        fetch_fn: Some(Arc::new(move |_, _| Ok(rows.clone()))),
        ..Default::default()
    })
}

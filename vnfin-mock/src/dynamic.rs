use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vnfin_core::{AdapterFault, Domain, RawRows, RequestParams, VnConnector};

/// Instruction for how one fetch call should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided rows immediately.
    Return(RawRows),
    /// Fail immediately with the provided fault.
    Fail(AdapterFault),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    // Each call pops the front behavior; the last one is sticky.
    scripts: HashMap<Domain, VecDeque<MockBehavior>>,
    calls: HashMap<Domain, Vec<RequestParams>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Always behave the same way for `domain`.
    pub async fn set_behavior(&self, domain: Domain, behavior: MockBehavior) {
        self.set_script(domain, vec![behavior]).await;
    }

    /// Behave per call, in order; the final entry repeats.
    pub async fn set_script(&self, domain: Domain, script: Vec<MockBehavior>) {
        let mut guard = self.state.lock().await;
        guard.scripts.insert(domain, script.into());
    }

    /// Number of fetch calls seen for `domain`.
    pub async fn call_count(&self, domain: Domain) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(&domain).map_or(0, Vec::len)
    }

    /// Parameters of every fetch call for `domain`, in order.
    pub async fn requests(&self, domain: Domain) -> Vec<RequestParams> {
        let guard = self.state.lock().await;
        guard.calls.get(&domain).cloned().unwrap_or_default()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.scripts.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Domains without a script fail with an `Unsupported` fault.
pub struct DynamicMockConnector {
    name: &'static str,
    domains: Vec<Domain>,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a connector claiming `domains`, and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
        domains: &[Domain],
    ) -> (Arc<dyn VnConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let connector = Arc::new(Self {
            name,
            domains: domains.to_vec(),
            state,
        });
        (connector, controller)
    }
}

#[async_trait]
impl VnConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports(&self, domain: Domain) -> bool {
        self.domains.contains(&domain)
    }

    async fn fetch(&self, domain: Domain, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.entry(domain).or_default().push(params.clone());
            guard.scripts.get_mut(&domain).and_then(|script| {
                if script.len() > 1 {
                    script.pop_front()
                } else {
                    script.front().cloned()
                }
            })
        };
        match behavior {
            Some(MockBehavior::Return(rows)) => Ok(rows),
            Some(MockBehavior::Fail(fault)) => Err(fault),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                Err(AdapterFault::timeout("unreachable"))
            }
            None => Err(AdapterFault::unsupported(domain)),
        }
    }
}

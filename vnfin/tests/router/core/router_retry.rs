use std::time::Duration;

use vnfin::{
    AdapterFault, BackoffConfig, Domain, FaultClass, RetryConfig, Vnfin, VnError,
};

use crate::helpers::{VCB, m_fail, m_rows, m_seq, shareholder_rows};

fn fast_backoff() -> BackoffConfig {
    BackoffConfig {
        min_backoff_ms: 100,
        max_backoff_ms: 1_000,
        factor: 2,
        jitter_percent: 0,
    }
}

#[tokio::test(start_paused = true)]
async fn transient_faults_are_retried_on_the_same_connector() {
    let a = m_seq(
        "a",
        Domain::Shareholders,
        vec![
            Err(AdapterFault::http(503, "busy")),
            Err(AdapterFault::rate_limited("slow down")),
            Ok(shareholder_rows()),
        ],
    );
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .backoff(fast_backoff())
        .build()
        .unwrap();

    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(holders.len(), 2);
    assert_eq!(a.calls(), 3);
    assert_eq!(b.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn retries_are_bounded_then_fallback() {
    let a = m_fail("a", Domain::Shareholders, AdapterFault::network("connection reset"));
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .max_retries(2)
        .backoff(fast_backoff())
        .build()
        .unwrap();

    vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(a.calls(), 3, "one call plus two retries");
    assert_eq!(b.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_transient_attempt_records_tries() {
    let a = m_fail("a", Domain::Shareholders, AdapterFault::http(502, "bad gateway"));

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .max_retries(1)
        .backoff(fast_backoff())
        .build()
        .unwrap();

    let err = vnfin.shareholders(VCB).await.unwrap_err();
    let VnError::AllProvidersFailed { attempts, .. } = err else {
        panic!("expected AllProvidersFailed");
    };
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].classification, FaultClass::Transient);
    assert_eq!(attempts[0].tries, 2);
}

#[tokio::test]
async fn non_transient_faults_are_not_retried() {
    for fault in [
        AdapterFault::not_found("none"),
        AdapterFault::malformed("no data key"),
        AdapterFault::http(403, "forbidden"),
    ] {
        let a = m_fail("a", Domain::Shareholders, fault.clone());
        let vnfin = Vnfin::builder().with_connector(a.clone()).build().unwrap();
        let _ = vnfin.shareholders(VCB).await.unwrap_err();
        assert_eq!(a.calls(), 1, "{fault}");
    }
}

#[tokio::test(start_paused = true)]
async fn retry_budget_limits_retries() {
    let a = m_fail("a", Domain::Shareholders, AdapterFault::timeout("slow"));

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .retry(RetryConfig {
            max_retries: 5,
            max_retry_elapsed: Duration::from_millis(250),
            backoff: fast_backoff(),
        })
        .build()
        .unwrap();

    let _ = vnfin.shareholders(VCB).await.unwrap_err();
    // Delays of 100 ms then 200 ms: the second would overrun the 250 ms budget.
    assert_eq!(a.calls(), 2);
}

#[tokio::test]
async fn zero_retries_disables_retrying() {
    let a = m_fail("a", Domain::Shareholders, AdapterFault::http(500, "oops"));
    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .max_retries(0)
        .build()
        .unwrap();

    let err = vnfin.shareholders(VCB).await.unwrap_err();
    assert_eq!(a.calls(), 1);
    assert_eq!(err.attempts()[0].tries, 1);
}

use std::time::Duration;

use vnfin::{AdapterFaultKind, Domain, Fault, FaultClass, RequestParams, Vnfin, VnError};

use crate::helpers::{VCB, m_rows, m_slow, shareholder_rows};

#[tokio::test(start_paused = true)]
async fn provider_timeout_is_transient_and_falls_back() {
    let slow = m_slow("slow", Domain::Shareholders, 60_000, shareholder_rows());
    let fast = m_rows("fast", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(slow.clone())
        .with_connector(fast.clone())
        .provider_timeout(Duration::from_millis(200))
        .max_retries(0)
        .build()
        .unwrap();

    vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(slow.calls(), 1);
    assert_eq!(fast.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn request_deadline_abandons_remaining_candidates() {
    let slow = m_slow("slow", Domain::Shareholders, 60_000, shareholder_rows());
    let fast = m_rows("fast", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(slow.clone())
        .with_connector(fast.clone())
        .provider_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let params = RequestParams::for_symbol(VCB).deadline(Duration::from_secs(1));
    let err = vnfin.get(Domain::Shareholders, &params).await.unwrap_err();

    let VnError::RequestTimeout { domain, attempts } = err else {
        panic!("expected RequestTimeout, got {err:?}");
    };
    assert_eq!(domain, Domain::Shareholders);
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].connector, "slow");
    assert_eq!(attempts[0].classification, FaultClass::Transient);
    assert!(matches!(
        &attempts[0].fault,
        Fault::Adapter(f) if f.kind == AdapterFaultKind::Timeout
    ));
    assert_eq!(fast.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn configured_request_timeout_applies_without_params_deadline() {
    let slow = m_slow("slow", Domain::Shareholders, 60_000, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(slow)
        .request_timeout(Duration::from_millis(500))
        .build()
        .unwrap();

    let err = vnfin.shareholders(VCB).await.unwrap_err();
    assert!(matches!(err, VnError::RequestTimeout { .. }));
}

#[tokio::test(start_paused = true)]
async fn backoff_that_would_overrun_the_deadline_stops_early() {
    let a = crate::helpers::m_fail(
        "a",
        Domain::Shareholders,
        vnfin::AdapterFault::http(503, "busy"),
    );

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .backoff(vnfin::BackoffConfig {
            min_backoff_ms: 2_000,
            max_backoff_ms: 5_000,
            factor: 2,
            jitter_percent: 0,
        })
        .build()
        .unwrap();

    let params = RequestParams::for_symbol(VCB).deadline(Duration::from_secs(1));
    let err = vnfin.get(Domain::Shareholders, &params).await.unwrap_err();
    assert!(matches!(err, VnError::RequestTimeout { .. }));
    assert_eq!(err.attempts().len(), 1);
    assert_eq!(a.calls(), 1);
}

use vnfin::{BackoffConfig, ConnectorKey, Domain, RoutingPolicyBuilder, Vnfin, VnError};

use crate::helpers::{m_rows, shareholder_rows};

#[test]
fn build_requires_a_connector() {
    let err = Vnfin::builder().build().unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));
}

#[test]
fn build_rejects_unknown_routing_keys() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let policy = RoutingPolicyBuilder::new()
        .providers_for_domain(Domain::Shareholders, &[ConnectorKey::new("ghost")])
        .build();

    let err = Vnfin::builder()
        .with_connector(a)
        .routing_policy(policy)
        .build()
        .unwrap_err();
    let VnError::InvalidArg(msg) = err else {
        panic!("expected InvalidArg");
    };
    assert!(msg.contains("ghost"), "{msg}");
    assert!(msg.contains("shareholders"), "{msg}");
}

#[test]
fn build_rejects_duplicate_connector_names() {
    let a1 = m_rows("a", Domain::Shareholders, shareholder_rows());
    let a2 = m_rows("a", Domain::Officers, shareholder_rows());
    let err = Vnfin::builder()
        .with_connector(a1)
        .with_connector(a2)
        .build()
        .unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));
}

#[test]
fn build_rejects_inverted_backoff_bounds() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let err = Vnfin::builder()
        .with_connector(a)
        .backoff(BackoffConfig {
            min_backoff_ms: 5_000,
            max_backoff_ms: 100,
            factor: 2,
            jitter_percent: 0,
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));
}

#[test]
fn build_rejects_zero_drift_threshold() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let err = Vnfin::builder()
        .with_connector(a)
        .drift_alert_threshold(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));
}

#[test]
fn config_round_trips_through_builder() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let vnfin = Vnfin::builder()
        .with_connector(a)
        .provider_timeout(std::time::Duration::from_secs(2))
        .max_retries(4)
        .drift_alert_threshold(5)
        .build()
        .unwrap();

    let cfg = vnfin.config();
    assert_eq!(cfg.provider_timeout, std::time::Duration::from_secs(2));
    assert_eq!(cfg.retry.max_retries, 4);
    assert_eq!(cfg.drift_alert_threshold, 5);
    assert!(vnfin.matrix().is_served(Domain::Shareholders));
    assert!(!vnfin.matrix().is_served(Domain::GoldPrice));
}

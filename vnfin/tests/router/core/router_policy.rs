use vnfin::{Domain, RoutingPolicyBuilder, Vnfin, VnConnector, VnError};

use crate::helpers::{VCB, m_rows, shareholder_rows};

#[tokio::test]
async fn strict_domain_rule_excludes_unlisted_connectors() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let policy = RoutingPolicyBuilder::new()
        .providers_for_domain_strict(Domain::Shareholders, &[b.key()])
        .build();
    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .routing_policy(policy)
        .build()
        .unwrap();

    assert_eq!(vnfin.candidates(Domain::Shareholders), vec!["b"]);
    vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(a.calls(), 0);
}

#[tokio::test]
async fn strict_rule_can_leave_a_domain_without_candidates() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let b = m_rows("b", Domain::Officers, shareholder_rows());

    let policy = RoutingPolicyBuilder::new()
        .providers_for_domain_strict(Domain::Shareholders, &[b.key()])
        .build();
    let vnfin = Vnfin::builder()
        .with_connector(a)
        .with_connector(b)
        .routing_policy(policy)
        .build()
        .unwrap();

    let err = vnfin.shareholders(VCB).await.unwrap_err();
    assert!(matches!(err, VnError::NoCapableProvider { .. }));
}

#[tokio::test]
async fn domain_rule_wins_over_global_order() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());
    let c = m_rows("c", Domain::Shareholders, shareholder_rows());

    let policy = RoutingPolicyBuilder::new()
        .providers_global(&[c.key(), b.key(), a.key()])
        .providers_for_domain(Domain::Shareholders, &[a.key()])
        .build();
    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .with_connector(c.clone())
        .routing_policy(policy)
        .build()
        .unwrap();

    // Listed first, then the rest in registration order.
    assert_eq!(vnfin.candidates(Domain::Shareholders), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn prefer_for_domain_reorders_candidates() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());
    let b_dyn: std::sync::Arc<dyn VnConnector> = b.clone();

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .prefer_for_domain(Domain::Shareholders, &[b_dyn])
        .build()
        .unwrap();

    assert_eq!(vnfin.candidates(Domain::Shareholders), vec!["b", "a"]);
}

use vnfin::{
    AdapterFault, Domain, FaultClass, RequestParams, RoutingPolicyBuilder, Vnfin, VnConnector,
    VnError,
};

use crate::helpers::{VCB, drifted_shareholder_rows, m_fail, m_rows, shareholder_rows};

#[tokio::test]
async fn unsupported_primary_falls_back_without_merging() {
    let a = m_fail("a", Domain::Shareholders, AdapterFault::not_found("no data for VCB"));
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .build()
        .unwrap();

    let table = vnfin
        .get(Domain::Shareholders, &RequestParams::for_symbol(VCB))
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(a.calls(), 1, "unsupported is not retried");
    assert_eq!(b.calls(), 1);
}

#[tokio::test]
async fn first_valid_result_wins() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .build()
        .unwrap();

    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(holders.len(), 2);
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 0, "later candidates are never consulted after a success");
}

#[tokio::test]
async fn invalid_payload_advances_to_next_candidate() {
    let a = m_rows("a", Domain::Shareholders, drifted_shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .build()
        .unwrap();

    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(holders[0].shareholder_name, "State Bank of Vietnam");
    assert_eq!(a.calls(), 1, "schema drift is not retried");
}

#[tokio::test]
async fn exhaustion_reports_one_attempt_per_candidate() {
    let a = m_fail("a", Domain::Shareholders, AdapterFault::unauthorized("token expired"));
    let b = m_rows("b", Domain::Shareholders, drifted_shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let err = vnfin.shareholders(VCB).await.unwrap_err();
    let VnError::AllProvidersFailed { domain, attempts } = &err else {
        panic!("expected AllProvidersFailed, got {err:?}");
    };
    assert_eq!(*domain, Domain::Shareholders);
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].connector, "a");
    assert_eq!(attempts[0].classification, FaultClass::PermanentOutage);
    assert_eq!(attempts[1].connector, "b");
    assert_eq!(attempts[1].classification, FaultClass::SchemaDrift);
    assert!(err.is_schema_drift());
    assert!(!err.is_no_data());
}

#[tokio::test]
async fn no_data_anywhere_is_distinguishable() {
    let a = m_fail("a", Domain::Officers, AdapterFault::not_found("XYZ"));
    let b = m_fail("b", Domain::Officers, AdapterFault::empty("[]"));

    let vnfin = Vnfin::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let err = vnfin.officers("XYZ").await.unwrap_err();
    assert_eq!(err.attempts().len(), 2);
    assert!(err.is_no_data());
    assert!(!err.is_actionable());
}

#[tokio::test]
async fn no_capable_provider() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let vnfin = Vnfin::builder().with_connector(a.clone()).build().unwrap();

    let err = vnfin.gold_price(None).await.unwrap_err();
    assert!(matches!(
        err,
        VnError::NoCapableProvider {
            domain: Domain::GoldPrice
        }
    ));
    assert_eq!(a.calls(), 0);
}

#[tokio::test]
async fn missing_symbol_is_rejected_before_any_call() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let vnfin = Vnfin::builder().with_connector(a.clone()).build().unwrap();

    let err = vnfin
        .get(Domain::Shareholders, &RequestParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));

    let err = vnfin.shareholders("  ").await.unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));
    assert_eq!(a.calls(), 0);
}

#[tokio::test]
async fn policy_order_overrides_registration_order() {
    let a = m_rows("a", Domain::Shareholders, shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let policy = RoutingPolicyBuilder::new()
        .providers_for_domain(Domain::Shareholders, &[b.key(), a.key()])
        .build();
    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .routing_policy(policy)
        .build()
        .unwrap();

    assert_eq!(vnfin.candidates(Domain::Shareholders), vec!["b", "a"]);
    vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(b.calls(), 1);
    assert_eq!(a.calls(), 0);
}

use std::sync::Arc;

use serde_json::json;
use vnfin::{
    Domain, FaultClass, Interval, RequestParams, RoutingPolicyBuilder, VnError, VnConnector, Vnfin,
};
use vnfin_tcbs::{TcbsApi, TcbsConnector};
use vnfin_vci::{VciApi, VciConnector};

use crate::helpers::VCB;

fn tcbs_holders(own_percent: serde_json::Value) -> Arc<TcbsConnector> {
    Arc::new(TcbsConnector::with_api(<dyn TcbsApi>::from_fn(move |_, _| {
        Ok(json!({
            "listShareHolder": [
                {"name": "State Bank of Vietnam", "ownPercent": own_percent.clone(), "quantity": 4_180_000_000_u64},
                {"name": "Mizuho Bank", "ownPercent": 0.15}
            ]
        }))
    })))
}

fn vci_holders() -> Arc<VciConnector> {
    Arc::new(VciConnector::with_api(<dyn VciApi>::from_fn(|path, _| {
        match path {
            "company/shareholders" => Ok(json!({
                "data": [
                    {"ownerFullName": "State Bank of Vietnam", "percentage": 74.8},
                    {"ownerFullName": "Mizuho Bank", "percentage": 15.0}
                ]
            })),
            _ => Ok(json!({"data": []})),
        }
    })))
}

#[tokio::test]
async fn both_providers_agree_on_canonical_percentages() {
    let from_tcbs = Vnfin::builder()
        .with_connector(tcbs_holders(json!(0.748)))
        .build()
        .unwrap()
        .shareholders(VCB)
        .await
        .unwrap();
    let from_vci = Vnfin::builder()
        .with_connector(vci_holders())
        .build()
        .unwrap()
        .shareholders(VCB)
        .await
        .unwrap();

    assert_eq!(from_tcbs.len(), from_vci.len());
    for (a, b) in from_tcbs.iter().zip(&from_vci) {
        assert_eq!(a.shareholder_name, b.shareholder_name);
        assert!((a.ownership_percentage - b.ownership_percentage).abs() < 1e-9);
    }
}

#[tokio::test]
async fn tcbs_value_drift_falls_back_to_vci() {
    let tcbs = tcbs_holders(json!("n/a"));
    let vci = vci_holders();
    let policy = RoutingPolicyBuilder::new()
        .providers_global(&[TcbsConnector::KEY, VciConnector::KEY])
        .build();
    let vnfin = Vnfin::builder()
        .with_connector(tcbs)
        .with_connector(vci)
        .routing_policy(policy)
        .build()
        .unwrap();

    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(holders[0].ownership_percentage, 74.8);
    assert_eq!(vnfin.drift_count("vnfin-tcbs", Domain::Shareholders), 1);
}

#[tokio::test]
async fn renamed_container_on_every_provider_is_schema_drift() {
    let tcbs = Arc::new(TcbsConnector::with_api(<dyn TcbsApi>::from_fn(|_, _| {
        Ok(json!({"shareHolders": []}))
    })));
    let vci = Arc::new(VciConnector::with_api(<dyn VciApi>::from_fn(|_, _| {
        Ok(json!({"rows": []}))
    })));
    let vnfin = Vnfin::builder()
        .with_connector(tcbs)
        .with_connector(vci)
        .build()
        .unwrap();

    let err = vnfin.shareholders(VCB).await.unwrap_err();
    assert!(err.is_schema_drift());
    match &err {
        VnError::AllProvidersFailed { attempts, .. } => {
            assert_eq!(attempts.len(), 2);
            assert!(
                attempts
                    .iter()
                    .all(|a| a.classification == FaultClass::SchemaDrift)
            );
        }
        other => panic!("expected AllProvidersFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn weekly_bars_skip_vci_and_use_tcbs() {
    let vci = Arc::new(VciConnector::with_api(<dyn VciApi>::from_fn(|_, _| {
        panic!("VCI has no weekly frame and must not be called")
    })));
    let tcbs = Arc::new(TcbsConnector::with_api(<dyn TcbsApi>::from_fn(|path, query| {
        assert_eq!(path, "stock-insight/v1/stock/bars-long-term");
        assert!(query.iter().any(|(k, v)| *k == "resolution" && v == "W"));
        Ok(json!({
            "data": [
                {"open": 84.1, "high": 88.0, "low": 83.0, "close": 87.5, "volume": 9_000_000, "tradingDate": "2024-01-08T00:00:00.000Z"}
            ]
        }))
    })));
    let vnfin = Vnfin::builder()
        .with_connector(vci.clone())
        .with_connector(tcbs.clone())
        .routing_policy(
            RoutingPolicyBuilder::new()
                .providers_for_domain(Domain::QuoteHistory, &[vci.key(), tcbs.key()])
                .build(),
        )
        .build()
        .unwrap();

    let bars = vnfin.quote_history(VCB, Interval::W1, None).await.unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].close, 87.5);
}

#[tokio::test]
async fn reference_domains_route_only_to_vci() {
    let tcbs = Arc::new(TcbsConnector::with_api(<dyn TcbsApi>::from_fn(|_, _| {
        Ok(json!({}))
    })));
    let vci = Arc::new(VciConnector::with_api(<dyn VciApi>::from_fn(|path, _| {
        assert_eq!(path, "commodity/gold");
        Ok(json!({"data": [{"name": "SJC", "buyPrice": "75,000,000", "sellPrice": "77,000,000", "date": "2024-01-02"}]}))
    })));
    let vnfin = Vnfin::builder()
        .with_connector(tcbs)
        .with_connector(vci)
        .build()
        .unwrap();

    assert_eq!(vnfin.candidates(Domain::GoldPrice), vec!["vnfin-vci"]);
    assert_eq!(vnfin.candidates(Domain::InsiderDeals), vec!["vnfin-tcbs"]);
    let table = vnfin
        .get(Domain::GoldPrice, &RequestParams::new())
        .await
        .unwrap();
    assert_eq!(table.len(), 1);
}

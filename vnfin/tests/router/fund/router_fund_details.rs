use std::sync::Arc;

use serde_json::json;
use vnfin::{AdapterFault, Domain, RawRows, Vnfin, VnError};
use vnfin_mock::{DynamicMockConnector, MockBehavior, MockConnector};

use crate::helpers::VFM;

#[tokio::test]
async fn fund_details_composes_all_sections() {
    let vnfin = Vnfin::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let details = vnfin.fund_details(VFM).await.unwrap();
    assert_eq!(details.symbol, VFM);
    assert!(!details.nav_report.is_empty());
    assert!(!details.top_holding.is_empty());
    assert!(!details.industry_holding.is_empty());
    assert!(!details.asset_holding.is_empty());
    assert_eq!(details.asset_holding.domain(), Domain::FundAssetHolding);
}

#[tokio::test]
async fn unsupplied_sections_are_explicitly_empty() {
    let (fund, ctl) = DynamicMockConnector::new_with_controller(
        "funds",
        &[Domain::FundNavReport, Domain::FundTopHolding, Domain::FundIndustryHolding],
    );
    ctl.set_behavior(
        Domain::FundNavReport,
        MockBehavior::Return(RawRows::from_values([
            json!({"date": "2024-01-02", "nav": 25.1}),
        ])),
    )
    .await;
    ctl.set_behavior(
        Domain::FundTopHolding,
        MockBehavior::Return(RawRows::from_values([
            json!({"name": "VCB", "percentage": 9.8, "date": "2024-01-31"}),
        ])),
    )
    .await;
    ctl.set_behavior(
        Domain::FundIndustryHolding,
        MockBehavior::Fail(AdapterFault::not_found("no industry allocation")),
    )
    .await;

    let vnfin = Vnfin::builder().with_connector(fund).build().unwrap();
    let details = vnfin.fund_details(VFM).await.unwrap();

    assert_eq!(details.nav_report.len(), 1);
    assert_eq!(details.top_holding.len(), 1);
    // every attempt said "no data"
    assert!(details.industry_holding.is_empty());
    assert_eq!(details.industry_holding.domain(), Domain::FundIndustryHolding);
    // nobody claims asset holdings
    assert!(details.asset_holding.is_empty());
    assert!(
        details
            .asset_holding
            .columns()
            .iter()
            .any(|c| c == "percentage")
    );
    assert!(!details.is_empty());

    assert_eq!(ctl.call_count(Domain::FundNavReport).await, 1);
    let requests = ctl.requests(Domain::FundTopHolding).await;
    assert_eq!(requests[0].symbol.as_deref(), Some(VFM));
}

#[tokio::test]
async fn real_section_failures_surface() {
    let (fund, ctl) = DynamicMockConnector::new_with_controller(
        "funds",
        &[Domain::FundNavReport, Domain::FundTopHolding],
    );
    ctl.set_behavior(
        Domain::FundNavReport,
        MockBehavior::Return(RawRows::from_values([json!({"ngay": "2024-01-02"})])),
    )
    .await;

    let vnfin = Vnfin::builder().with_connector(fund).build().unwrap();
    let err = vnfin.fund_details(VFM).await.unwrap_err();
    assert!(err.is_schema_drift(), "{err}");
}

#[tokio::test]
async fn fund_details_requires_a_symbol() {
    let vnfin = Vnfin::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let err = vnfin.fund_details("").await.unwrap_err();
    assert!(matches!(err, VnError::InvalidArg(_)));
}

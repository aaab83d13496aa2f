use serde_json::json;
use vnfin::{Domain, FaultClass, FundType, RawRows, Vnfin, VnError};

use crate::helpers::{VFM, m_rows};

fn industry_rows(percentages: &[f64]) -> RawRows {
    RawRows::from_values(percentages.iter().enumerate().map(|(i, p)| {
        json!({"name": format!("Industry {i}"), "percentage": p, "date": "2024-01-31"})
    }))
}

#[tokio::test]
async fn industry_holding_summing_to_at_most_100_is_accepted() {
    let a = m_rows("a", Domain::FundIndustryHolding, industry_rows(&[60.0, 40.0]));
    let vnfin = Vnfin::builder().with_connector(a).build().unwrap();

    let rows = vnfin.fund_industry_holding(VFM).await.unwrap();
    assert_eq!(rows.len(), 2);
    let total: f64 = rows.iter().map(|r| r.percentage).sum();
    assert!(total <= 100.0);
}

#[tokio::test]
async fn industry_holding_summing_above_100_is_rejected() {
    let a = m_rows("a", Domain::FundIndustryHolding, industry_rows(&[60.0, 45.0]));
    let vnfin = Vnfin::builder().with_connector(a).build().unwrap();

    let err = vnfin.fund_industry_holding(VFM).await.unwrap_err();
    let VnError::AllProvidersFailed { attempts, .. } = &err else {
        panic!("expected AllProvidersFailed, got {err:?}");
    };
    assert_eq!(attempts[0].classification, FaultClass::PermanentOutage);
    assert!(!err.is_schema_drift());
    assert_eq!(vnfin.drift_count("a", Domain::FundIndustryHolding), 0);
}

#[tokio::test]
async fn fund_listing_filters_by_type() {
    let vnfin = Vnfin::builder()
        .with_connector(std::sync::Arc::new(vnfin_mock::MockConnector::new()))
        .build()
        .unwrap();

    let all = vnfin.fund_listing(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let stock = vnfin.fund_listing(Some(FundType::Stock)).await.unwrap();
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].symbol, "VFMVN30");
    assert!(stock[0].nav.is_some_and(|nav| nav > 0.0));
}

#[tokio::test]
async fn nav_and_holdings_from_fixtures() {
    let vnfin = Vnfin::builder()
        .with_connector(std::sync::Arc::new(vnfin_mock::MockConnector::new()))
        .build()
        .unwrap();

    let nav = vnfin.fund_nav_report(VFM).await.unwrap();
    assert!(nav.iter().all(|p| p.nav > 0.0));

    let top = vnfin.fund_top_holding(VFM).await.unwrap();
    assert_eq!(top[0].name, "VCB");
    assert_eq!(top[0].industry.as_deref(), Some("Banking"));

    let assets = vnfin.fund_asset_holding(VFM).await.unwrap();
    let total: f64 = assets.iter().map(|r| r.percentage).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

use std::sync::Arc;

use vnfin::{DealAction, Domain, OfficerStatus, Period, RequestParams, Vnfin};
use vnfin_mock::MockConnector;

use crate::helpers::{VCB, m_rows, vcb_overview_rows};

fn mock_vnfin() -> Vnfin {
    Vnfin::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn vcb_overview_keeps_fractional_ratios() {
    let primary = m_rows("primary", Domain::CompanyOverview, vcb_overview_rows());
    let vnfin = Vnfin::builder().with_connector(primary).build().unwrap();

    let overview = vnfin.company_overview(VCB).await.unwrap();
    assert_eq!(overview.len(), 1);
    let o = &overview[0];
    assert_eq!(o.symbol, "VCB");
    assert_eq!(o.company_name, "Vietcombank");
    assert_eq!(o.industry.as_deref(), Some("Banking"));
    assert_eq!(o.market_cap, Some(1_000_000_000_000.0));
    assert_eq!(o.pe_ratio, Some(12.5));
    assert_eq!(o.pb_ratio, Some(2.1));
    assert_eq!(o.roe, Some(0.18));
    assert_eq!(o.roa, Some(0.015));
}

#[tokio::test]
async fn vcb_overview_table_has_every_canonical_column() {
    let vnfin = mock_vnfin();
    let table = vnfin
        .get(Domain::CompanyOverview, &RequestParams::for_symbol("vcb"))
        .await
        .unwrap();
    for col in [
        "symbol",
        "company_name",
        "industry",
        "market_cap",
        "pe_ratio",
        "pb_ratio",
        "roe",
        "roa",
    ] {
        assert!(table.columns().iter().any(|c| c == col), "{col}");
        assert!(table.rows()[0].contains_key(col), "{col}");
    }
}

#[tokio::test]
async fn shareholders_stay_on_percent_scale() {
    let vnfin = mock_vnfin();
    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(holders.len(), 2);
    assert!((holders[0].ownership_percentage - 75.2).abs() < 1e-9);
    assert_eq!(holders[0].share_quantity, Some(3_760_000_000));
    let total: f64 = holders.iter().map(|h| h.ownership_percentage).sum();
    assert!(total <= 100.0 + 1e-9);
}

#[tokio::test]
async fn company_sections_from_fixtures() {
    let vnfin = mock_vnfin();

    let news = vnfin.company_news(VCB).await.unwrap();
    assert_eq!(news.len(), 2);
    assert!(news[0].publish_date >= news[1].publish_date);

    let events = vnfin.company_events(VCB).await.unwrap();
    assert!(!events.is_empty());

    let officers = vnfin.officers(VCB).await.unwrap();
    assert!(officers.iter().all(|o| o.status == Some(OfficerStatus::Working)));

    let subs = vnfin.subsidiaries(VCB).await.unwrap();
    assert!(
        subs.iter()
            .all(|s| (0.0..=100.0).contains(&s.ownership_percentage))
    );

    let dividends = vnfin.dividends(VCB).await.unwrap();
    assert!(!dividends.is_empty());

    let deals = vnfin.insider_deals(VCB).await.unwrap();
    assert!(
        deals
            .iter()
            .all(|d| matches!(d.action, DealAction::Buy | DealAction::Sell))
    );
}

#[tokio::test]
async fn financial_statements_and_ratios() {
    let vnfin = mock_vnfin();

    let periods = vnfin
        .financial_statement(VCB, Period::Year, None)
        .await
        .unwrap();
    assert!(!periods.is_empty());
    for p in &periods {
        if let (Some(assets), Some(equity)) = (p.total_assets, p.total_equity) {
            assert!(assets >= equity && equity >= 0.0);
        }
    }

    let ratios = vnfin.financial_ratio(VCB, Period::Year).await.unwrap();
    assert!(!ratios.is_empty());
}

#[tokio::test]
async fn unknown_symbol_is_no_data() {
    let vnfin = mock_vnfin();
    let err = vnfin.shareholders("ZZZ").await.unwrap_err();
    assert!(err.is_no_data());
}

use std::sync::Arc;

use chrono::NaiveDate;
use vnfin::{BarTime, DateRange, Exchange, Interval, MatchType, Vnfin};
use vnfin_mock::MockConnector;

use crate::helpers::VCB;

fn mock_vnfin() -> Vnfin {
    Vnfin::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn daily_bars_are_date_only_and_ordered() {
    let vnfin = mock_vnfin();
    let bars = vnfin.quote_history(VCB, Interval::D1, None).await.unwrap();
    assert_eq!(bars.len(), 2);
    for bar in &bars {
        assert!(matches!(bar.time, BarTime::Date(_)));
        assert!(bar.low <= bar.open.min(bar.close));
        assert!(bar.high >= bar.open.max(bar.close));
    }
    assert_eq!(bars[0].time.date(), d(2024, 1, 1));
}

#[tokio::test]
async fn date_range_is_forwarded_to_the_provider() {
    let vnfin = mock_vnfin();
    let range = DateRange::new(d(2024, 1, 2), d(2024, 1, 31)).unwrap();
    let bars = vnfin
        .quote_history(VCB, Interval::D1, Some(range))
        .await
        .unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].time.date(), d(2024, 1, 2));
}

#[tokio::test]
async fn intraday_ticks_keep_time_of_day() {
    let vnfin = mock_vnfin();
    let ticks = vnfin.intraday_ticks(VCB).await.unwrap();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].time.format("%H:%M:%S").to_string(), "09:15:03");
    assert_eq!(ticks[0].match_type, Some(MatchType::Buy));
    assert_eq!(ticks[1].match_type, Some(MatchType::Sell));
}

#[tokio::test]
async fn price_board_bands_are_ordered() {
    let vnfin = mock_vnfin();
    let board = vnfin.price_board(VCB).await.unwrap();
    let row = &board[0];
    let (floor, reference, ceiling) = (
        row.floor_price.unwrap(),
        row.reference_price.unwrap(),
        row.ceiling_price.unwrap(),
    );
    assert!(floor <= reference && reference <= ceiling);
}

#[tokio::test]
async fn gold_and_fx_sell_at_least_buy() {
    let vnfin = mock_vnfin();

    let gold = vnfin.gold_price(None).await.unwrap();
    assert_eq!(gold[0].gold_type, "SJC Gold Bar");
    assert_eq!(gold[0].buy_price, 75_000_000.0);
    assert!(gold.iter().all(|g| g.sell_price >= g.buy_price));

    let fx = vnfin.exchange_rate(None).await.unwrap();
    assert!(fx.iter().all(|q| q.sell_rate >= q.buy_rate));
    assert!(fx.iter().any(|q| q.currency == "USD"));
}

#[tokio::test]
async fn taxonomy_levels_share_prefixes() {
    let vnfin = mock_vnfin();
    let industries = vnfin.industry_taxonomy().await.unwrap();
    assert_eq!(industries.len(), 2);
    for e in &industries {
        assert_eq!(e.icb_code2[..1], e.icb_code1[..1]);
    }
}

#[tokio::test]
async fn listing_filters_by_exchange() {
    let vnfin = mock_vnfin();
    let hose = vnfin
        .symbol_listing(Some(Exchange::Hose), None)
        .await
        .unwrap();
    assert_eq!(hose.len(), 2);
    assert!(hose.iter().all(|s| s.exchange == Exchange::Hose));

    let err = vnfin
        .symbol_listing(Some(Exchange::Hnx), None)
        .await
        .unwrap_err();
    assert!(err.is_no_data());
}

#[tokio::test]
async fn listing_filters_by_industry_code() {
    let vnfin = mock_vnfin();
    let banks = vnfin.symbols_by_industry("8300").await.unwrap();
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].symbol, VCB);

    let financials = vnfin.symbols_by_industry("8000").await.unwrap();
    assert_eq!(financials.len(), 2);

    let err = vnfin.symbols_by_industry("9500").await.unwrap_err();
    assert!(err.is_no_data());
}

use serde_json::json;
use vnfin_core::{Period, RawRows, RequestParams};

pub fn statement(symbol: &str, params: &RequestParams) -> Option<RawRows> {
    if symbol != "VCB" {
        return None;
    }
    let rows = match params.period.unwrap_or_default() {
        Period::Year => vec![
            json!({
                "period": "2023",
                "revenue": 50_000_000_000_i64,
                "profit_before_tax": 15_000_000_000_i64,
                "net_profit": 12_000_000_000_i64,
                "total_assets": 2_000_000_000_000_i64,
                "total_equity": 150_000_000_000_i64,
                "operating_cash_flow": 21_000_000_000_i64
            }),
            json!({
                "period": "2022",
                "revenue": 45_000_000_000_i64,
                "profit_before_tax": 13_500_000_000_i64,
                "net_profit": 10_800_000_000_i64,
                "total_assets": 1_800_000_000_000_i64,
                "total_equity": 140_000_000_000_i64
            }),
        ],
        Period::Quarter => vec![json!({
            "period": "2023-Q4",
            "revenue": 13_000_000_000_i64,
            "profit_before_tax": 4_000_000_000_i64,
            "net_profit": 3_200_000_000_i64
        })],
    };
    Some(RawRows::from_values(rows))
}

pub fn ratio(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({"period": "2023", "pe_ratio": 12.5, "pb_ratio": 2.1, "roe": 0.18, "roa": 0.015, "eps": 6_200}),
            json!({"period": "2022", "pe_ratio": 14.1, "pb_ratio": 2.6, "roe": 0.17, "roa": 0.014, "eps": 5_700}),
        ])
    })
}

use serde_json::json;
use vnfin_core::{FundType, RawRows, RequestParams};

pub fn listing(params: &RequestParams) -> RawRows {
    let all = [
        (FundType::Stock, json!({
            "symbol": "VFMVN30",
            "fund_name": "VFM VN30 ETF",
            "fund_type": "STOCK",
            "nav": 25.5,
            "total_assets": 5_000_000_000_i64
        })),
        (FundType::Balanced, json!({
            "symbol": "DCDS",
            "fund_name": "Dragon Capital Dividend Fund",
            "fund_type": "BALANCED",
            "nav": 15.2,
            "total_assets": 2_000_000_000_i64
        })),
    ];
    RawRows::from_values(
        all.into_iter()
            .filter(|(ty, _)| params.fund_type.is_none_or(|want| want == *ty))
            .map(|(_, row)| row),
    )
}

pub fn nav_report(symbol: &str) -> Option<RawRows> {
    match symbol {
        "VFMVN30" | "DCDS" => Some(RawRows::from_values([
            json!({"date": "2024-01-02", "nav": 25.1}),
            json!({"date": "2024-01-03", "nav": 25.5}),
        ])),
        _ => None,
    }
}

pub fn top_holding(symbol: &str) -> Option<RawRows> {
    (symbol == "VFMVN30").then(|| {
        RawRows::from_values([
            json!({"name": "VCB", "percentage": 9.8, "industry": "Banking", "date": "2024-01-31"}),
            json!({"name": "VIC", "percentage": 6.1, "industry": "Real Estate", "date": "2024-01-31"}),
        ])
    })
}

pub fn industry_holding(symbol: &str) -> Option<RawRows> {
    (symbol == "VFMVN30").then(|| {
        RawRows::from_values([
            json!({"name": "Banking", "percentage": 38.5, "date": "2024-01-31"}),
            json!({"name": "Real Estate", "percentage": 16.2, "date": "2024-01-31"}),
        ])
    })
}

pub fn asset_holding(symbol: &str) -> Option<RawRows> {
    (symbol == "VFMVN30").then(|| {
        RawRows::from_values([
            json!({"name": "Stocks", "percentage": 97.4, "date": "2024-01-31"}),
            json!({"name": "Cash", "percentage": 2.6, "date": "2024-01-31"}),
        ])
    })
}

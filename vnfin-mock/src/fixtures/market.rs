use serde_json::json;
use vnfin_core::{RawRows, RequestParams};

pub fn history(symbol: &str, params: &RequestParams) -> Option<RawRows> {
    if symbol != "VCB" {
        return None;
    }
    let rows = [
        json!({"time": "2024-01-01", "open": 100.0, "high": 105.0, "low": 98.0, "close": 103.0, "volume": 1_000_000}),
        json!({"time": "2024-01-02", "open": 103.0, "high": 107.0, "low": 101.0, "close": 106.0, "volume": 1_200_000}),
    ];
    let in_range = |row: &serde_json::Value| match (&params.date_range, row["time"].as_str()) {
        (Some(range), Some(t)) => t
            .parse()
            .map(|d| range.contains(d))
            .unwrap_or(true),
        _ => true,
    };
    Some(RawRows::from_values(rows.into_iter().filter(in_range)))
}

pub fn intraday(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({"time": "2024-01-02 09:15:03", "price": 103.5, "volume": 1_200, "match_type": "BU"}),
            json!({"time": "2024-01-02 09:15:09", "price": 103.4, "volume": 300, "match_type": "SD"}),
        ])
    })
}

pub fn price_board(symbol: &str) -> Option<RawRows> {
    let row = match symbol {
        "VCB" => json!({
            "symbol": "VCB", "price": 106.0, "volume": 1_200_000,
            "reference_price": 103.0, "ceiling_price": 110.2, "floor_price": 95.8
        }),
        "VIC" => json!({
            "symbol": "VIC", "price": 44.5, "volume": 3_400_000,
            "reference_price": 44.0, "ceiling_price": 47.05, "floor_price": 40.95
        }),
        _ => return None,
    };
    Some(RawRows::from_values([row]))
}

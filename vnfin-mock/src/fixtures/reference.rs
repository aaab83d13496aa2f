use serde_json::json;
use vnfin_core::{Exchange, RawRows, RequestParams};

pub fn gold() -> RawRows {
    RawRows::from_values([json!({
        "date": "2024-01-01",
        "buy_price": 75_000_000,
        "sell_price": 76_000_000,
        "type": "SJC Gold Bar"
    })])
}

pub fn exchange_rates() -> RawRows {
    RawRows::from_values([
        json!({"currency": "USD", "buy_rate": 24_000, "sell_rate": 24_200, "date": "2024-01-01"}),
        json!({"currency": "EUR", "buy_rate": 26_000, "sell_rate": 26_300, "date": "2024-01-01"}),
    ])
}

pub fn industries() -> RawRows {
    RawRows::from_values([
        json!({"icb_code1": "1000", "icb_name1": "Technology", "icb_code2": "1100", "icb_name2": "Software"}),
        json!({"icb_code1": "2000", "icb_name1": "Banking", "icb_code2": "2100", "icb_name2": "Commercial Banks"}),
    ])
}

/// ICB codes (level 1 to 4) of each listed fixture symbol.
const SYMBOL_ICB: &[(&str, [&str; 4])] = &[
    ("VCB", ["8000", "8300", "8350", "8355"]),
    ("VIC", ["8000", "8600", "8630", "8633"]),
];

pub fn symbols(params: &RequestParams) -> RawRows {
    let all = [
        json!({"symbol": "VCB", "company_name": "Vietcombank", "exchange": "HOSE", "industry": "Banking"}),
        json!({"symbol": "VIC", "company_name": "Vingroup", "exchange": "HOSE", "industry": "Real Estate"}),
    ];
    let wanted = params.exchange.map(Exchange::as_str);
    let industry = params.industry.as_deref();
    RawRows::from_values(
        all.into_iter()
            .filter(|row| wanted.is_none_or(|ex| row["exchange"] == ex))
            .filter(|row| {
                industry.is_none_or(|code| {
                    SYMBOL_ICB
                        .iter()
                        .any(|(sym, codes)| row["symbol"] == *sym && codes.contains(&code))
                })
            }),
    )
}

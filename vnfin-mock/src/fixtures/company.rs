use serde_json::json;
use vnfin_core::RawRows;

pub fn overview(symbol: &str) -> Option<RawRows> {
    let row = match symbol {
        "VCB" => json!({
            "symbol": "VCB",
            "company_name": "Vietcombank",
            "industry": "Banking",
            "market_cap": 1_000_000_000_000_i64,
            "pe_ratio": 12.5,
            "pb_ratio": 2.1,
            "roe": 0.18,
            "roa": 0.015
        }),
        "VIC" => json!({
            "symbol": "VIC",
            "company_name": "Vingroup",
            "industry": "Real Estate",
            "market_cap": 160_000_000_000_000_i64,
            "pe_ratio": 40.2,
            "pb_ratio": 1.3,
            "roe": 0.032,
            "roa": 0.006
        }),
        _ => return None,
    };
    Some(RawRows::from_values([row]))
}

pub fn news(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({
                "title": "VCB announces Q3 results",
                "publish_date": "2024-10-15",
                "content": "Strong quarterly performance...",
                "source": "TCBS"
            }),
            json!({
                "title": "VCB dividend announcement",
                "publish_date": "2024-10-10",
                "content": "Dividend payment schedule...",
                "source": "TCBS"
            }),
        ])
    })
}

pub fn events(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({
                "event_type": "AGM",
                "event_date": "2024-04-15",
                "description": "Annual General Meeting",
                "status": "Completed"
            }),
            json!({
                "event_type": "Dividend",
                "event_date": "2024-05-01",
                "description": "Dividend payment",
                "status": "Completed"
            }),
        ])
    })
}

pub fn shareholders(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({
                "shareholder_name": "State Bank of Vietnam",
                "ownership_percentage": 75.2,
                "share_quantity": 3_760_000_000_i64
            }),
            json!({
                "shareholder_name": "Public shareholders",
                "ownership_percentage": 24.8,
                "share_quantity": 1_240_000_000_i64
            }),
        ])
    })
}

pub fn officers(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({"name": "John Doe", "position": "CEO", "status": "working", "appointment_date": "2020-01-01"}),
            json!({"name": "Jane Smith", "position": "CFO", "status": "working", "appointment_date": "2021-06-01"}),
        ])
    })
}

pub fn subsidiaries(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({"subsidiary_name": "VCB Securities", "ownership_percentage": 100, "business_type": "subsidiary"}),
            json!({"subsidiary_name": "VCB Insurance", "ownership_percentage": 51, "business_type": "subsidiary"}),
        ])
    })
}

pub fn dividends(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([
            json!({"exercise_date": "2024-05-01", "cash_year": 2023, "dividend_ratio": 18, "issue_method": "share"}),
            json!({"exercise_date": "2023-06-15", "cash_year": 2022, "dividend_ratio": 8, "issue_method": "cash"}),
        ])
    })
}

pub fn insider_deals(symbol: &str) -> Option<RawRows> {
    (symbol == "VCB").then(|| {
        RawRows::from_values([json!({
            "deal_date": "2024-03-12",
            "action": "buy",
            "quantity": 50_000,
            "insider_name": "Jane Smith",
            "price": 92_500
        })])
    })
}

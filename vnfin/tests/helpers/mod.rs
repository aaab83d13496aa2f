// Re-export helpers so tests can `use crate::helpers::*;`
pub mod mock_connector;

pub use mock_connector::{MockConnector, m_fail, m_rows, m_seq, m_slow};

use serde_json::json;
use vnfin::RawRows;

/// Common symbol constants used across tests.
pub const VCB: &str = "VCB";
pub const VFM: &str = "VFMVN30";

/// Valid shareholder rows as a provider reporting percentages would send them.
pub fn shareholder_rows() -> RawRows {
    RawRows::from_values([
        json!({"shareholder_name": "State Bank of Vietnam", "ownership_percentage": 74.8}),
        json!({"shareholder_name": "Mizuho Bank", "ownership_percentage": 15.0}),
    ])
}

/// Shareholder rows whose fields were renamed upstream.
pub fn drifted_shareholder_rows() -> RawRows {
    RawRows::from_values([json!({"holder": "State Bank of Vietnam", "pct": 74.8})])
}

/// The VCB overview as the primary provider reports it.
pub fn vcb_overview_rows() -> RawRows {
    RawRows::from_values([json!({
        "symbol": "VCB",
        "company_name": "Vietcombank",
        "industry": "Banking",
        "market_cap": 1_000_000_000_000_i64,
        "pe_ratio": 12.5,
        "pb_ratio": 2.1,
        "roe": 0.18,
        "roa": 0.015
    })])
}

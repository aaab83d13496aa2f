use serde_json::json;
use vnfin::{Domain, PercentScale, RawRows, Vnfin};

use crate::helpers::{VCB, m_rows};

#[tokio::test]
async fn declared_fractions_are_scaled_to_percent() {
    let rows = RawRows::from_values([
        json!({"shareholder_name": "State Bank of Vietnam", "ownership_percentage": 0.752}),
        json!({"shareholder_name": "Others", "ownership_percentage": 0.248}),
    ])
    .with_percent_scale(PercentScale::Fraction);
    let a = m_rows("tcbs-like", Domain::Shareholders, rows);
    let vnfin = Vnfin::builder().with_connector(a).build().unwrap();

    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert!((holders[0].ownership_percentage - 75.2).abs() < 1e-9);
    assert!((holders[1].ownership_percentage - 24.8).abs() < 1e-9);
}

#[tokio::test]
async fn undeclared_fraction_column_is_inferred() {
    let rows = RawRows::from_values([
        json!({"subsidiary_name": "VCB Securities", "ownership_percentage": 1.0}),
        json!({"subsidiary_name": "VCB Leasing", "ownership_percentage": 0.51}),
    ]);
    let a = m_rows("a", Domain::Subsidiaries, rows);
    let vnfin = Vnfin::builder().with_connector(a).build().unwrap();

    let subs = vnfin.subsidiaries(VCB).await.unwrap();
    assert!((subs[0].ownership_percentage - 100.0).abs() < 1e-9);
    assert!((subs[1].ownership_percentage - 51.0).abs() < 1e-9);
}

#[tokio::test]
async fn percent_strings_are_parsed() {
    let rows = RawRows::from_values([
        json!({"shareholder_name": "State Bank of Vietnam", "ownership_percentage": "74.8%"}),
    ])
    .with_percent_scale(PercentScale::Percent);
    let a = m_rows("a", Domain::Shareholders, rows);
    let vnfin = Vnfin::builder().with_connector(a).build().unwrap();

    let holders = vnfin.shareholders(VCB).await.unwrap();
    assert!((holders[0].ownership_percentage - 74.8).abs() < 1e-9);
}

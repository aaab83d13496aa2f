use std::sync::Arc;

use serde_json::json;
use vnfin::{Domain, RequestParams, RoutingPolicyBuilder, TransportError, Vnfin, VnConnector};
use vnfin_tcbs::{TcbsApi, TcbsConnector};
use vnfin_vci::{VciApi, VciConnector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Canned transports stand in for HTTP clients.
    let tcbs_http = <dyn TcbsApi>::from_fn(|path, _query| match path {
        "tcanalysis/v1/company/VCB/large-share-holders" => Ok(json!({
            "listShareHolder": [
                {"name": "State Bank of Vietnam", "ownPercent": 0.748},
                {"name": "Mizuho Bank", "ownPercent": 0.15}
            ]
        })),
        _ => Err(TransportError::status(503, "maintenance")),
    });
    let vci_http = <dyn VciApi>::from_fn(|path, _body| match path {
        "company/overview" => Ok(json!({
            "profile": {"ticker": "VCB", "organName": "Vietcombank", "icbName3": "Banking"},
            "ratioSummary": [{"itemCode": "ROE", "value": 0.18}]
        })),
        "commodity/gold" => Ok(json!({
            "data": [{"name": "SJC", "buyPrice": "75,000,000", "sellPrice": "77,000,000", "date": "02/01/2024"}]
        })),
        _ => Ok(json!({"data": null})),
    });

    let tcbs: Arc<dyn VnConnector> = Arc::new(TcbsConnector::with_api(tcbs_http));
    let vci: Arc<dyn VnConnector> = Arc::new(VciConnector::with_api(vci_http));

    let vnfin = Vnfin::builder()
        .with_connector(tcbs.clone())
        .with_connector(vci.clone())
        .routing_policy(
            RoutingPolicyBuilder::new()
                .providers_global(&[tcbs.key(), vci.key()])
                .build(),
        )
        .build()?;

    // TCBS reports fractions; the canonical table is on the 0-100 scale.
    for h in vnfin.shareholders("VCB").await? {
        println!("{:<24} {:>6.2}%", h.shareholder_name, h.ownership_percentage);
    }

    // TCBS is down for overviews, so VCI answers.
    let overview = vnfin.company_overview("VCB").await?;
    println!("{} roe={:?}", overview[0].company_name, overview[0].roe);

    // Only VCI serves gold prices.
    println!("gold candidates: {:?}", vnfin.candidates(Domain::GoldPrice));
    let gold = vnfin.get(Domain::GoldPrice, &RequestParams::new()).await?;
    println!("{gold:?}");

    Ok(())
}

use std::sync::Arc;
use std::time::Duration;

use vnfin::{
    AdapterFault, BackoffConfig, Domain, RequestParams, RoutingPolicyBuilder, Vnfin,
    VnConnector,
};
use vnfin_mock::{DynamicMockConnector, MockBehavior, MockConnector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // "flaky" claims shareholders but has no data for them.
    let (flaky, controller) =
        DynamicMockConnector::new_with_controller("flaky", &[Domain::Shareholders]);
    controller
        .set_behavior(
            Domain::Shareholders,
            MockBehavior::Fail(AdapterFault::not_found("no data")),
        )
        .await;

    let fixtures: Arc<dyn VnConnector> = Arc::new(MockConnector::named("fixtures"));

    let policy = RoutingPolicyBuilder::new()
        .providers_global(&[flaky.key(), fixtures.key()])
        .build();

    let vnfin = Vnfin::builder()
        .with_connector(flaky)
        .with_connector(fixtures)
        .routing_policy(policy)
        .provider_timeout(Duration::from_secs(2))
        .backoff(BackoffConfig {
            min_backoff_ms: 100,
            max_backoff_ms: 1_000,
            factor: 2,
            jitter_percent: 10,
        })
        .build()?;

    println!("candidates for shareholders: {:?}", vnfin.candidates(Domain::Shareholders));

    // "flaky" is tried first, reports no data, and "fixtures" answers.
    let table = vnfin
        .get(Domain::Shareholders, &RequestParams::for_symbol("VCB"))
        .await?;
    println!("{} rows from the fallback provider", table.len());

    // Unknown symbols exhaust every candidate.
    match vnfin.shareholders("ZZZ").await {
        Ok(_) => println!("unexpected data"),
        Err(e) => {
            println!("no data anywhere: {}", e.is_no_data());
            for attempt in e.attempts() {
                println!("  {attempt}");
            }
        }
    }

    Ok(())
}

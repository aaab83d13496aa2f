use std::sync::Arc;

use tracing_subscriber::fmt::format::FmtSpan;
use vnfin::{Interval, Vnfin};
use vnfin_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,vnfin=trace,vnfin_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let vnfin = Vnfin::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()?;

    let _ = vnfin.company_overview("VCB").await?;
    let _ = vnfin.quote_history("VCB", Interval::D1, None).await?;

    // A transient failure: retried with backoff, then reported.
    if let Err(e) = vnfin.shareholders("FAIL").await {
        println!("expected failure: {e}");
    }

    Ok(())
}

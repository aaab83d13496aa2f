use std::sync::Arc;

use vnfin::Vnfin;
use vnfin_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the facade over the fixture connector.
    let vnfin = Vnfin::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()?;

    // 2. Typed records.
    for overview in vnfin.company_overview("VCB").await? {
        println!(
            "{} ({}): P/E {:?}, ROE {:?}",
            overview.company_name, overview.symbol, overview.pe_ratio, overview.roe
        );
    }

    // 3. Ownership is always reported on a 0-100 scale.
    for holder in vnfin.shareholders("VCB").await? {
        println!("{:>6.2}%  {}", holder.ownership_percentage, holder.shareholder_name);
    }

    Ok(())
}

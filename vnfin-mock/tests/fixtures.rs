use vnfin_core::{
    AdapterFaultKind, CoerceOptions, Domain, RequestParams, VnConnector, validate_and_coerce_with,
};
use vnfin_mock::MockConnector;

fn params_for(domain: Domain) -> RequestParams {
    match domain {
        Domain::FundNavReport
        | Domain::FundTopHolding
        | Domain::FundIndustryHolding
        | Domain::FundAssetHolding => RequestParams::for_symbol("VFMVN30"),
        d if d.requires_symbol() => RequestParams::for_symbol("VCB"),
        _ => RequestParams::new(),
    }
}

#[tokio::test]
async fn every_fixture_passes_validation() {
    let mock = MockConnector::new();
    for domain in Domain::ALL {
        let params = params_for(*domain);
        let raw = mock.fetch(*domain, &params).await.expect("fixture rows");
        let table = validate_and_coerce_with(*domain, &raw, CoerceOptions::for_params(&params))
            .unwrap_or_else(|f| panic!("{domain}: {f}"));
        assert!(!table.is_empty(), "{domain}");
    }
}

#[tokio::test]
async fn reserved_symbols_trigger_failure_modes() {
    let mock = MockConnector::new();

    let err = mock
        .fetch(Domain::Shareholders, &RequestParams::for_symbol("FAIL"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AdapterFaultKind::Http { status: 503 });

    let err = mock
        .fetch(Domain::Shareholders, &RequestParams::for_symbol("ZZZ"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AdapterFaultKind::NotFound);

    let drifted = mock
        .fetch(Domain::Shareholders, &RequestParams::for_symbol("DRIFT"))
        .await
        .unwrap();
    assert!(vnfin_core::validate_and_coerce(Domain::Shareholders, &drifted).is_err());
}

#[tokio::test]
async fn listing_filters_apply() {
    let mock = MockConnector::named("other");
    assert_eq!(mock.name(), "other");

    let stock_only = RequestParams::new().fund_type(vnfin_core::FundType::Stock);
    let funds = mock.fetch(Domain::FundListing, &stock_only).await.unwrap();
    assert_eq!(funds.len(), 1);

    let hnx = RequestParams::new().exchange(vnfin_core::Exchange::Hnx);
    let err = mock.fetch(Domain::SymbolListing, &hnx).await.unwrap_err();
    assert_eq!(err.kind, AdapterFaultKind::EmptyPayload);
}

//! Mock vnfin connector with deterministic fixtures for tests and examples.
//!
//! [`MockConnector`] serves every domain from static data for `VCB`/`VIC`
//! (companies and quotes) and `VFMVN30`/`DCDS` (funds). A few reserved
//! symbols trigger failure modes:
//!
//! - `FAIL`: HTTP 503 fault (transient);
//! - `TIMEOUT`: sleeps 200 ms before answering;
//! - `DRIFT`: rows with renamed fields that fail validation;
//! - anything else: not-found fault.
//!
//! [`DynamicMockConnector`] is scripted per domain by a controller.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use vnfin_core::{AdapterFault, Domain, RawRows, RequestParams, VnConnector};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector {
    name: &'static str,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Name used when none is given.
    pub const NAME: &'static str = "vnfin-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self { name: Self::NAME }
    }

    /// Same fixtures under another connector name, for multi-provider setups.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    async fn maybe_fail_or_timeout(symbol: &str, domain: Domain) -> Result<(), AdapterFault> {
        match symbol {
            "FAIL" => Err(AdapterFault::http(
                503,
                format!("forced failure: {domain}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn drifted(domain: Domain) -> RawRows {
        // Provider renamed every field; nothing required survives.
        RawRows::from_values([json!({
            "ten": format!("drifted {domain}"),
            "ngay": "2024-01-01",
            "gia_tri": 1
        })])
    }

    fn lookup(domain: Domain, symbol: &str, params: &RequestParams) -> Option<RawRows> {
        use fixtures::{company, finance, fund, market, reference};
        match domain {
            Domain::CompanyOverview => company::overview(symbol),
            Domain::CompanyNews => company::news(symbol),
            Domain::CompanyEvents => company::events(symbol),
            Domain::Shareholders => company::shareholders(symbol),
            Domain::Officers => company::officers(symbol),
            Domain::Subsidiaries => company::subsidiaries(symbol),
            Domain::Dividends => company::dividends(symbol),
            Domain::InsiderDeals => company::insider_deals(symbol),
            Domain::FinancialStatement => finance::statement(symbol, params),
            Domain::FinancialRatio => finance::ratio(symbol),
            Domain::FundListing => Some(fund::listing(params)),
            Domain::FundNavReport => fund::nav_report(symbol),
            Domain::FundTopHolding => fund::top_holding(symbol),
            Domain::FundIndustryHolding => fund::industry_holding(symbol),
            Domain::FundAssetHolding => fund::asset_holding(symbol),
            Domain::QuoteHistory => market::history(symbol, params),
            Domain::IntradayTicks => market::intraday(symbol),
            Domain::PriceBoard => market::price_board(symbol),
            Domain::GoldPrice => Some(reference::gold()),
            Domain::ExchangeRate => Some(reference::exchange_rates()),
            Domain::IndustryTaxonomy => Some(reference::industries()),
            Domain::SymbolListing => Some(reference::symbols(params)),
        }
    }
}

#[async_trait]
impl VnConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports(&self, _domain: Domain) -> bool {
        true
    }

    async fn fetch(&self, domain: Domain, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let symbol = params.symbol.as_deref().unwrap_or_default();
        Self::maybe_fail_or_timeout(symbol, domain).await?;
        if symbol == "DRIFT" {
            return Ok(Self::drifted(domain));
        }
        match Self::lookup(domain, symbol, params) {
            Some(rows) if rows.is_empty() => Err(AdapterFault::empty(format!("{domain}: no rows"))),
            Some(rows) => Ok(rows),
            None => Err(AdapterFault::not_found(format!("{domain} for {symbol}"))),
        }
    }
}

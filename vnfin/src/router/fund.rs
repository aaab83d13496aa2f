use crate::Vnfin;
use crate::vnfin_router_method;
use vnfin_core::{
    CanonicalTable, Domain, FundHolding, FundNavPoint, FundRecord, FundType, RequestParams,
    VnError,
};

/// The four fund sub-resources fetched together by [`Vnfin::fund_details`].
///
/// A section that no provider can supply is an empty table for its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct FundDetails {
    /// Fund code.
    pub symbol: String,
    /// NAV history (`FundNavReport`).
    pub nav_report: CanonicalTable,
    /// Top stock holdings (`FundTopHolding`).
    pub top_holding: CanonicalTable,
    /// Allocation by industry (`FundIndustryHolding`).
    pub industry_holding: CanonicalTable,
    /// Allocation by asset class (`FundAssetHolding`).
    pub asset_holding: CanonicalTable,
}

impl FundDetails {
    /// True when every section came back empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nav_report.is_empty()
            && self.top_holding.is_empty()
            && self.industry_holding.is_empty()
            && self.asset_holding.is_empty()
    }
}

impl Vnfin {
    vnfin_router_method! {
        /// List open-ended funds, optionally of one type.
        method: fund_listing(fund_type: Option<FundType>) -> FundRecord,
        domain: Domain::FundListing,
        params: match fund_type {
            Some(t) => RequestParams::new().fund_type(t),
            None => RequestParams::new(),
        }
    }

    vnfin_router_method! {
        /// Fetch a fund's NAV history.
        method: fund_nav_report(symbol: &str) -> FundNavPoint,
        domain: Domain::FundNavReport,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch a fund's top stock holdings.
        method: fund_top_holding(symbol: &str) -> FundHolding,
        domain: Domain::FundTopHolding,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch a fund's allocation by industry.
        method: fund_industry_holding(symbol: &str) -> FundHolding,
        domain: Domain::FundIndustryHolding,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch a fund's allocation by asset class.
        method: fund_asset_holding(symbol: &str) -> FundHolding,
        domain: Domain::FundAssetHolding,
        params: RequestParams::for_symbol(symbol)
    }

    /// Fetch all four fund sub-resources concurrently.
    ///
    /// Behavior:
    /// - Each section is routed independently, so sections may come from
    ///   different providers.
    /// - A section with no capable provider, or whose every attempt reports
    ///   that the provider has no data, is returned as an empty table.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty symbol, and the first section error
    /// that is not a "no data" outcome (for example a schema drift or timeout).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "vnfin::router", skip(self))
    )]
    pub async fn fund_details(&self, symbol: &str) -> Result<FundDetails, VnError> {
        let params = RequestParams::for_symbol(symbol);
        params.require_symbol(Domain::FundNavReport)?;

        let (nav, top, industry, asset) = futures::join!(
            self.fund_section(Domain::FundNavReport, &params),
            self.fund_section(Domain::FundTopHolding, &params),
            self.fund_section(Domain::FundIndustryHolding, &params),
            self.fund_section(Domain::FundAssetHolding, &params),
        );

        Ok(FundDetails {
            symbol: params.symbol.clone().unwrap_or_default(),
            nav_report: nav?,
            top_holding: top?,
            industry_holding: industry?,
            asset_holding: asset?,
        })
    }

    async fn fund_section(
        &self,
        domain: Domain,
        params: &RequestParams,
    ) -> Result<CanonicalTable, VnError> {
        match self.get(domain, params).await {
            Ok(table) => Ok(table),
            Err(VnError::NoCapableProvider { .. }) => Ok(CanonicalTable::empty(domain)),
            Err(e) if e.is_no_data() => Ok(CanonicalTable::empty(domain)),
            Err(e) => Err(e),
        }
    }
}

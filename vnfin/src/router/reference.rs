use crate::Vnfin;
use crate::vnfin_router_method;
use vnfin_core::{
    DateRange, Domain, Exchange, ExchangeRateQuote, GoldPriceQuote, IndustryTaxonomyEntry,
    RequestParams, SymbolListingEntry,
};

fn with_range(range: Option<DateRange>) -> RequestParams {
    match range {
        Some(r) => RequestParams::new().date_range(r),
        None => RequestParams::new(),
    }
}

impl Vnfin {
    vnfin_router_method! {
        /// Fetch domestic gold buy/sell prices.
        method: gold_price(range: Option<DateRange>) -> GoldPriceQuote,
        domain: Domain::GoldPrice,
        params: with_range(range)
    }

    vnfin_router_method! {
        /// Fetch bank exchange rates against VND.
        method: exchange_rate(range: Option<DateRange>) -> ExchangeRateQuote,
        domain: Domain::ExchangeRate,
        params: with_range(range)
    }

    vnfin_router_method! {
        /// Fetch the ICB industry taxonomy as hierarchical paths.
        method: industry_taxonomy() -> IndustryTaxonomyEntry,
        domain: Domain::IndustryTaxonomy,
        params: RequestParams::new()
    }

    vnfin_router_method! {
        /// List tradable symbols, optionally by exchange and/or index group.
        method: symbol_listing(
            exchange: Option<Exchange>,
            group: Option<&str>
        ) -> SymbolListingEntry,
        domain: Domain::SymbolListing,
        params: {
            let mut params = RequestParams::new();
            if let Some(e) = exchange {
                params = params.exchange(e);
            }
            if let Some(g) = group {
                params = params.group(g);
            }
            params
        }
    }

    vnfin_router_method! {
        /// List symbols classified under an ICB code at any level.
        method: symbols_by_industry(icb_code: &str) -> SymbolListingEntry,
        domain: Domain::SymbolListing,
        params: RequestParams::new().industry(icb_code)
    }
}

use crate::Vnfin;
use crate::vnfin_router_method;
use vnfin_core::{
    CompanyEvent, CompanyNewsItem, CompanyOverview, DividendEntry, Domain, InsiderDeal,
    OfficerEntry, RequestParams, ShareholderEntry, SubsidiaryEntry,
};

impl Vnfin {
    vnfin_router_method! {
        /// Fetch the company overview.
        ///
        /// Notes: `roe` and `roa` are passed through as fractional ratios.
        method: company_overview(symbol: &str) -> CompanyOverview,
        domain: Domain::CompanyOverview,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch recent company news.
        method: company_news(symbol: &str) -> CompanyNewsItem,
        domain: Domain::CompanyNews,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch corporate events (meetings, issuances, dividend dates).
        method: company_events(symbol: &str) -> CompanyEvent,
        domain: Domain::CompanyEvents,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch major shareholders.
        ///
        /// Behavior: ownership is always on a 0–100 scale regardless of how the
        /// provider reports it.
        method: shareholders(symbol: &str) -> ShareholderEntry,
        domain: Domain::Shareholders,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch company officers.
        method: officers(symbol: &str) -> OfficerEntry,
        domain: Domain::Officers,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch subsidiaries and affiliates.
        method: subsidiaries(symbol: &str) -> SubsidiaryEntry,
        domain: Domain::Subsidiaries,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch cash dividend history.
        method: dividends(symbol: &str) -> DividendEntry,
        domain: Domain::Dividends,
        params: RequestParams::for_symbol(symbol)
    }

    vnfin_router_method! {
        /// Fetch insider deals.
        ///
        /// Notes: disclosures may lag the actual trade date.
        method: insider_deals(symbol: &str) -> InsiderDeal,
        domain: Domain::InsiderDeals,
        params: RequestParams::for_symbol(symbol)
    }
}

use crate::Vnfin;
use crate::vnfin_router_method;
use vnfin_core::{
    Domain, FinancialPeriod, FinancialRatioEntry, Period, ReportType, RequestParams,
};

impl Vnfin {
    vnfin_router_method! {
        /// Fetch financial statements, one row per reporting period.
        ///
        /// With `report_type = None` every statement the provider has is merged
        /// into the same period rows.
        method: financial_statement(
            symbol: &str,
            period: Period,
            report_type: Option<ReportType>
        ) -> FinancialPeriod,
        domain: Domain::FinancialStatement,
        params: {
            let params = RequestParams::for_symbol(symbol).period(period);
            match report_type {
                Some(r) => params.report_type(r),
                None => params,
            }
        }
    }

    vnfin_router_method! {
        /// Fetch valuation and profitability ratios per period.
        method: financial_ratio(symbol: &str, period: Period) -> FinancialRatioEntry,
        domain: Domain::FinancialRatio,
        params: RequestParams::for_symbol(symbol).period(period)
    }
}

use crate::Vnfin;
use crate::vnfin_router_method;
use vnfin_core::{
    DateRange, Domain, Interval, IntradayTick, PriceBoardEntry, QuoteBar, RequestParams,
};

impl Vnfin {
    vnfin_router_method! {
        /// Fetch OHLCV bars.
        ///
        /// Behavior: daily and coarser cadences yield date-only bar times;
        /// intraday cadences keep the time of day.
        method: quote_history(
            symbol: &str,
            interval: Interval,
            range: Option<DateRange>
        ) -> QuoteBar,
        domain: Domain::QuoteHistory,
        params: {
            let params = RequestParams::for_symbol(symbol).interval(interval);
            match range {
                Some(r) => params.date_range(r),
                None => params,
            }
        }
    }

    vnfin_router_method! {
        /// Fetch matched ticks for the current session.
        method: intraday_ticks(symbol: &str) -> IntradayTick,
        domain: Domain::IntradayTicks,
        params: RequestParams::for_symbol(symbol).interval(Interval::M1)
    }

    vnfin_router_method! {
        /// Fetch the price board row for a symbol.
        method: price_board(symbol: &str) -> PriceBoardEntry,
        domain: Domain::PriceBoard,
        params: RequestParams::for_symbol(symbol)
    }
}

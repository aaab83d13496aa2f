//! vnfin-tcbs
//!
//! Connector that implements `VnConnector` on top of a TCBS-style JSON API.
//! Serves company profile data, financial statements and ratios, quote
//! history, intraday ticks, the price board, fund listings and exchange
//! rates. Every percentage in TCBS payloads is a fraction (`0.748` for
//! 74.8%), so rows are declared [`PercentScale::Fraction`].
//!
//! The HTTP client is not part of this crate: supply a [`TcbsApi`]
//! implementation to [`TcbsConnector::with_api`].
#![warn(missing_docs)]

/// Transport abstraction used by the connector.
pub mod adapter;

use std::collections::HashMap;
use std::sync::Arc;

pub use adapter::TcbsApi;
use async_trait::async_trait;
use serde_json::{Map, Value};
use vnfin_core::transport::{
    array_at, normalize_transport_error, object_at, period_label, project, project_all,
    range_epochs, require_symbol,
};
use vnfin_core::{
    AdapterFault, ConnectorKey, Domain, Interval, PercentScale, Period, Query, RawRow, RawRows,
    ReportType, RequestParams, VnConnector,
};

const SUPPORTED: &[Domain] = &[
    Domain::CompanyOverview,
    Domain::CompanyNews,
    Domain::CompanyEvents,
    Domain::Shareholders,
    Domain::Officers,
    Domain::Subsidiaries,
    Domain::Dividends,
    Domain::InsiderDeals,
    Domain::FinancialStatement,
    Domain::FinancialRatio,
    Domain::QuoteHistory,
    Domain::IntradayTicks,
    Domain::PriceBoard,
    Domain::FundListing,
    Domain::ExchangeRate,
];

/// Bars requested when no date range is given.
const DEFAULT_COUNT_BACK: u32 = 365;

/// Intraday page size.
const TICK_PAGE_SIZE: u32 = 100;

/// Public connector implementation backed by a TCBS-style API.
pub struct TcbsConnector {
    api: Arc<dyn TcbsApi>,
}

impl std::fmt::Debug for TcbsConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcbsConnector").finish_non_exhaustive()
    }
}

impl TcbsConnector {
    /// Static connector key for routing policy configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("vnfin-tcbs");

    /// Build on top of a transport.
    #[must_use]
    pub fn with_api(api: Arc<dyn TcbsApi>) -> Self {
        Self { api }
    }

    async fn get(&self, path: &str, query: Query, what: &str) -> Result<Value, AdapterFault> {
        self.api
            .get_json(path, &query)
            .await
            .map_err(|e| normalize_transport_error(e, what))
    }

    async fn company_list(
        &self,
        symbol: &str,
        resource: &str,
        key: &str,
        pairs: &[(&str, &str)],
    ) -> Result<RawRows, AdapterFault> {
        let what = format!("{resource} for {symbol}");
        let body = self
            .get(&format!("tcanalysis/v1/company/{symbol}/{resource}"), Vec::new(), &what)
            .await?;
        project_all(array_at(&body, Some(key), &what)?, pairs, &what)
    }

    async fn ticker_list(
        &self,
        symbol: &str,
        resource: &str,
        key: &str,
        pairs: &[(&str, &str)],
    ) -> Result<RawRows, AdapterFault> {
        let what = format!("{resource} for {symbol}");
        let query = vec![("page", "0".to_string()), ("size", "50".to_string())];
        let body = self
            .get(&format!("tcanalysis/v1/ticker/{symbol}/{resource}"), query, &what)
            .await?;
        project_all(array_at(&body, Some(key), &what)?, pairs, &what)
    }

    async fn overview(&self, symbol: &str) -> Result<RawRows, AdapterFault> {
        let what = format!("overview for {symbol}");
        let body = self
            .get(&format!("tcanalysis/v1/ticker/{symbol}/overview"), Vec::new(), &what)
            .await?;
        let obj = object_at(&body, None, &what)?;
        let row = project(
            obj,
            &[
                ("ticker", "symbol"),
                ("shortName", "company_name"),
                ("companyName", "company_name"),
                ("industry", "industry"),
                ("marketCap", "market_cap"),
                ("pe", "pe_ratio"),
                ("pb", "pb_ratio"),
                ("roe", "roe"),
                ("roa", "roa"),
            ],
        );
        Ok(RawRows::new(vec![row]))
    }

    async fn insider_deals(&self, symbol: &str) -> Result<RawRows, AdapterFault> {
        let mut rows = self
            .company_list(
                symbol,
                "insider-dealing",
                "listInsiderDealing",
                &[
                    ("anDate", "deal_date"),
                    ("dealingAction", "action"),
                    ("quantity", "quantity"),
                    ("price", "price"),
                    ("name", "insider_name"),
                ],
            )
            .await?;
        for row in &mut rows.rows {
            if let Some(action) = row.get_mut("action") {
                *action = deal_action(action);
            }
        }
        Ok(rows)
    }

    async fn statements(
        &self,
        symbol: &str,
        period: Period,
        report_type: Option<ReportType>,
    ) -> Result<RawRows, AdapterFault> {
        let reports = match report_type {
            Some(t) => vec![t],
            None => vec![
                ReportType::IncomeStatement,
                ReportType::BalanceSheet,
                ReportType::CashFlow,
            ],
        };
        let mut merged = PeriodRows::default();
        for report in reports {
            let (resource, pairs) = statement_fields(report);
            let what = format!("{resource} for {symbol}");
            let body = self
                .get(
                    &format!("tcanalysis/v1/finance/{symbol}/{resource}"),
                    finance_query(period),
                    &what,
                )
                .await?;
            for item in array_at(&body, None, &what)? {
                let obj = as_object(item, &what)?;
                let label = period_label(obj, "year", "quarter", period, &what)?;
                merged.merge(label, project(obj, pairs));
            }
        }
        Ok(merged.into_rows())
    }

    async fn ratios(&self, symbol: &str, period: Period) -> Result<RawRows, AdapterFault> {
        let what = format!("financialratio for {symbol}");
        let body = self
            .get(
                &format!("tcanalysis/v1/finance/{symbol}/financialratio"),
                finance_query(period),
                &what,
            )
            .await?;
        let mut rows = Vec::new();
        for item in array_at(&body, None, &what)? {
            let obj = as_object(item, &what)?;
            let mut row = project(
                obj,
                &[
                    ("priceToEarning", "pe_ratio"),
                    ("priceToBook", "pb_ratio"),
                    ("roe", "roe"),
                    ("roa", "roa"),
                    ("earningPerShare", "eps"),
                ],
            );
            let label = period_label(obj, "year", "quarter", period, &what)?;
            row.insert("period".into(), Value::String(label));
            rows.push(row);
        }
        Ok(RawRows::new(rows))
    }

    async fn bars(&self, params: &RequestParams, symbol: &str) -> Result<RawRows, AdapterFault> {
        let interval = params.interval.unwrap_or_default();
        let path = if interval.is_intraday() {
            "stock-insight/v1/stock/bars"
        } else {
            "stock-insight/v1/stock/bars-long-term"
        };
        let mut query: Query = vec![
            ("ticker", symbol.to_string()),
            ("type", "stock".to_string()),
            ("resolution", resolution(interval).to_string()),
        ];
        match params.date_range.as_ref() {
            Some(range) => {
                let (from, to) = range_epochs(range);
                query.push(("from", from.to_string()));
                query.push(("to", to.to_string()));
            }
            None => query.push(("countBack", DEFAULT_COUNT_BACK.to_string())),
        }
        let what = format!("{} bars for {symbol}", interval.as_str());
        let body = self.get(path, query, &what).await?;
        project_all(
            array_at(&body, Some("data"), &what)?,
            &[
                ("tradingDate", "time"),
                ("open", "open"),
                ("high", "high"),
                ("low", "low"),
                ("close", "close"),
                ("volume", "volume"),
            ],
            &what,
        )
    }

    async fn ticks(&self, symbol: &str) -> Result<RawRows, AdapterFault> {
        let what = format!("intraday ticks for {symbol}");
        let query = vec![("page", "0".to_string()), ("size", TICK_PAGE_SIZE.to_string())];
        let body = self
            .get(&format!("stock-insight/v1/intraday/{symbol}/his/paging"), query, &what)
            .await?;
        let day = body
            .get("d")
            .and_then(Value::as_str)
            .ok_or_else(|| AdapterFault::malformed(format!("{what}: missing trading day `d`")))?;
        let mut rows = Vec::new();
        for item in array_at(&body, Some("data"), &what)? {
            let obj = as_object(item, &what)?;
            let mut row = project(obj, &[("p", "price"), ("v", "volume"), ("a", "match_type")]);
            if let Some(t) = obj.get("t").and_then(Value::as_str) {
                row.insert("time".into(), Value::String(format!("{day} {t}")));
            }
            rows.push(row);
        }
        Ok(RawRows::new(rows))
    }

    async fn price_board(&self, symbol: &str) -> Result<RawRows, AdapterFault> {
        let what = format!("price board for {symbol}");
        let body = self
            .get(
                "stock-insight/v1/stock/second-tc-price",
                vec![("tickers", symbol.to_string())],
                &what,
            )
            .await?;
        project_all(
            array_at(&body, Some("data"), &what)?,
            &[
                ("t", "symbol"),
                ("cp", "price"),
                ("tv", "volume"),
                ("re", "reference_price"),
                ("ce", "ceiling_price"),
                ("fl", "floor_price"),
            ],
            &what,
        )
    }

    async fn funds(&self, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let what = "fund listing";
        let mut query: Query = vec![("page", "1".to_string()), ("pageSize", "100".to_string())];
        if let Some(t) = params.fund_type {
            query.push(("fundAssetType", t.as_str().to_string()));
        }
        let body = self.get("fund/v1/funds", query, what).await?;
        project_all(
            array_at(&body, Some("items"), what)?,
            &[
                ("shortName", "symbol"),
                ("name", "fund_name"),
                ("dataFundAssetType.code", "fund_type"),
                ("nav", "nav"),
                ("totalAsset", "total_assets"),
            ],
            what,
        )
    }

    async fn exchange_rates(&self, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let what = "exchange rates";
        let mut query = Query::new();
        if let Some(range) = params.date_range.as_ref() {
            query.push(("fromDate", range.start().to_string()));
            query.push(("toDate", range.end().to_string()));
        }
        let body = self.get("tcanalysis/v1/exchange-rate", query, what).await?;
        project_all(
            array_at(&body, Some("data"), what)?,
            &[
                ("currency", "currency"),
                ("buyCash", "buy_rate"),
                ("buyTransfer", "buy_rate"),
                ("sell", "sell_rate"),
                ("date", "date"),
            ],
            what,
        )
    }
}

#[async_trait]
impl VnConnector for TcbsConnector {
    fn name(&self) -> &'static str {
        "vnfin-tcbs"
    }

    fn vendor(&self) -> &'static str {
        "TCBS"
    }

    fn supports(&self, domain: Domain) -> bool {
        SUPPORTED.contains(&domain)
    }

    async fn fetch(
        &self,
        domain: Domain,
        params: &RequestParams,
    ) -> Result<RawRows, AdapterFault> {
        let rows = match domain {
            Domain::CompanyOverview => self.overview(require_symbol(params, domain)?).await?,
            Domain::CompanyNews => {
                self.ticker_list(
                    require_symbol(params, domain)?,
                    "activity-news",
                    "listActivityNews",
                    &[
                        ("title", "title"),
                        ("publishDate", "publish_date"),
                        ("source", "source"),
                    ],
                )
                .await?
            }
            Domain::CompanyEvents => {
                self.ticker_list(
                    require_symbol(params, domain)?,
                    "events-news",
                    "listEventNews",
                    &[
                        ("eventName", "event_type"),
                        ("eventCode", "event_type"),
                        ("notifyDate", "event_date"),
                        ("title", "description"),
                    ],
                )
                .await?
            }
            Domain::Shareholders => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "large-share-holders",
                    "listShareHolder",
                    &[
                        ("name", "shareholder_name"),
                        ("ownPercent", "ownership_percentage"),
                        ("quantity", "share_quantity"),
                    ],
                )
                .await?
            }
            Domain::Officers => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "key-officers",
                    "listKeyOfficer",
                    &[("name", "name"), ("position", "position")],
                )
                .await?
            }
            Domain::Subsidiaries => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "sub-companies",
                    "listSubCompany",
                    &[
                        ("companyName", "subsidiary_name"),
                        ("ownPercent", "ownership_percentage"),
                        ("businessType", "business_type"),
                    ],
                )
                .await?
            }
            Domain::Dividends => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "dividend-payment-histories",
                    "listDividendPaymentHis",
                    &[
                        ("exerciseDate", "exercise_date"),
                        ("cashYear", "cash_year"),
                        ("cashDividendPercentage", "dividend_ratio"),
                        ("issueMethod", "issue_method"),
                    ],
                )
                .await?
            }
            Domain::InsiderDeals => self.insider_deals(require_symbol(params, domain)?).await?,
            Domain::FinancialStatement => {
                self.statements(
                    require_symbol(params, domain)?,
                    params.period.unwrap_or_default(),
                    params.report_type,
                )
                .await?
            }
            Domain::FinancialRatio => {
                self.ratios(require_symbol(params, domain)?, params.period.unwrap_or_default())
                    .await?
            }
            Domain::QuoteHistory => self.bars(params, require_symbol(params, domain)?).await?,
            Domain::IntradayTicks => self.ticks(require_symbol(params, domain)?).await?,
            Domain::PriceBoard => self.price_board(require_symbol(params, domain)?).await?,
            Domain::FundListing => self.funds(params).await?,
            Domain::ExchangeRate => self.exchange_rates(params).await?,
            other => return Err(AdapterFault::unsupported(other)),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "vnfin::tcbs",
            domain = %domain,
            rows = rows.len(),
            "reshaped TCBS payload"
        );

        Ok(rows.with_percent_scale(PercentScale::Fraction))
    }
}

fn as_object<'a>(item: &'a Value, what: &str) -> Result<&'a Map<String, Value>, AdapterFault> {
    item.as_object()
        .ok_or_else(|| AdapterFault::malformed(format!("{what}: item is not an object")))
}

/// TCBS encodes insider deal direction as `0` (buy) and `1` (sell).
fn deal_action(raw: &Value) -> Value {
    let code = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return raw.clone(),
    };
    match code.as_str() {
        "0" => Value::from("buy"),
        "1" => Value::from("sell"),
        _ => raw.clone(),
    }
}

const fn resolution(interval: Interval) -> &'static str {
    match interval {
        Interval::M1 => "1",
        Interval::M5 => "5",
        Interval::M15 => "15",
        Interval::M30 => "30",
        Interval::H1 => "60",
        Interval::D1 => "D",
        Interval::W1 => "W",
        Interval::Mo1 => "M",
    }
}

fn finance_query(period: Period) -> Query {
    let yearly = match period {
        Period::Year => "1",
        Period::Quarter => "0",
    };
    vec![("yearly", yearly.to_string()), ("isAll", "true".to_string())]
}

fn statement_fields(report: ReportType) -> (&'static str, &'static [(&'static str, &'static str)]) {
    match report {
        ReportType::IncomeStatement => (
            "incomestatement",
            &[
                ("revenue", "revenue"),
                ("preTaxProfit", "profit_before_tax"),
                ("postTaxProfit", "net_profit"),
            ],
        ),
        ReportType::BalanceSheet => (
            "balancesheet",
            &[("asset", "total_assets"), ("equity", "total_equity")],
        ),
        ReportType::CashFlow => ("cashflow", &[("fromSale", "operating_cash_flow")]),
    }
}

/// Statement rows keyed by period, in first-seen order.
#[derive(Default)]
struct PeriodRows {
    order: Vec<RawRow>,
    index: HashMap<String, usize>,
}

impl PeriodRows {
    fn merge(&mut self, period: String, fields: RawRow) {
        let idx = *self.index.entry(period.clone()).or_insert_with(|| {
            let mut row = RawRow::new();
            row.insert("period".into(), Value::String(period));
            self.order.push(row);
            self.order.len() - 1
        });
        for (k, v) in fields {
            self.order[idx].entry(k).or_insert(v);
        }
    }

    fn into_rows(self) -> RawRows {
        RawRows::new(self.order)
    }
}

//! vnfin-vci
//!
//! Connector that implements `VnConnector` on top of a VCI-style JSON API.
//! Serves company profile data, financial statements and ratios, columnar
//! OHLC history, symbol listings, the ICB industry taxonomy, open-ended fund
//! data, gold prices and exchange rates. VCI reports percentages on the
//! 0-100 scale, so rows are declared [`PercentScale::Percent`].
//!
//! The HTTP client is not part of this crate: supply a [`VciApi`]
//! implementation to [`VciConnector::with_api`].
#![warn(missing_docs)]

/// Transport abstraction used by the connector.
pub mod adapter;
mod icb;

use std::sync::Arc;

pub use adapter::VciApi;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use vnfin_core::transport::{
    array_at, int_at, normalize_transport_error, object_at, period_label, project, project_all,
    range_epochs, require_symbol,
};
use vnfin_core::{
    AdapterFault, AdapterFaultKind, ConnectorKey, Domain, Interval, PercentScale, Period, RawRow,
    RawRows, ReportType, RequestParams, VnConnector,
};

const SUPPORTED: &[Domain] = &[
    Domain::CompanyOverview,
    Domain::CompanyNews,
    Domain::CompanyEvents,
    Domain::Shareholders,
    Domain::Officers,
    Domain::Subsidiaries,
    Domain::FinancialStatement,
    Domain::FinancialRatio,
    Domain::QuoteHistory,
    Domain::SymbolListing,
    Domain::IndustryTaxonomy,
    Domain::FundListing,
    Domain::FundNavReport,
    Domain::FundTopHolding,
    Domain::FundIndustryHolding,
    Domain::FundAssetHolding,
    Domain::GoldPrice,
    Domain::ExchangeRate,
];

/// Bars requested when no date range is given.
const DEFAULT_COUNT_BACK: u32 = 365;

const INCOME_CODES: &[(&str, &str)] = &[
    ("isa3", "revenue"),
    ("isa16", "profit_before_tax"),
    ("isa20", "net_profit"),
];
const BALANCE_CODES: &[(&str, &str)] = &[("bsa53", "total_assets"), ("bsa78", "total_equity")];
const CASH_FLOW_CODES: &[(&str, &str)] = &[("cfa18", "operating_cash_flow")];

/// Public connector implementation backed by a VCI-style API.
pub struct VciConnector {
    api: Arc<dyn VciApi>,
}

impl std::fmt::Debug for VciConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VciConnector").finish_non_exhaustive()
    }
}

impl VciConnector {
    /// Static connector key for routing policy configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("vnfin-vci");

    /// Build on top of a transport.
    #[must_use]
    pub fn with_api(api: Arc<dyn VciApi>) -> Self {
        Self { api }
    }

    async fn post(&self, path: &str, body: Value, what: &str) -> Result<Value, AdapterFault> {
        self.api
            .post_json(path, &body)
            .await
            .map_err(|e| normalize_transport_error(e, what))
    }

    async fn company_list(
        &self,
        symbol: &str,
        resource: &str,
        pairs: &[(&str, &str)],
    ) -> Result<RawRows, AdapterFault> {
        let what = format!("{resource} for {symbol}");
        let body = self
            .post(&format!("company/{resource}"), json!({ "symbol": symbol }), &what)
            .await?;
        project_all(array_at(&body, Some("data"), &what)?, pairs, &what)
    }

    async fn overview(&self, symbol: &str) -> Result<RawRows, AdapterFault> {
        let what = format!("overview for {symbol}");
        let body = self
            .post("company/overview", json!({ "symbol": symbol }), &what)
            .await?;
        let profile = object_at(&body, Some("profile"), &what)?;
        let mut row = project(
            profile,
            &[
                ("ticker", "symbol"),
                ("organName", "company_name"),
                ("organShortName", "company_name"),
                ("icbName3", "industry"),
                ("icbName2", "industry"),
            ],
        );
        // ratioSummary is a list of {itemCode, value}; absent means no ratios yet.
        if let Some(items) = body.get("ratioSummary").and_then(Value::as_array) {
            for item in items {
                let code = item.get("itemCode").and_then(Value::as_str);
                let Some(field) = code.and_then(summary_field) else {
                    continue;
                };
                if let Some(v) = item.get("value").filter(|v| !v.is_null()) {
                    row.insert(field.to_string(), v.clone());
                }
            }
        }
        Ok(RawRows::new(vec![row]))
    }

    async fn statements(
        &self,
        symbol: &str,
        period: Period,
        report_type: Option<ReportType>,
    ) -> Result<RawRows, AdapterFault> {
        let what = format!("financial statements for {symbol}");
        let codes: Vec<(&str, &str)> = match report_type {
            Some(ReportType::IncomeStatement) => INCOME_CODES.to_vec(),
            Some(ReportType::BalanceSheet) => BALANCE_CODES.to_vec(),
            Some(ReportType::CashFlow) => CASH_FLOW_CODES.to_vec(),
            None => [INCOME_CODES, BALANCE_CODES, CASH_FLOW_CODES].concat(),
        };
        let body = self
            .post(
                "financial/statement",
                json!({ "symbol": symbol, "period": period_code(period) }),
                &what,
            )
            .await?;
        period_rows(&body, period, &codes, &what)
    }

    async fn ratios(&self, symbol: &str, period: Period) -> Result<RawRows, AdapterFault> {
        let what = format!("financial ratios for {symbol}");
        let body = self
            .post(
                "financial/ratio",
                json!({ "symbol": symbol, "period": period_code(period) }),
                &what,
            )
            .await?;
        period_rows(
            &body,
            period,
            &[
                ("pe", "pe_ratio"),
                ("pb", "pb_ratio"),
                ("roe", "roe"),
                ("roa", "roa"),
                ("eps", "eps"),
            ],
            &what,
        )
    }

    async fn ohlc(&self, params: &RequestParams, symbol: &str) -> Result<RawRows, AdapterFault> {
        let interval = params.interval.unwrap_or_default();
        let Some(frame) = time_frame(interval) else {
            return Err(AdapterFault::new(
                AdapterFaultKind::Unsupported,
                format!("VCI has no {} bars", interval.as_str()),
            ));
        };
        let mut req = json!({ "timeFrame": frame, "symbols": [symbol] });
        match params.date_range.as_ref() {
            Some(range) => {
                let (from, to) = range_epochs(range);
                req["from"] = json!(from);
                req["to"] = json!(to);
            }
            None => req["countBack"] = json!(DEFAULT_COUNT_BACK),
        }
        let what = format!("{} bars for {symbol}", interval.as_str());
        let body = self.post("chart/OHLCChart/gap", req, &what).await?;
        let series = array_at(&body, None, &what)?;
        let chart = series
            .iter()
            .filter_map(Value::as_object)
            .find(|o| o.get("symbol").and_then(Value::as_str).is_none_or(|s| s == symbol))
            .ok_or_else(|| AdapterFault::not_found(what.clone()))?;
        columns_to_rows(
            chart,
            &[
                ("t", "time"),
                ("o", "open"),
                ("h", "high"),
                ("l", "low"),
                ("c", "close"),
                ("v", "volume"),
            ],
            &what,
        )
    }

    async fn listing(&self, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let what = "symbol listing";
        let mut req = json!({});
        if let Some(ex) = params.exchange {
            req["exchange"] = json!(ex.as_str());
        }
        if let Some(group) = params.group.as_deref() {
            req["group"] = json!(group);
        }
        let body = self.post("price/symbols/getAll", req, what).await?;
        let items = array_at(&body, None, what)?;
        let pairs = &[
            ("symbol", "symbol"),
            ("organName", "company_name"),
            ("organShortName", "company_name"),
            ("board", "exchange"),
            ("icbName", "industry"),
        ];
        let Some(code) = params.industry.as_deref() else {
            return project_all(items, pairs, what);
        };
        let picked: Vec<Value> = items
            .iter()
            .filter(|item| in_industry(item, code))
            .cloned()
            .collect();
        if picked.is_empty() {
            return Err(AdapterFault::empty(format!("{what}: no symbols under ICB {code}")));
        }
        project_all(&picked, pairs, what)
    }

    async fn industries(&self) -> Result<RawRows, AdapterFault> {
        let what = "ICB industries";
        let body = self.post("price/symbols/getAllIcb", json!({}), what).await?;
        icb::leaf_paths(array_at(&body, None, what)?, what)
    }

    async fn funds(&self, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let what = "fund listing";
        let mut req = json!({ "pageSize": 100, "page": 1 });
        if let Some(t) = params.fund_type {
            req["fundAssetTypes"] = json!([t.as_str()]);
        }
        let body = self.post("fund/filter", req, what).await?;
        let data = object_at(&body, Some("data"), what)?;
        let rows = data
            .get("rows")
            .ok_or_else(|| AdapterFault::malformed(format!("{what}: missing `rows`")))?;
        project_all(
            array_at(rows, None, what)?,
            &[
                ("shortName", "symbol"),
                ("name", "fund_name"),
                ("details.fundType", "fund_type"),
                ("details.nav", "nav"),
                ("details.totalAsset", "total_assets"),
            ],
            what,
        )
    }

    async fn fund_resource(
        &self,
        symbol: &str,
        resource: &str,
        pairs: &[(&str, &str)],
    ) -> Result<RawRows, AdapterFault> {
        let what = format!("{resource} for {symbol}");
        let body = self
            .post(&format!("fund/{symbol}/{resource}"), json!({}), &what)
            .await?;
        project_all(array_at(&body, Some("data"), &what)?, pairs, &what)
    }

    async fn fund_top_holding(&self, symbol: &str) -> Result<RawRows, AdapterFault> {
        let what = format!("top-holding for {symbol}");
        let body = self
            .post(&format!("fund/{symbol}/top-holding"), json!({}), &what)
            .await?;
        let data = object_at(&body, Some("data"), &what)?;
        let as_of = data.get("updateAt").cloned().filter(|v| !v.is_null());
        let pairs = [
            ("stockCode", "name"),
            ("industry", "industry"),
            ("netAssetPercent", "percentage"),
        ];
        let mut rows = Vec::new();
        for list in ["stockHoldings", "bondHoldings"] {
            let Some(items) = data.get(list).and_then(Value::as_array) else {
                continue;
            };
            let mut part = project_all(items, &pairs, &what)?.rows;
            if let Some(date) = &as_of {
                for row in &mut part {
                    row.insert("date".into(), date.clone());
                }
            }
            rows.append(&mut part);
        }
        if rows.is_empty() {
            return Err(AdapterFault::empty(format!("{what}: no holdings")));
        }
        Ok(RawRows::new(rows))
    }

    async fn gold(&self, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let what = "gold prices";
        let body = self.post("commodity/gold", date_body(params), what).await?;
        project_all(
            array_at(&body, Some("data"), what)?,
            &[
                ("name", "type"),
                ("buyPrice", "buy_price"),
                ("sellPrice", "sell_price"),
                ("date", "date"),
            ],
            what,
        )
    }

    async fn exchange_rates(&self, params: &RequestParams) -> Result<RawRows, AdapterFault> {
        let what = "exchange rates";
        let body = self
            .post("commodity/exchange-rate", date_body(params), what)
            .await?;
        project_all(
            array_at(&body, Some("data"), what)?,
            &[
                ("currencyCode", "currency"),
                ("buyCash", "buy_rate"),
                ("sell", "sell_rate"),
                ("reportDate", "date"),
            ],
            what,
        )
    }
}

/// Whether a listing item sits under ICB `code` at any of the four levels.
fn in_industry(item: &Value, code: &str) -> bool {
    (1..=4).any(|level| match item.get(format!("icbCode{level}")) {
        Some(Value::String(s)) => s.trim() == code,
        Some(Value::Number(n)) => n.to_string() == code,
        _ => false,
    })
}

#[async_trait]
impl VnConnector for VciConnector {
    fn name(&self) -> &'static str {
        "vnfin-vci"
    }

    fn vendor(&self) -> &'static str {
        "VCI"
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
                self.company_list(
                    require_symbol(params, domain)?,
                    "news",
                    &[
                        ("newsTitle", "title"),
                        ("publicDate", "publish_date"),
                        ("newsShortContent", "content"),
                        ("newsSourceLink", "source"),
                    ],
                )
                .await?
            }
            Domain::CompanyEvents => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "events",
                    &[
                        ("eventType", "event_type"),
                        ("event", "event_type"),
                        ("publicDate", "event_date"),
                        ("issueDate", "event_date"),
                        ("eventTitle", "description"),
                        ("status", "status"),
                    ],
                )
                .await?
            }
            Domain::Shareholders => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "shareholders",
                    &[
                        ("ownerFullName", "shareholder_name"),
                        ("percentage", "ownership_percentage"),
                        ("quantity", "share_quantity"),
                    ],
                )
                .await?
            }
            Domain::Officers => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "officers",
                    &[
                        ("fullName", "name"),
                        ("positionName", "position"),
                        ("status", "status"),
                        ("appointedDate", "appointment_date"),
                    ],
                )
                .await?
            }
            Domain::Subsidiaries => {
                self.company_list(
                    require_symbol(params, domain)?,
                    "subsidiaries",
                    &[
                        ("organName", "subsidiary_name"),
                        ("percentage", "ownership_percentage"),
                        ("type", "business_type"),
                    ],
                )
                .await?
            }
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
            Domain::QuoteHistory => self.ohlc(params, require_symbol(params, domain)?).await?,
            Domain::SymbolListing => self.listing(params).await?,
            Domain::IndustryTaxonomy => self.industries().await?,
            Domain::FundListing => self.funds(params).await?,
            Domain::FundNavReport => {
                self.fund_resource(
                    require_symbol(params, domain)?,
                    "nav-report",
                    &[("navDate", "date"), ("nav", "nav")],
                )
                .await?
            }
            Domain::FundTopHolding => {
                self.fund_top_holding(require_symbol(params, domain)?).await?
            }
            Domain::FundIndustryHolding => {
                self.fund_resource(
                    require_symbol(params, domain)?,
                    "industry-holding",
                    &[("industry", "name"), ("assetPercent", "percentage")],
                )
                .await?
            }
            Domain::FundAssetHolding => {
                self.fund_resource(
                    require_symbol(params, domain)?,
                    "asset-holding",
                    &[("assetType.name", "name"), ("assetPercent", "percentage")],
                )
                .await?
            }
            Domain::GoldPrice => self.gold(params).await?,
            Domain::ExchangeRate => self.exchange_rates(params).await?,
            other => return Err(AdapterFault::unsupported(other)),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "vnfin::vci",
            domain = %domain,
            rows = rows.len(),
            "reshaped VCI payload"
        );

        Ok(rows.with_percent_scale(PercentScale::Percent))
    }
}

fn as_object<'a>(item: &'a Value, what: &str) -> Result<&'a Map<String, Value>, AdapterFault> {
    item.as_object()
        .ok_or_else(|| AdapterFault::malformed(format!("{what}: item is not an object")))
}

fn period_rows(
    body: &Value,
    period: Period,
    pairs: &[(&str, &str)],
    what: &str,
) -> Result<RawRows, AdapterFault> {
    let mut rows = Vec::new();
    for item in array_at(body, Some("data"), what)? {
        let obj = as_object(item, what)?;
        // Yearly rows carry lengthReport 5; keep only the requested cadence.
        let yearly = int_at(obj, "lengthReport").is_none_or(|l| l == 5);
        if yearly != matches!(period, Period::Year) {
            continue;
        }
        let mut row = project(obj, pairs);
        let label = period_label(obj, "yearReport", "lengthReport", period, what)?;
        row.insert("period".into(), Value::String(label));
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(AdapterFault::empty(format!("{what}: no rows for the requested period")));
    }
    Ok(RawRows::new(rows))
}

fn summary_field(code: &str) -> Option<&'static str> {
    match code {
        "MARKET_CAP" => Some("market_cap"),
        "PE" => Some("pe_ratio"),
        "PB" => Some("pb_ratio"),
        "ROE" => Some("roe"),
        "ROA" => Some("roa"),
        _ => None,
    }
}

const fn period_code(period: Period) -> &'static str {
    match period {
        Period::Year => "Y",
        Period::Quarter => "Q",
    }
}

/// VCI charts only come in minute, hour and day frames.
const fn time_frame(interval: Interval) -> Option<&'static str> {
    match interval {
        Interval::M1 => Some("ONE_MINUTE"),
        Interval::H1 => Some("ONE_HOUR"),
        Interval::D1 => Some("ONE_DAY"),
        Interval::M5 | Interval::M15 | Interval::M30 | Interval::W1 | Interval::Mo1 => None,
    }
}

fn date_body(params: &RequestParams) -> Value {
    match params.date_range.as_ref() {
        Some(range) => json!({
            "fromDate": range.start().to_string(),
            "toDate": range.end().to_string(),
        }),
        None => json!({}),
    }
}

/// Turn `{t: [...], o: [...], ...}` into one row per index.
///
/// Every listed column must be present and all must have the same length.
fn columns_to_rows(
    chart: &Map<String, Value>,
    columns: &[(&str, &str)],
    what: &str,
) -> Result<RawRows, AdapterFault> {
    let mut arrays = Vec::with_capacity(columns.len());
    for (native, canonical) in columns {
        let values = chart
            .get(*native)
            .and_then(Value::as_array)
            .ok_or_else(|| AdapterFault::malformed(format!("{what}: missing column `{native}`")))?;
        arrays.push((*canonical, values));
    }
    let len = arrays.first().map_or(0, |(_, v)| v.len());
    if let Some((name, v)) = arrays.iter().find(|(_, v)| v.len() != len) {
        return Err(AdapterFault::malformed(format!(
            "{what}: column `{name}` has {} values, expected {len}",
            v.len()
        )));
    }
    if len == 0 {
        return Err(AdapterFault::empty(format!("{what}: no bars")));
    }
    let rows = (0..len)
        .map(|i| {
            arrays
                .iter()
                .map(|(name, values)| ((*name).to_string(), values[i].clone()))
                .collect::<RawRow>()
        })
        .collect();
    Ok(RawRows::new(rows))
}

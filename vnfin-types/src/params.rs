//! Request parameters shared by the facade and every connector.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Domain, VnError};

/// Reporting cadence for financial statements and ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Fiscal-year figures.
    #[default]
    Year,
    /// Fiscal-quarter figures.
    Quarter,
}

/// Financial statement selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Revenue and profit lines.
    IncomeStatement,
    /// Assets and equity lines.
    BalanceSheet,
    /// Operating cash flow lines.
    CashFlow,
}

/// Bar cadence for quote history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    /// One minute.
    #[serde(rename = "1m")]
    M1,
    /// Five minutes.
    #[serde(rename = "5m")]
    M5,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    M15,
    /// Thirty minutes.
    #[serde(rename = "30m")]
    M30,
    /// One hour.
    #[serde(rename = "1H")]
    H1,
    /// One trading day.
    #[default]
    #[serde(rename = "1D")]
    D1,
    /// One week.
    #[serde(rename = "1W")]
    W1,
    /// One month.
    #[serde(rename = "1M")]
    Mo1,
}

impl Interval {
    /// Provider-facing label (`"1m"`, `"1H"`, `"1D"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1H",
            Self::D1 => "1D",
            Self::W1 => "1W",
            Self::Mo1 => "1M",
        }
    }

    /// Sub-daily cadences keep time-of-day in bar timestamps.
    #[must_use]
    pub const fn is_intraday(self) -> bool {
        matches!(self, Self::M1 | Self::M5 | Self::M15 | Self::M30 | Self::H1)
    }
}

/// Stock exchanges (boards) known to the listing schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    /// Ho Chi Minh City Stock Exchange.
    Hose,
    /// Hanoi Stock Exchange.
    Hnx,
    /// Unlisted public company market.
    Upcom,
    /// Over the counter.
    Otc,
    /// Delisted securities.
    Delisted,
}

impl Exchange {
    /// Canonical upper-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hose => "HOSE",
            Self::Hnx => "HNX",
            Self::Upcom => "UPCOM",
            Self::Otc => "OTC",
            Self::Delisted => "DELISTED",
        }
    }
}

/// Fund classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundType {
    /// Equity fund.
    Stock,
    /// Mixed equity/bond fund.
    Balanced,
    /// Fixed-income fund.
    Bond,
    /// Money market fund.
    MoneyMarket,
}

impl FundType {
    /// Canonical upper-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "STOCK",
            Self::Balanced => "BALANCED",
            Self::Bond => "BOND",
            Self::MoneyMarket => "MONEY_MARKET",
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the start date is after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, VnError> {
        if start > end {
            return Err(VnError::InvalidArg(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Inclusive end.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Logical request parameters. Every field is optional; which ones matter
/// depends on the [`Domain`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestParams {
    /// Ticker or fund code, upper-cased on construction.
    pub symbol: Option<String>,
    /// Reporting cadence for statements and ratios.
    pub period: Option<Period>,
    /// Inclusive date window for time series.
    pub date_range: Option<DateRange>,
    /// Statement selector; `None` fetches every statement the provider has.
    pub report_type: Option<ReportType>,
    /// Quote cadence.
    pub interval: Option<Interval>,
    /// Listing filter by exchange.
    pub exchange: Option<Exchange>,
    /// Listing filter by index group (e.g. `VN30`).
    pub group: Option<String>,
    /// Listing filter by ICB code at any level (e.g. `8300`).
    pub industry: Option<String>,
    /// Fund listing filter.
    pub fund_type: Option<FundType>,
    /// Overall deadline for the request, measured from the facade call.
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl RequestParams {
    /// Empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for a symbol-scoped request.
    #[must_use]
    pub fn for_symbol(symbol: &str) -> Self {
        Self::default().symbol(symbol)
    }

    /// Set the symbol (trimmed and upper-cased).
    #[must_use]
    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.trim().to_ascii_uppercase());
        self
    }

    /// Set the reporting cadence.
    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Set the date window.
    #[must_use]
    pub const fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Set the statement selector.
    #[must_use]
    pub const fn report_type(mut self, report_type: ReportType) -> Self {
        self.report_type = Some(report_type);
        self
    }

    /// Set the quote cadence.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the exchange filter.
    #[must_use]
    pub const fn exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// Set the index-group filter.
    #[must_use]
    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.trim().to_ascii_uppercase());
        self
    }

    /// Set the ICB industry filter.
    #[must_use]
    pub fn industry(mut self, icb_code: &str) -> Self {
        self.industry = Some(icb_code.trim().to_string());
        self
    }

    /// Set the fund type filter.
    #[must_use]
    pub const fn fund_type(mut self, fund_type: FundType) -> Self {
        self.fund_type = Some(fund_type);
        self
    }

    /// Set the overall request deadline.
    #[must_use]
    pub const fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Symbol or an `InvalidArg` error naming the domain.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no (non-empty) symbol was supplied.
    pub fn require_symbol(&self, domain: Domain) -> Result<&str, VnError> {
        match self.symbol.as_deref() {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(VnError::InvalidArg(format!("{domain} requires a symbol"))),
        }
    }

    /// Check that the parameters are usable for `domain`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a missing symbol on symbol-scoped domains.
    pub fn validate_for(&self, domain: Domain) -> Result<(), VnError> {
        if domain.requires_symbol() {
            self.require_symbol(domain)?;
        }
        Ok(())
    }

    /// Whether quote timestamps should keep time-of-day.
    #[must_use]
    pub fn is_intraday(&self) -> bool {
        self.interval.is_some_and(Interval::is_intraday)
    }
}

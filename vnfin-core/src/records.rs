//! Typed, immutable views of canonical rows.
//!
//! Field names and value shapes mirror the schemas in [`crate::schema`];
//! [`CanonicalTable::records`](crate::CanonicalTable::records) is the only
//! way these are built from provider data.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vnfin_types::{Domain, Exchange, FundType};

/// A record type readable from canonical tables of the listed domains.
pub trait Record: DeserializeOwned {
    /// Domains whose rows project into this type.
    const DOMAINS: &'static [Domain];
}

macro_rules! record_domains {
    ($ty:ty => $($domain:ident),+) => {
        impl Record for $ty {
            const DOMAINS: &'static [Domain] = &[$(Domain::$domain),+];
        }
    };
}

/// Company profile with headline valuation ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub symbol: String,
    pub company_name: String,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    /// Fractional ratio (0.18 = 18%).
    pub roe: Option<f64>,
    /// Fractional ratio.
    pub roa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyNewsItem {
    pub title: String,
    pub publish_date: NaiveDate,
    pub content: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEvent {
    pub event_type: String,
    pub event_date: NaiveDate,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareholderEntry {
    pub shareholder_name: String,
    /// Percent of outstanding shares, 0-100.
    pub ownership_percentage: f64,
    pub share_quantity: Option<u64>,
}

/// Employment status of an officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfficerStatus {
    Working,
    Resigned,
    Retired,
    Deceased,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficerEntry {
    pub name: String,
    pub position: Option<String>,
    pub status: Option<OfficerStatus>,
    pub appointment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidiaryEntry {
    pub subsidiary_name: String,
    /// Percent owned by the parent, 0-100.
    pub ownership_percentage: f64,
    pub business_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEntry {
    pub exercise_date: NaiveDate,
    pub cash_year: i32,
    /// Percent of par value.
    pub dividend_ratio: Option<f64>,
    pub issue_method: Option<String>,
}

/// Direction of an insider deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderDeal {
    pub deal_date: NaiveDate,
    pub action: DealAction,
    pub quantity: u64,
    pub insider_name: Option<String>,
    pub price: Option<f64>,
}

/// Statement lines for one fiscal period (`"2023"` or `"2023-Q1"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    pub period: String,
    pub revenue: Option<f64>,
    pub profit_before_tax: Option<f64>,
    pub net_profit: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_equity: Option<f64>,
    pub operating_cash_flow: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatioEntry {
    pub period: String,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub eps: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub symbol: String,
    pub fund_name: String,
    pub fund_type: FundType,
    pub nav: Option<f64>,
    pub total_assets: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundNavPoint {
    pub date: NaiveDate,
    pub nav: f64,
}

/// A fund allocation line: a stock, an industry or an asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundHolding {
    pub name: String,
    pub percentage: f64,
    #[serde(default)]
    pub industry: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Bar timestamp: a trading day, or a date-time for intraday cadences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl BarTime {
    /// Trading day of the bar.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBar {
    pub time: BarTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Side that initiated an intraday match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Buy,
    Sell,
    Ato,
    Atc,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayTick {
    pub time: NaiveDateTime,
    pub price: f64,
    pub volume: u64,
    pub match_type: Option<MatchType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBoardEntry {
    pub symbol: String,
    pub price: f64,
    pub volume: u64,
    pub reference_price: Option<f64>,
    pub ceiling_price: Option<f64>,
    pub floor_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldPriceQuote {
    pub date: NaiveDate,
    pub buy_price: f64,
    pub sell_price: f64,
    /// Product line, e.g. "SJC".
    #[serde(rename = "type")]
    pub gold_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateQuote {
    pub currency: String,
    pub buy_rate: f64,
    pub sell_rate: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryTaxonomyEntry {
    pub icb_code1: String,
    pub icb_name1: String,
    pub icb_code2: String,
    pub icb_name2: String,
    pub icb_code3: Option<String>,
    pub icb_name3: Option<String>,
    pub icb_code4: Option<String>,
    pub icb_name4: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolListingEntry {
    pub symbol: String,
    pub company_name: String,
    pub exchange: Exchange,
    pub industry: Option<String>,
}

record_domains!(CompanyOverview => CompanyOverview);
record_domains!(CompanyNewsItem => CompanyNews);
record_domains!(CompanyEvent => CompanyEvents);
record_domains!(ShareholderEntry => Shareholders);
record_domains!(OfficerEntry => Officers);
record_domains!(SubsidiaryEntry => Subsidiaries);
record_domains!(DividendEntry => Dividends);
record_domains!(InsiderDeal => InsiderDeals);
record_domains!(FinancialPeriod => FinancialStatement);
record_domains!(FinancialRatioEntry => FinancialRatio);
record_domains!(FundRecord => FundListing);
record_domains!(FundNavPoint => FundNavReport);
record_domains!(FundHolding => FundTopHolding, FundIndustryHolding, FundAssetHolding);
record_domains!(QuoteBar => QuoteHistory);
record_domains!(IntradayTick => IntradayTicks);
record_domains!(PriceBoardEntry => PriceBoard);
record_domains!(GoldPriceQuote => GoldPrice);
record_domains!(ExchangeRateQuote => ExchangeRate);
record_domains!(IndustryTaxonomyEntry => IndustryTaxonomy);
record_domains!(SymbolListingEntry => SymbolListing);

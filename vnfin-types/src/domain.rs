use core::fmt;
use serde::{Deserialize, Serialize};

/// Data domains served by the facade.
///
/// Each domain maps to one canonical schema and one record type. The labels
/// returned by [`Domain::as_str`] are stable and used in logs, errors and
/// routing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// Company profile with headline valuation ratios.
    CompanyOverview,
    /// Company news headlines.
    CompanyNews,
    /// Corporate events (AGMs, dividend rights, listings).
    CompanyEvents,
    /// Major shareholders and their stakes.
    Shareholders,
    /// Key officers and board members.
    Officers,
    /// Subsidiaries and affiliates.
    Subsidiaries,
    /// Cash and stock dividend history.
    Dividends,
    /// Insider trading disclosures.
    InsiderDeals,

    /// Income statement, balance sheet and cash flow items per fiscal period.
    FinancialStatement,
    /// Valuation and profitability ratios per fiscal period.
    FinancialRatio,

    /// Open-ended fund listing.
    FundListing,
    /// Fund: NAV per unit history.
    FundNavReport,
    /// Fund: largest individual holdings.
    FundTopHolding,
    /// Fund: allocation by industry.
    FundIndustryHolding,
    /// Fund: allocation by asset class.
    FundAssetHolding,

    /// Historical OHLCV bars.
    QuoteHistory,
    /// Intraday matched trades.
    IntradayTicks,
    /// Current board snapshot for a symbol.
    PriceBoard,

    /// Domestic gold prices.
    GoldPrice,
    /// Bank exchange rates against VND.
    ExchangeRate,

    /// ICB industry classification tree.
    IndustryTaxonomy,
    /// Listed symbols with exchange and industry.
    SymbolListing,
}

impl Domain {
    /// All domains in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::CompanyOverview,
        Self::CompanyNews,
        Self::CompanyEvents,
        Self::Shareholders,
        Self::Officers,
        Self::Subsidiaries,
        Self::Dividends,
        Self::InsiderDeals,
        Self::FinancialStatement,
        Self::FinancialRatio,
        Self::FundListing,
        Self::FundNavReport,
        Self::FundTopHolding,
        Self::FundIndustryHolding,
        Self::FundAssetHolding,
        Self::QuoteHistory,
        Self::IntradayTicks,
        Self::PriceBoard,
        Self::GoldPrice,
        Self::ExchangeRate,
        Self::IndustryTaxonomy,
        Self::SymbolListing,
    ];

    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompanyOverview => "company-overview",
            Self::CompanyNews => "company-news",
            Self::CompanyEvents => "company-events",
            Self::Shareholders => "shareholders",
            Self::Officers => "officers",
            Self::Subsidiaries => "subsidiaries",
            Self::Dividends => "dividends",
            Self::InsiderDeals => "insider-deals",
            Self::FinancialStatement => "financial-statement",
            Self::FinancialRatio => "financial-ratio",
            Self::FundListing => "fund-listing",
            Self::FundNavReport => "fund-nav-report",
            Self::FundTopHolding => "fund-top-holding",
            Self::FundIndustryHolding => "fund-industry-holding",
            Self::FundAssetHolding => "fund-asset-holding",
            Self::QuoteHistory => "quote-history",
            Self::IntradayTicks => "intraday-ticks",
            Self::PriceBoard => "price-board",
            Self::GoldPrice => "gold-price",
            Self::ExchangeRate => "exchange-rate",
            Self::IndustryTaxonomy => "industry-taxonomy",
            Self::SymbolListing => "symbol-listing",
        }
    }

    /// Whether a request for this domain must name a symbol.
    #[must_use]
    pub const fn requires_symbol(self) -> bool {
        !matches!(
            self,
            Self::FundListing
                | Self::GoldPrice
                | Self::ExchangeRate
                | Self::IndustryTaxonomy
                | Self::SymbolListing
        )
    }

    /// Fund detail sub-resources composed by the facade.
    #[must_use]
    pub const fn is_fund_detail(self) -> bool {
        matches!(
            self,
            Self::FundNavReport
                | Self::FundTopHolding
                | Self::FundIndustryHolding
                | Self::FundAssetHolding
        )
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = crate::VnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::VnError::InvalidArg(format!("unknown domain: {s}")))
    }
}

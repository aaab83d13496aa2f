//! Canonical schema registry.
//!
//! Every [`Domain`] has one [`DomainSchema`]: the ordered canonical fields
//! with their semantic types and nullability, plus row- and table-level
//! rules. [`validate_and_coerce`] turns adapter output into a
//! [`CanonicalTable`] or reports the first violation as a
//! [`ValidationFault`].
//!
//! Coercion rules:
//! - unknown extra fields are dropped, missing optional fields become `null`;
//! - dates become `YYYY-MM-DD`, date-times `YYYY-MM-DDTHH:MM:SS` in
//!   exchange-local time; `Timestamp` fields keep time-of-day only for
//!   intraday requests;
//! - numeric strings are parsed (`"75,000,000"`, `"12.5%"`);
//! - percentages end up on the 0-100 scale according to the rows'
//!   [`PercentScale`];
//! - enums match case-insensitively, including provider synonyms.

mod coerce;
mod rules;

use serde_json::{Map, Value};
use vnfin_types::{Domain, RequestParams, ValidationFault, ValidationFaultKind};

use crate::connector::{PercentScale, RawRow, RawRows};
use crate::table::CanonicalTable;
use coerce::CoerceError;
pub use rules::{RowRule, TableRule};

/// Closed set of canonical values for an enum field.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumSpec {
    /// Label used in error messages.
    pub name: &'static str,
    /// Canonical spellings.
    pub values: &'static [&'static str],
    /// Provider synonyms mapped to canonical spellings.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Value used for unrecognized input; `None` rejects it.
    pub fallback: Option<&'static str>,
}

/// Semantic type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Trimmed string.
    Text,
    /// Upper-cased identifier (tickers, currency codes).
    Code,
    /// Floating point number.
    Number,
    /// Whole number.
    Integer,
    /// Calendar date.
    Date,
    /// Exchange-local date-time.
    DateTime,
    /// Date for daily data, date-time for intraday requests.
    Timestamp,
    /// Percentage on the 0-100 scale.
    Percentage,
    /// One of a closed set of values.
    Enum(&'static EnumSpec),
}

impl FieldType {
    /// Semantic type label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Code => "code",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Percentage => "percentage",
            Self::Enum(_) => "enum",
        }
    }
}

/// One canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field name.
    pub name: &'static str,
    /// Semantic type.
    pub ty: FieldType,
    /// Whether rows without this field are rejected.
    pub required: bool,
}

impl FieldSpec {
    const fn req(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    const fn opt(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

/// Complete schema of one domain.
#[derive(Debug, PartialEq)]
pub struct DomainSchema {
    /// Domain served.
    pub domain: Domain,
    /// Record type name the rows project into.
    pub record: &'static str,
    /// Ordered canonical fields.
    pub fields: &'static [FieldSpec],
    /// Per-row invariants.
    pub row_rules: &'static [RowRule],
    /// Whole-table invariants.
    pub table_rules: &'static [TableRule],
}

impl DomainSchema {
    /// Field spec by canonical name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }
}

/// Options that depend on the request rather than the domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoerceOptions {
    /// Keep time-of-day in `Timestamp` fields.
    pub intraday: bool,
}

impl CoerceOptions {
    /// Options implied by request parameters.
    #[must_use]
    pub fn for_params(params: &RequestParams) -> Self {
        Self {
            intraday: params.is_intraday(),
        }
    }
}

use FieldType::{Code, Date, DateTime, Integer, Number, Percentage, Text, Timestamp};

static OFFICER_STATUS: EnumSpec = EnumSpec {
    name: "officer status",
    values: &["working", "resigned", "retired", "deceased", "unknown"],
    aliases: &[
        ("active", "working"),
        ("in_office", "working"),
        ("dang_lam_viec", "working"),
        ("da_nghi", "resigned"),
        ("nghi_huu", "retired"),
    ],
    fallback: Some("unknown"),
};

static FUND_TYPE: EnumSpec = EnumSpec {
    name: "fund type",
    values: &["STOCK", "BALANCED", "BOND", "MONEY_MARKET"],
    aliases: &[
        ("STOCK_FUND", "STOCK"),
        ("EQUITY", "STOCK"),
        ("BALANCED_FUND", "BALANCED"),
        ("BOND_FUND", "BOND"),
        ("FIXED_INCOME", "BOND"),
        ("MONEY_MARKET_FUND", "MONEY_MARKET"),
        ("MMF", "MONEY_MARKET"),
    ],
    fallback: None,
};

static EXCHANGE: EnumSpec = EnumSpec {
    name: "exchange",
    values: &["HOSE", "HNX", "UPCOM", "OTC", "DELISTED"],
    aliases: &[("HSX", "HOSE"), ("HASTC", "HNX"), ("UPCoM", "UPCOM")],
    fallback: None,
};

static DEAL_ACTION: EnumSpec = EnumSpec {
    name: "deal action",
    values: &["buy", "sell"],
    aliases: &[("mua", "buy"), ("ban", "sell"), ("b", "buy"), ("s", "sell")],
    fallback: None,
};

static MATCH_TYPE: EnumSpec = EnumSpec {
    name: "match type",
    values: &["buy", "sell", "ato", "atc", "unknown"],
    aliases: &[("bu", "buy"), ("sd", "sell")],
    fallback: Some("unknown"),
};

static COMPANY_OVERVIEW: DomainSchema = DomainSchema {
    domain: Domain::CompanyOverview,
    record: "CompanyOverview",
    fields: &[
        FieldSpec::req("symbol", Code),
        FieldSpec::req("company_name", Text),
        FieldSpec::opt("industry", Text),
        FieldSpec::opt("market_cap", Number),
        FieldSpec::opt("pe_ratio", Number),
        FieldSpec::opt("pb_ratio", Number),
        FieldSpec::opt("roe", Number),
        FieldSpec::opt("roa", Number),
    ],
    row_rules: &[RowRule::NonNegative("market_cap")],
    table_rules: &[],
};

static COMPANY_NEWS: DomainSchema = DomainSchema {
    domain: Domain::CompanyNews,
    record: "CompanyNewsItem",
    fields: &[
        FieldSpec::req("title", Text),
        FieldSpec::req("publish_date", Date),
        FieldSpec::opt("content", Text),
        FieldSpec::opt("source", Text),
    ],
    row_rules: &[],
    table_rules: &[],
};

static COMPANY_EVENTS: DomainSchema = DomainSchema {
    domain: Domain::CompanyEvents,
    record: "CompanyEvent",
    fields: &[
        FieldSpec::req("event_type", Text),
        FieldSpec::req("event_date", Date),
        FieldSpec::opt("description", Text),
        FieldSpec::opt("status", Text),
    ],
    row_rules: &[],
    table_rules: &[],
};

static SHAREHOLDERS: DomainSchema = DomainSchema {
    domain: Domain::Shareholders,
    record: "ShareholderEntry",
    fields: &[
        FieldSpec::req("shareholder_name", Text),
        FieldSpec::req("ownership_percentage", Percentage),
        FieldSpec::opt("share_quantity", Integer),
    ],
    row_rules: &[RowRule::NonNegative("share_quantity")],
    table_rules: &[],
};

static OFFICERS: DomainSchema = DomainSchema {
    domain: Domain::Officers,
    record: "OfficerEntry",
    fields: &[
        FieldSpec::req("name", Text),
        FieldSpec::opt("position", Text),
        FieldSpec::opt("status", FieldType::Enum(&OFFICER_STATUS)),
        FieldSpec::opt("appointment_date", Date),
    ],
    row_rules: &[],
    table_rules: &[],
};

static SUBSIDIARIES: DomainSchema = DomainSchema {
    domain: Domain::Subsidiaries,
    record: "SubsidiaryEntry",
    fields: &[
        FieldSpec::req("subsidiary_name", Text),
        FieldSpec::req("ownership_percentage", Percentage),
        FieldSpec::opt("business_type", Text),
    ],
    row_rules: &[],
    table_rules: &[],
};

static DIVIDENDS: DomainSchema = DomainSchema {
    domain: Domain::Dividends,
    record: "DividendEntry",
    fields: &[
        FieldSpec::req("exercise_date", Date),
        FieldSpec::req("cash_year", Integer),
        FieldSpec::opt("dividend_ratio", Percentage),
        FieldSpec::opt("issue_method", Text),
    ],
    row_rules: &[],
    table_rules: &[],
};

static INSIDER_DEALS: DomainSchema = DomainSchema {
    domain: Domain::InsiderDeals,
    record: "InsiderDeal",
    fields: &[
        FieldSpec::req("deal_date", Date),
        FieldSpec::req("action", FieldType::Enum(&DEAL_ACTION)),
        FieldSpec::req("quantity", Integer),
        FieldSpec::opt("insider_name", Text),
        FieldSpec::opt("price", Number),
    ],
    row_rules: &[RowRule::NonNegative("quantity"), RowRule::NonNegative("price")],
    table_rules: &[],
};

static FINANCIAL_STATEMENT: DomainSchema = DomainSchema {
    domain: Domain::FinancialStatement,
    record: "FinancialPeriod",
    fields: &[
        FieldSpec::req("period", Text),
        FieldSpec::opt("revenue", Number),
        FieldSpec::opt("profit_before_tax", Number),
        FieldSpec::opt("net_profit", Number),
        FieldSpec::opt("total_assets", Number),
        FieldSpec::opt("total_equity", Number),
        FieldSpec::opt("operating_cash_flow", Number),
    ],
    row_rules: &[
        RowRule::NonNegativeWith {
            field: "total_equity",
            with: "total_assets",
        },
        RowRule::AtMost {
            lower: "total_equity",
            upper: "total_assets",
        },
    ],
    table_rules: &[],
};

static FINANCIAL_RATIO: DomainSchema = DomainSchema {
    domain: Domain::FinancialRatio,
    record: "FinancialRatioEntry",
    fields: &[
        FieldSpec::req("period", Text),
        FieldSpec::opt("pe_ratio", Number),
        FieldSpec::opt("pb_ratio", Number),
        FieldSpec::opt("roe", Number),
        FieldSpec::opt("roa", Number),
        FieldSpec::opt("eps", Number),
    ],
    row_rules: &[],
    table_rules: &[],
};

static FUND_LISTING: DomainSchema = DomainSchema {
    domain: Domain::FundListing,
    record: "FundRecord",
    fields: &[
        FieldSpec::req("symbol", Code),
        FieldSpec::req("fund_name", Text),
        FieldSpec::req("fund_type", FieldType::Enum(&FUND_TYPE)),
        FieldSpec::opt("nav", Number),
        FieldSpec::opt("total_assets", Number),
    ],
    row_rules: &[RowRule::Positive("nav"), RowRule::NonNegative("total_assets")],
    table_rules: &[],
};

static FUND_NAV_REPORT: DomainSchema = DomainSchema {
    domain: Domain::FundNavReport,
    record: "FundNavPoint",
    fields: &[FieldSpec::req("date", Date), FieldSpec::req("nav", Number)],
    row_rules: &[RowRule::Positive("nav")],
    table_rules: &[],
};

const HOLDING_SUM: TableRule = TableRule::PercentSumAtMost {
    field: "percentage",
    group_by: "date",
    limit: 100.0,
};

static FUND_TOP_HOLDING: DomainSchema = DomainSchema {
    domain: Domain::FundTopHolding,
    record: "FundHolding",
    fields: &[
        FieldSpec::req("name", Code),
        FieldSpec::req("percentage", Percentage),
        FieldSpec::opt("industry", Text),
        FieldSpec::opt("date", Date),
    ],
    row_rules: &[],
    table_rules: &[HOLDING_SUM],
};

static FUND_INDUSTRY_HOLDING: DomainSchema = DomainSchema {
    domain: Domain::FundIndustryHolding,
    record: "FundHolding",
    fields: &[
        FieldSpec::req("name", Text),
        FieldSpec::req("percentage", Percentage),
        FieldSpec::opt("date", Date),
    ],
    row_rules: &[],
    table_rules: &[HOLDING_SUM],
};

static FUND_ASSET_HOLDING: DomainSchema = DomainSchema {
    domain: Domain::FundAssetHolding,
    record: "FundHolding",
    fields: &[
        FieldSpec::req("name", Text),
        FieldSpec::req("percentage", Percentage),
        FieldSpec::opt("date", Date),
    ],
    row_rules: &[],
    table_rules: &[HOLDING_SUM],
};

static QUOTE_HISTORY: DomainSchema = DomainSchema {
    domain: Domain::QuoteHistory,
    record: "QuoteBar",
    fields: &[
        FieldSpec::req("time", Timestamp),
        FieldSpec::req("open", Number),
        FieldSpec::req("high", Number),
        FieldSpec::req("low", Number),
        FieldSpec::req("close", Number),
        FieldSpec::req("volume", Integer),
    ],
    row_rules: &[
        RowRule::NonNegative("volume"),
        RowRule::NonNegative("low"),
        RowRule::AtMost {
            lower: "low",
            upper: "open",
        },
        RowRule::AtMost {
            lower: "low",
            upper: "close",
        },
        RowRule::AtMost {
            lower: "open",
            upper: "high",
        },
        RowRule::AtMost {
            lower: "close",
            upper: "high",
        },
    ],
    table_rules: &[],
};

static INTRADAY_TICKS: DomainSchema = DomainSchema {
    domain: Domain::IntradayTicks,
    record: "IntradayTick",
    fields: &[
        FieldSpec::req("time", DateTime),
        FieldSpec::req("price", Number),
        FieldSpec::req("volume", Integer),
        FieldSpec::opt("match_type", FieldType::Enum(&MATCH_TYPE)),
    ],
    row_rules: &[RowRule::NonNegative("price"), RowRule::NonNegative("volume")],
    table_rules: &[],
};

static PRICE_BOARD: DomainSchema = DomainSchema {
    domain: Domain::PriceBoard,
    record: "PriceBoardEntry",
    fields: &[
        FieldSpec::req("symbol", Code),
        FieldSpec::req("price", Number),
        FieldSpec::req("volume", Integer),
        FieldSpec::opt("reference_price", Number),
        FieldSpec::opt("ceiling_price", Number),
        FieldSpec::opt("floor_price", Number),
    ],
    row_rules: &[
        RowRule::NonNegative("price"),
        RowRule::NonNegative("volume"),
        RowRule::AtMost {
            lower: "floor_price",
            upper: "reference_price",
        },
        RowRule::AtMost {
            lower: "reference_price",
            upper: "ceiling_price",
        },
    ],
    table_rules: &[],
};

static GOLD_PRICE: DomainSchema = DomainSchema {
    domain: Domain::GoldPrice,
    record: "GoldPriceQuote",
    fields: &[
        FieldSpec::req("date", Date),
        FieldSpec::req("buy_price", Number),
        FieldSpec::req("sell_price", Number),
        FieldSpec::req("type", Text),
    ],
    row_rules: &[
        RowRule::Positive("buy_price"),
        RowRule::AtMost {
            lower: "buy_price",
            upper: "sell_price",
        },
    ],
    table_rules: &[],
};

static EXCHANGE_RATE: DomainSchema = DomainSchema {
    domain: Domain::ExchangeRate,
    record: "ExchangeRateQuote",
    fields: &[
        FieldSpec::req("currency", Code),
        FieldSpec::req("buy_rate", Number),
        FieldSpec::req("sell_rate", Number),
        FieldSpec::opt("date", Date),
    ],
    row_rules: &[
        RowRule::CurrencyCode("currency"),
        RowRule::Positive("buy_rate"),
        RowRule::AtMost {
            lower: "buy_rate",
            upper: "sell_rate",
        },
    ],
    table_rules: &[],
};

static INDUSTRY_TAXONOMY: DomainSchema = DomainSchema {
    domain: Domain::IndustryTaxonomy,
    record: "IndustryTaxonomyEntry",
    fields: &[
        FieldSpec::req("icb_code1", Code),
        FieldSpec::req("icb_name1", Text),
        FieldSpec::req("icb_code2", Code),
        FieldSpec::req("icb_name2", Text),
        FieldSpec::opt("icb_code3", Code),
        FieldSpec::opt("icb_name3", Text),
        FieldSpec::opt("icb_code4", Code),
        FieldSpec::opt("icb_name4", Text),
    ],
    row_rules: &[],
    table_rules: &[TableRule::IcbHierarchy],
};

static SYMBOL_LISTING: DomainSchema = DomainSchema {
    domain: Domain::SymbolListing,
    record: "SymbolListingEntry",
    fields: &[
        FieldSpec::req("symbol", Code),
        FieldSpec::req("company_name", Text),
        FieldSpec::req("exchange", FieldType::Enum(&EXCHANGE)),
        FieldSpec::opt("industry", Text),
    ],
    row_rules: &[],
    table_rules: &[],
};

/// Full schema for `domain`.
#[must_use]
pub fn domain_schema(domain: Domain) -> &'static DomainSchema {
    match domain {
        Domain::CompanyOverview => &COMPANY_OVERVIEW,
        Domain::CompanyNews => &COMPANY_NEWS,
        Domain::CompanyEvents => &COMPANY_EVENTS,
        Domain::Shareholders => &SHAREHOLDERS,
        Domain::Officers => &OFFICERS,
        Domain::Subsidiaries => &SUBSIDIARIES,
        Domain::Dividends => &DIVIDENDS,
        Domain::InsiderDeals => &INSIDER_DEALS,
        Domain::FinancialStatement => &FINANCIAL_STATEMENT,
        Domain::FinancialRatio => &FINANCIAL_RATIO,
        Domain::FundListing => &FUND_LISTING,
        Domain::FundNavReport => &FUND_NAV_REPORT,
        Domain::FundTopHolding => &FUND_TOP_HOLDING,
        Domain::FundIndustryHolding => &FUND_INDUSTRY_HOLDING,
        Domain::FundAssetHolding => &FUND_ASSET_HOLDING,
        Domain::QuoteHistory => &QUOTE_HISTORY,
        Domain::IntradayTicks => &INTRADAY_TICKS,
        Domain::PriceBoard => &PRICE_BOARD,
        Domain::GoldPrice => &GOLD_PRICE,
        Domain::ExchangeRate => &EXCHANGE_RATE,
        Domain::IndustryTaxonomy => &INDUSTRY_TAXONOMY,
        Domain::SymbolListing => &SYMBOL_LISTING,
    }
}

/// Ordered canonical fields for `domain`.
#[must_use]
pub fn schema_for(domain: Domain) -> &'static [FieldSpec] {
    domain_schema(domain).fields
}

/// Validate raw rows and coerce them into canonical form.
///
/// # Errors
/// Returns the first [`ValidationFault`] found, scanning rows in order.
pub fn validate_and_coerce(
    domain: Domain,
    raw: &RawRows,
) -> Result<CanonicalTable, ValidationFault> {
    validate_and_coerce_with(domain, raw, CoerceOptions::default())
}

/// [`validate_and_coerce`] with request-dependent options.
///
/// # Errors
/// Returns the first [`ValidationFault`] found, scanning rows in order.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "vnfin_core::schema::validate_and_coerce",
        skip(raw, opts),
        fields(domain = %domain, rows = raw.len()),
    )
)]
pub fn validate_and_coerce_with(
    domain: Domain,
    raw: &RawRows,
    opts: CoerceOptions,
) -> Result<CanonicalTable, ValidationFault> {
    let schema = domain_schema(domain);
    let mut rows = raw
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| coerce_row(schema, idx, row, opts))
        .collect::<Result<Vec<_>, _>>()?;

    scale_percentages(schema, &mut rows, raw.percent_scale)?;
    for (idx, row) in rows.iter().enumerate() {
        rules::check_row(schema, idx, row)?;
    }
    rules::check_table(schema, &rows)?;

    let columns = schema.fields.iter().map(|f| f.name.to_string()).collect();
    Ok(CanonicalTable::from_parts(domain, columns, rows))
}

fn coerce_row(
    schema: &DomainSchema,
    idx: usize,
    raw: &RawRow,
    opts: CoerceOptions,
) -> Result<Map<String, Value>, ValidationFault> {
    let mut out = Map::new();
    for field in schema.fields {
        let value = match raw.get(field.name).filter(|v| !coerce::is_blank(v)) {
            None if field.required => {
                return Err(ValidationFault::missing(schema.domain, idx, field.name));
            }
            None => Value::Null,
            Some(v) => coerce_cell(field.ty, v, opts).map_err(|e| {
                let kind = match e {
                    CoerceError::Mismatch { .. } => ValidationFaultKind::TypeMismatch,
                    CoerceError::OutOfRange(_) => ValidationFaultKind::OutOfRange,
                };
                ValidationFault::new(schema.domain, Some(idx), field.name, kind, e.to_string())
            })?,
        };
        out.insert(field.name.to_string(), value);
    }
    Ok(out)
}

fn coerce_cell(ty: FieldType, v: &Value, opts: CoerceOptions) -> Result<Value, CoerceError> {
    Ok(match ty {
        FieldType::Text => Value::String(coerce::to_text(v)?),
        FieldType::Code => Value::String(coerce::to_text(v)?.to_ascii_uppercase()),
        FieldType::Number | FieldType::Percentage => coerce::number_value(coerce::to_f64(v)?),
        FieldType::Integer => Value::from(coerce::to_i64(v)?),
        FieldType::Date => coerce::date_value(coerce::to_date(v)?),
        FieldType::DateTime => coerce::datetime_value(coerce::to_datetime(v)?),
        FieldType::Timestamp if opts.intraday => coerce::datetime_value(coerce::to_datetime(v)?),
        FieldType::Timestamp => coerce::date_value(coerce::to_date(v)?),
        FieldType::Enum(spec) => Value::String(coerce::to_enum(v, spec)?.to_string()),
    })
}

/// Bring every percentage column onto the 0-100 scale and range-check it.
fn scale_percentages(
    schema: &DomainSchema,
    rows: &mut [Map<String, Value>],
    scale: PercentScale,
) -> Result<(), ValidationFault> {
    for field in schema.fields.iter().filter(|f| f.ty == Percentage) {
        let fraction = match scale {
            PercentScale::Fraction => true,
            PercentScale::Percent => false,
            PercentScale::Auto => {
                let values: Vec<f64> = rows
                    .iter()
                    .filter_map(|r| r.get(field.name).and_then(Value::as_f64))
                    .collect();
                coerce::looks_fractional(&values)
            }
        };
        for (idx, row) in rows.iter_mut().enumerate() {
            let Some(v) = row.get(field.name).and_then(Value::as_f64) else {
                continue;
            };
            let pct = if fraction {
                coerce::fraction_to_percent(v)
            } else {
                v
            };
            if !(0.0..=100.0).contains(&pct) {
                return Err(ValidationFault::new(
                    schema.domain,
                    Some(idx),
                    field.name,
                    ValidationFaultKind::OutOfRange,
                    format!("{pct} is outside 0-100"),
                ));
            }
            row.insert(field.name.to_string(), coerce::number_value(pct));
        }
    }
    Ok(())
}

//! vnfin routes Vietnamese market-data requests across multiple providers.
//!
//! Overview
//! - Connectors (TCBS-like, VCI-like, mocks) implement `vnfin_core::VnConnector`
//!   and return raw rows in provider-native shape.
//! - Every result is validated and coerced by the canonical schema registry
//!   before it reaches the caller, whichever provider produced it.
//! - A capability matrix, built once from connector declarations and the
//!   routing policy, fixes the candidate order per domain.
//! - Faults are classified (`Transient`, `Unsupported`, `SchemaDrift`,
//!   `PermanentOutage`) to decide between retrying and falling back.
//!
//! Key behaviors and trade-offs
//! - Candidates are tried sequentially and the first valid table wins; tables
//!   from different providers are never merged. This keeps each answer
//!   attributable to one provider at the cost of some latency on failover.
//! - Transient faults are retried on the same connector with jittered
//!   exponential backoff, bounded by `max_retries` and a per-candidate time
//!   budget.
//! - A provider whose payload no longer validates counts as schema drift:
//!   the facade falls back and, after repeated drift, logs an operator alert.
//! - A request deadline (per request or configured globally) is checked at
//!   every provider call and before every backoff sleep.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use vnfin::{Domain, RequestParams, Vnfin};
//!
//! let vnfin = Vnfin::builder()
//!     .with_connector(Arc::new(vnfin_tcbs::TcbsConnector::with_api(tcbs_http)))
//!     .with_connector(Arc::new(vnfin_vci::VciConnector::with_api(vci_http)))
//!     .build()?;
//!
//! // Typed convenience method
//! let holders = vnfin.shareholders("VCB").await?;
//!
//! // Generic canonical table
//! let table = vnfin
//!     .get(Domain::CompanyOverview, &RequestParams::for_symbol("VCB"))
//!     .await?;
//! ```
//!
//! See `vnfin/examples/` for runnable demonstrations backed by `vnfin-mock`.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Vnfin, VnfinBuilder};
pub use router::fund::FundDetails;

pub use vnfin_core::{
    AdapterFault, AdapterFaultKind, Attempt, BackoffConfig, BarTime, CanonicalTable,
    CapabilityMatrix, CompanyEvent, CompanyNewsItem, CompanyOverview, ConnectorKey, DateRange,
    DealAction, DividendEntry, Domain, Exchange, ExchangeRateQuote, Fault, FaultClass,
    FaultClassifier, FinancialPeriod, FinancialRatioEntry, FundHolding, FundNavPoint, FundRecord,
    FundType, GoldPriceQuote, IndustryTaxonomyEntry, InsiderDeal, Interval, IntradayTick,
    MatchType, OfficerEntry, OfficerStatus, PercentScale, Period, PriceBoardEntry, QuoteBar,
    RawRows, ReportType, RequestParams, RetryConfig, RoutingPolicy, RoutingPolicyBuilder,
    ShareholderEntry, SubsidiaryEntry, SymbolListingEntry, TransportError, ValidationFault,
    ValidationFaultKind, VnConnector, VnError, VnfinConfig,
};

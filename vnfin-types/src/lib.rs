//! Shared vocabulary for the vnfin workspace: domains, request parameters,
//! configuration, routing policy and errors.
#![warn(missing_docs)]

mod config;
mod connector;
mod domain;
mod error;
mod params;
pub mod routing_policy;

pub use config::{BackoffConfig, RetryConfig, VnfinConfig};
pub use connector::ConnectorKey;
pub use domain::Domain;
pub use error::{
    AdapterFault, AdapterFaultKind, Attempt, Fault, FaultClass, ValidationFault,
    ValidationFaultKind, VnError,
};
pub use params::{DateRange, Exchange, FundType, Interval, Period, ReportType, RequestParams};
pub use routing_policy::{RoutingPolicy, RoutingPolicyBuilder};

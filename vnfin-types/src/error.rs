use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Domain;

/// Transport/provider-level failure kinds reported by adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdapterFaultKind {
    /// Connection reset, DNS failure and similar.
    Network,
    /// The provider call did not complete in time.
    Timeout,
    /// Provider throttled the request.
    RateLimited,
    /// Non-2xx response with its status code.
    Http {
        /// HTTP-like status code.
        status: u16,
    },
    /// Symbol or resource unknown to the provider.
    NotFound,
    /// Provider answered with nothing usable.
    EmptyPayload,
    /// Payload could not be reshaped (missing container, wrong JSON type).
    MalformedPayload,
    /// Adapter does not serve this domain or parameter combination.
    Unsupported,
    /// Credentials rejected.
    Unauthorized,
}

impl fmt::Display for AdapterFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Timeout => f.write_str("timeout"),
            Self::RateLimited => f.write_str("rate-limited"),
            Self::Http { status } => write!(f, "http {status}"),
            Self::NotFound => f.write_str("not-found"),
            Self::EmptyPayload => f.write_str("empty-payload"),
            Self::MalformedPayload => f.write_str("malformed-payload"),
            Self::Unsupported => f.write_str("unsupported"),
            Self::Unauthorized => f.write_str("unauthorized"),
        }
    }
}

/// Failure raised by a provider adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct AdapterFault {
    /// What went wrong.
    pub kind: AdapterFaultKind,
    /// Provider or adapter detail.
    pub message: String,
}

impl AdapterFault {
    /// Build a fault of the given kind.
    pub fn new(kind: AdapterFaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Helper: network failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::Network, message)
    }

    /// Helper: provider call timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::Timeout, message)
    }

    /// Helper: provider throttled the request.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::RateLimited, message)
    }

    /// Helper: non-2xx HTTP-like status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::Http { status }, message)
    }

    /// Helper: resource not found.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::NotFound, what)
    }

    /// Helper: empty payload.
    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::EmptyPayload, message)
    }

    /// Helper: payload shape could not be read.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::MalformedPayload, message)
    }

    /// Helper: domain not served by the adapter.
    #[must_use]
    pub fn unsupported(domain: Domain) -> Self {
        Self::new(AdapterFaultKind::Unsupported, domain.as_str())
    }

    /// Helper: credentials rejected.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AdapterFaultKind::Unauthorized, message)
    }
}

/// Canonical schema violation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationFaultKind {
    /// A required field is absent or null.
    MissingField,
    /// A value could not be coerced to the field's semantic type.
    TypeMismatch,
    /// A value lies outside the field's allowed range or enum.
    OutOfRange,
    /// A cross-field or cross-row rule failed.
    ConstraintViolated,
}

impl fmt::Display for ValidationFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingField => "missing field",
            Self::TypeMismatch => "type mismatch",
            Self::OutOfRange => "out of range",
            Self::ConstraintViolated => "constraint violated",
        })
    }
}

/// Raw rows failed canonical validation.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{domain} row {row:?} field `{field}`: {kind} ({detail})")]
pub struct ValidationFault {
    /// Domain being validated.
    pub domain: Domain,
    /// Offending row index; `None` for table-level rules without a single culprit.
    pub row: Option<usize>,
    /// Offending canonical field.
    pub field: String,
    /// Violation kind.
    pub kind: ValidationFaultKind,
    /// Human-readable detail.
    pub detail: String,
}

impl ValidationFault {
    /// Build a fault.
    pub fn new(
        domain: Domain,
        row: Option<usize>,
        field: impl Into<String>,
        kind: ValidationFaultKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            domain,
            row,
            field: field.into(),
            kind,
            detail: detail.into(),
        }
    }

    /// Helper: missing required field.
    pub fn missing(domain: Domain, row: usize, field: impl Into<String>) -> Self {
        Self::new(
            domain,
            Some(row),
            field,
            ValidationFaultKind::MissingField,
            "required value absent",
        )
    }
}

/// Either side of a failed attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    /// Provider/transport failure.
    #[error("adapter fault: {0}")]
    Adapter(AdapterFault),
    /// Canonical validation failure.
    #[error("validation fault: {0}")]
    Validation(ValidationFault),
}

impl From<AdapterFault> for Fault {
    fn from(f: AdapterFault) -> Self {
        Self::Adapter(f)
    }
}

impl From<ValidationFault> for Fault {
    fn from(f: ValidationFault) -> Self {
        Self::Validation(f)
    }
}

/// Classification driving retry and fallback decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultClass {
    /// Worth retrying on the same provider.
    Transient,
    /// Provider has no data for this request; move on.
    Unsupported,
    /// Provider's payload contract no longer matches the canonical schema.
    SchemaDrift,
    /// Provider refuses the request outright.
    PermanentOutage,
}

impl FaultClass {
    /// Stable kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transient => "transient",
            Self::Unsupported => "unsupported",
            Self::SchemaDrift => "schema-drift",
            Self::PermanentOutage => "permanent-outage",
        }
    }

    /// Only transient faults are retried on the same provider.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of trying one candidate connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Connector name.
    pub connector: String,
    /// Classification of the last fault seen on this connector.
    pub classification: FaultClass,
    /// The last fault seen on this connector.
    pub fault: Fault,
    /// Number of calls made to this connector (1 + retries).
    pub tries: u32,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] after {} tr{}: {}",
            self.connector,
            self.classification,
            self.tries,
            if self.tries == 1 { "y" } else { "ies" },
            self.fault
        )
    }
}

fn list_attempts(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for the vnfin workspace.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum VnError {
    /// No registered connector declares support for the domain.
    #[error("no capable provider for {domain}")]
    NoCapableProvider {
        /// Requested domain.
        domain: Domain,
    },

    /// Every candidate faulted or produced invalid data.
    #[error("all providers failed for {domain}: {}", list_attempts(.attempts))]
    AllProvidersFailed {
        /// Requested domain.
        domain: Domain,
        /// One entry per candidate tried, in order.
        attempts: Vec<Attempt>,
    },

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The overall deadline expired before a valid result was obtained.
    #[error("request timed out for {domain} after {} attempt(s)", .attempts.len())]
    RequestTimeout {
        /// Requested domain.
        domain: Domain,
        /// Attempts completed before the deadline.
        attempts: Vec<Attempt>,
    },

    /// Canonical data could not be projected into the requested record type.
    #[error("data issue: {0}")]
    Data(String),
}

impl VnError {
    /// Helper: build an `AllProvidersFailed` error.
    #[must_use]
    pub const fn all_failed(domain: Domain, attempts: Vec<Attempt>) -> Self {
        Self::AllProvidersFailed { domain, attempts }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub const fn request_timeout(domain: Domain, attempts: Vec<Attempt>) -> Self {
        Self::RequestTimeout { domain, attempts }
    }

    /// Attempts recorded by aggregate errors; empty for the other variants.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        match self {
            Self::AllProvidersFailed { attempts, .. } | Self::RequestTimeout { attempts, .. } => {
                attempts
            }
            _ => &[],
        }
    }

    /// True when at least one attempt failed because a provider's payload
    /// contract drifted from the canonical schema.
    #[must_use]
    pub fn is_schema_drift(&self) -> bool {
        self.attempts()
            .iter()
            .any(|a| a.classification == FaultClass::SchemaDrift)
    }

    /// True when every attempt reported that the provider simply has no data.
    ///
    /// Lets callers tell "this symbol has no data" apart from an outage.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        let attempts = self.attempts();
        !attempts.is_empty()
            && attempts
                .iter()
                .all(|a| a.classification == FaultClass::Unsupported)
    }

    /// Returns true if this error should be surfaced to users as actionable.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NoCapableProvider { .. } => false,
            Self::AllProvidersFailed { .. } => !self.is_no_data(),
            _ => true,
        }
    }
}

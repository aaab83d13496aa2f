//! Maps adapter and validation faults onto retry/fallback classes.

use vnfin_types::{AdapterFaultKind, Fault, FaultClass, ValidationFaultKind};

/// Stateless fault classifier.
///
/// | Fault | Class |
/// |---|---|
/// | network, timeout, rate limited, HTTP 408/429/5xx | `Transient` |
/// | not found, empty payload, unsupported, HTTP 404 | `Unsupported` |
/// | malformed payload, missing field, type mismatch | `SchemaDrift` |
/// | other HTTP 4xx, unauthorized | `PermanentOutage` |
/// | value out of range, row or table rule violated | `PermanentOutage` |
///
/// Only structural failures count as drift: a provider that sends a
/// well-shaped row with impossible values has not changed its contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultClassifier;

impl FaultClassifier {
    /// Classify one fault.
    #[must_use]
    pub fn classify(&self, fault: &Fault) -> FaultClass {
        match fault {
            Fault::Adapter(f) => classify_adapter(f.kind),
            Fault::Validation(v) => classify_validation(v.kind),
        }
    }
}

/// Classify an adapter fault kind.
#[must_use]
pub const fn classify_adapter(kind: AdapterFaultKind) -> FaultClass {
    match kind {
        AdapterFaultKind::Network | AdapterFaultKind::Timeout | AdapterFaultKind::RateLimited => {
            FaultClass::Transient
        }
        AdapterFaultKind::Http { status } => classify_status(status),
        AdapterFaultKind::NotFound
        | AdapterFaultKind::EmptyPayload
        | AdapterFaultKind::Unsupported => FaultClass::Unsupported,
        AdapterFaultKind::MalformedPayload => FaultClass::SchemaDrift,
        AdapterFaultKind::Unauthorized => FaultClass::PermanentOutage,
    }
}

/// Classify a validation fault kind.
#[must_use]
pub const fn classify_validation(kind: ValidationFaultKind) -> FaultClass {
    match kind {
        ValidationFaultKind::MissingField | ValidationFaultKind::TypeMismatch => {
            FaultClass::SchemaDrift
        }
        ValidationFaultKind::OutOfRange | ValidationFaultKind::ConstraintViolated => {
            FaultClass::PermanentOutage
        }
    }
}

const fn classify_status(status: u16) -> FaultClass {
    match status {
        408 | 429 | 500..=599 => FaultClass::Transient,
        404 => FaultClass::Unsupported,
        // 2xx/3xx should not surface as faults; treat them as a broken contract.
        200..=399 => FaultClass::SchemaDrift,
        _ => FaultClass::PermanentOutage,
    }
}

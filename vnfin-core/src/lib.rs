//! vnfin-core
//!
//! Building blocks shared by the vnfin facade and its provider adapters.
//!
//! - `schema`: the canonical schema registry and `validate_and_coerce`.
//! - `table` / `records`: validated tables and their typed record views.
//! - `connector`: the `VnConnector` trait adapters implement.
//! - `matrix`: per-domain candidate ordering.
//! - `classify`: fault classification driving retry and fallback.
//! - `transport`: payload and transport-error helpers for adapters.
#![warn(missing_docs)]

/// Fault classification.
pub mod classify;
/// The adapter contract.
pub mod connector;
/// Capability matrix.
pub mod matrix;
/// Typed canonical records.
#[allow(missing_docs)]
pub mod records;
pub mod schema;
/// Canonical tables.
pub mod table;
pub mod transport;

pub use classify::FaultClassifier;
pub use connector::{PercentScale, RawRow, RawRows, VnConnector};
pub use matrix::CapabilityMatrix;
pub use records::*;
pub use schema::{
    CoerceOptions, DomainSchema, FieldSpec, FieldType, domain_schema, schema_for,
    validate_and_coerce, validate_and_coerce_with,
};
pub use table::CanonicalTable;
pub use transport::{Query, TransportError};
pub use vnfin_types::*;

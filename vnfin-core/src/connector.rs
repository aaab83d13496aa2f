use async_trait::async_trait;
use serde_json::{Map, Value};

pub use vnfin_types::ConnectorKey;
use vnfin_types::{AdapterFault, Domain, RequestParams};

/// One raw record as reshaped by an adapter: canonical field names, provider values.
pub type RawRow = Map<String, Value>;

/// How an adapter expresses percentages in its payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentScale {
    /// Values are fractions (`0.752` means 75.2%).
    Fraction,
    /// Values are already percentages.
    Percent,
    /// Infer per column: fraction iff every value is in `[0, 1]` and at
    /// least one lies strictly between 0 and 1.
    #[default]
    Auto,
}

/// Rows returned by [`VnConnector::fetch`], prior to validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRows {
    /// Records keyed by canonical field name.
    pub rows: Vec<RawRow>,
    /// Percent convention used by every percentage column in `rows`.
    pub percent_scale: PercentScale,
}

impl RawRows {
    /// Rows with an inferred percent scale.
    #[must_use]
    pub const fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            percent_scale: PercentScale::Auto,
        }
    }

    /// Declare the percent convention of these rows.
    #[must_use]
    pub const fn with_percent_scale(mut self, scale: PercentScale) -> Self {
        self.percent_scale = scale;
        self
    }

    /// Build rows from JSON objects; non-object values are skipped.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(
            values
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A market-data source adapter.
///
/// Adapters reshape provider payloads into [`RawRows`] keyed by canonical
/// field names. They do not validate; the schema registry does.
#[async_trait]
pub trait VnConnector: Send + Sync {
    /// A stable identifier for routing policies (e.g. "vnfin-tcbs").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector claims to serve `domain`.
    ///
    /// Default: `false`. Connectors must opt in per domain.
    fn supports(&self, domain: Domain) -> bool {
        let _ = domain;
        false
    }

    /// Fetch raw rows for `domain`.
    ///
    /// # Errors
    /// Returns an [`AdapterFault`] for transport failures, provider errors and
    /// empty or unreadable payloads.
    async fn fetch(&self, domain: Domain, params: &RequestParams)
    -> Result<RawRows, AdapterFault>;
}

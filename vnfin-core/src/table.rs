use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vnfin_types::{Domain, VnError};

use crate::records::Record;

/// A validated, canonical result for one domain.
///
/// Only the schema registry builds non-empty tables, so every row carries
/// every canonical column and no required value is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTable {
    domain: Domain,
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl CanonicalTable {
    pub(crate) const fn from_parts(
        domain: Domain,
        columns: Vec<String>,
        rows: Vec<Map<String, Value>>,
    ) -> Self {
        Self {
            domain,
            columns,
            rows,
        }
    }

    /// An explicitly empty table with the domain's canonical columns.
    #[must_use]
    pub fn empty(domain: Domain) -> Self {
        let columns = crate::schema::schema_for(domain)
            .iter()
            .map(|f| f.name.to_string())
            .collect();
        Self::from_parts(domain, columns, Vec::new())
    }

    /// Domain this table belongs to.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Canonical column names in schema order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows keyed by canonical column name.
    #[must_use]
    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, in row order.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |r| r.get(name).unwrap_or(&Value::Null))
    }

    /// Project rows into typed records.
    ///
    /// # Errors
    /// Returns `VnError::Data` when `T` does not belong to this table's
    /// domain or a row fails to deserialize.
    pub fn records<T: Record>(&self) -> Result<Vec<T>, VnError> {
        if !T::DOMAINS.contains(&self.domain) {
            return Err(VnError::Data(format!(
                "{} rows cannot be read as {}",
                self.domain,
                std::any::type_name::<T>()
            )));
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                serde_json::from_value(Value::Object(row.clone()))
                    .map_err(|e| VnError::Data(format!("{} row {idx}: {e}", self.domain)))
            })
            .collect()
    }

    /// Consume the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Map<String, Value>> {
        self.rows
    }
}

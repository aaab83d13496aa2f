//! Helpers shared by adapters that sit on a JSON transport.
//!
//! The transport itself (HTTP client, auth, caching) lives outside vnfin.
//! Adapters receive a `serde_json::Value` or a [`TransportError`] and use the
//! functions here to turn either into [`RawRows`] or an [`AdapterFault`].

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Asia::Ho_Chi_Minh;
use serde_json::{Map, Value};
use thiserror::Error;
use vnfin_types::{AdapterFault, AdapterFaultKind, DateRange, Domain, Period, RequestParams};

use crate::connector::{RawRow, RawRows};

/// Query-string pairs for one provider request.
pub type Query = Vec<(&'static str, String)>;

/// Failure reported by the transport beneath an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error (status {status:?}): {message}")]
pub struct TransportError {
    /// HTTP-like status when the provider answered.
    pub status: Option<u16>,
    /// Provider or client message.
    pub message: String,
}

impl TransportError {
    /// Provider answered with `status`.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// No answer (connection, DNS, TLS, client-side timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

fn looks_like_not_found(msg: &str) -> bool {
    msg.contains("not found") || msg.contains("no data") || msg.contains("no matches")
}

fn looks_rate_limited(msg: &str) -> bool {
    msg.contains("rate limit") || msg.contains("too many requests")
}

/// Map a transport failure onto an adapter fault.
///
/// Provider wording wins over the status code for "not found"/"no data" and
/// rate limiting; otherwise the HTTP status is kept as is.
#[must_use]
pub fn normalize_transport_error(err: TransportError, what: &str) -> AdapterFault {
    let lower = err.message.to_ascii_lowercase();
    if looks_like_not_found(&lower) {
        return AdapterFault::not_found(what.to_string());
    }
    if looks_rate_limited(&lower) {
        return AdapterFault::rate_limited(err.message);
    }
    match err.status {
        Some(status) => AdapterFault::http(status, err.message),
        None if lower.contains("timed out") || lower.contains("timeout") => {
            AdapterFault::timeout(err.message)
        }
        None => AdapterFault::network(err.message),
    }
}

/// Symbol of a symbol-scoped request.
///
/// # Errors
/// `Unsupported` when the request carries no symbol; the facade rejects such
/// requests before they reach an adapter.
pub fn require_symbol(params: &RequestParams, domain: Domain) -> Result<&str, AdapterFault> {
    match params.symbol.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AdapterFault::new(
            AdapterFaultKind::Unsupported,
            format!("{domain} requires a symbol"),
        )),
    }
}

/// The array stored under `key` (or the body itself when `key` is `None`).
///
/// # Errors
/// `MalformedPayload` when the container is missing or is not an array;
/// `EmptyPayload` when it is `null` or empty.
pub fn array_at<'a>(
    body: &'a Value,
    key: Option<&str>,
    what: &str,
) -> Result<&'a [Value], AdapterFault> {
    let node = match key {
        Some(k) => body
            .get(k)
            .ok_or_else(|| AdapterFault::malformed(format!("{what}: missing `{k}`")))?,
        None => body,
    };
    match node {
        Value::Null => Err(AdapterFault::empty(format!("{what}: null payload"))),
        Value::Array(items) if items.is_empty() => {
            Err(AdapterFault::empty(format!("{what}: no rows")))
        }
        Value::Array(items) => Ok(items),
        other => Err(AdapterFault::malformed(format!(
            "{what}: expected an array, got {}",
            json_kind(other)
        ))),
    }
}

/// The object stored under `key` (or the body itself).
///
/// # Errors
/// `MalformedPayload` when the node is missing or not an object;
/// `EmptyPayload` when it is `null` or `{}`.
pub fn object_at<'a>(
    body: &'a Value,
    key: Option<&str>,
    what: &str,
) -> Result<&'a Map<String, Value>, AdapterFault> {
    let node = match key {
        Some(k) => body
            .get(k)
            .ok_or_else(|| AdapterFault::malformed(format!("{what}: missing `{k}`")))?,
        None => body,
    };
    match node {
        Value::Null => Err(AdapterFault::empty(format!("{what}: null payload"))),
        Value::Object(map) if map.is_empty() => {
            Err(AdapterFault::empty(format!("{what}: empty object")))
        }
        Value::Object(map) => Ok(map),
        other => Err(AdapterFault::malformed(format!(
            "{what}: expected an object, got {}",
            json_kind(other)
        ))),
    }
}

/// Placeholders providers use for "no value": `null`, `""`, `"-"`, `"N/A"`, `"null"`.
#[must_use]
pub fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => {
            let t = s.trim();
            t.is_empty()
                || t == "-"
                || t.eq_ignore_ascii_case("n/a")
                || t.eq_ignore_ascii_case("null")
        }
        _ => false,
    }
}

/// Value at a dotted path (`"details.nav"`) inside `obj`.
#[must_use]
pub fn lookup<'a>(obj: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut node = obj.get(parts.next()?)?;
    for part in parts {
        node = node.as_object()?.get(part)?;
    }
    Some(node)
}

/// Copy `(native, canonical)` pairs out of `obj`, dropping everything else.
///
/// Native names may be dotted paths into nested objects. Absent native
/// fields are simply not copied; the registry decides whether that is
/// acceptable. When several pairs target the same canonical field, the
/// first one holding a real value wins; placeholders such as `"-"` fall
/// through to the next pair.
#[must_use]
pub fn project(obj: &Map<String, Value>, pairs: &[(&str, &str)]) -> RawRow {
    let mut row = RawRow::new();
    for (native, canonical) in pairs {
        if row.contains_key(*canonical) {
            continue;
        }
        if let Some(v) = lookup(obj, native).filter(|v| !is_blank(v)) {
            row.insert((*canonical).to_string(), v.clone());
        }
    }
    row
}

/// Project every object in `items`.
///
/// # Errors
/// `MalformedPayload` when an item is not an object.
pub fn project_all(
    items: &[Value],
    pairs: &[(&str, &str)],
    what: &str,
) -> Result<RawRows, AdapterFault> {
    let rows = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_object()
                .map(|obj| project(obj, pairs))
                .ok_or_else(|| {
                    AdapterFault::malformed(format!("{what}: item {idx} is not an object"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawRows::new(rows))
}

/// Integer under `key`, accepting numeric strings.
#[must_use]
pub fn int_at(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Statement period label: `"2023"` for yearly rows, `"2023-Q4"` for quarterly ones.
///
/// # Errors
/// `MalformedPayload` when the year is missing, or when a quarterly row has
/// no quarter in `1..=4`.
pub fn period_label(
    obj: &Map<String, Value>,
    year_key: &str,
    quarter_key: &str,
    period: Period,
    what: &str,
) -> Result<String, AdapterFault> {
    let year = int_at(obj, year_key)
        .ok_or_else(|| AdapterFault::malformed(format!("{what}: row without `{year_key}`")))?;
    match period {
        Period::Year => Ok(year.to_string()),
        Period::Quarter => match int_at(obj, quarter_key) {
            Some(q @ 1..=4) => Ok(format!("{year}-Q{q}")),
            _ => Err(AdapterFault::malformed(format!(
                "{what}: quarterly row for {year} without a valid `{quarter_key}`"
            ))),
        },
    }
}

/// Epoch seconds of local midnight on `date` in Vietnam.
#[must_use]
pub fn local_midnight_epoch(date: NaiveDate) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(Ho_Chi_Minh)
        .earliest()
        .map_or_else(|| naive.and_utc().timestamp(), |dt| dt.timestamp())
}

/// `(from, to)` epoch seconds covering every trading day in `range`.
#[must_use]
pub fn range_epochs(range: &DateRange) -> (i64, i64) {
    let from = local_midnight_epoch(range.start());
    let to = local_midnight_epoch(range.end()) + 86_399;
    (from, to)
}

const fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

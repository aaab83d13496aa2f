//! Cell-level coercion of provider values into canonical JSON values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Asia::Ho_Chi_Minh;
use serde_json::{Number, Value};
use thiserror::Error;

use super::EnumSpec;
pub(crate) use crate::transport::is_blank;

/// Why a single cell could not be coerced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum CoerceError {
    #[error("expected {expected}, got {got}")]
    Mismatch { expected: &'static str, got: String },
    #[error("{0}")]
    OutOfRange(String),
}

fn mismatch(expected: &'static str, got: &Value) -> CoerceError {
    CoerceError::Mismatch {
        expected,
        got: got.to_string(),
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Epoch seconds or milliseconds, by magnitude.
fn from_epoch(raw: i64) -> Option<NaiveDateTime> {
    let utc = if raw.abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(raw)?
    } else {
        DateTime::from_timestamp(raw, 0)?
    };
    Some(utc.with_timezone(&Ho_Chi_Minh).naive_local())
}

fn epoch_from_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    }
}

/// Parse a date-time string in any accepted layout, in exchange-local time.
fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Ho_Chi_Minh).naive_local());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt);
    }
    if s.len() > 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(from_epoch);
    }
    None
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let (y, md) = s.split_at(4);
        let (m, d) = md.split_at(2);
        return NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| parse_datetime_str(s).map(|dt| dt.date()))
}

pub(crate) fn to_date(v: &Value) -> Result<NaiveDate, CoerceError> {
    match v {
        Value::String(s) => parse_date_str(s.trim()).ok_or_else(|| mismatch("date", v)),
        Value::Number(_) => epoch_from_value(v)
            .and_then(|raw| {
                // 20240102 reads as a compact date, not as an epoch.
                if (10_000_101..=99_991_231).contains(&raw) {
                    parse_date_str(&raw.to_string())
                } else {
                    from_epoch(raw).map(|dt| dt.date())
                }
            })
            .ok_or_else(|| mismatch("date", v)),
        _ => Err(mismatch("date", v)),
    }
}

pub(crate) fn to_datetime(v: &Value) -> Result<NaiveDateTime, CoerceError> {
    match v {
        Value::String(s) => {
            let s = s.trim();
            parse_datetime_str(s)
                .or_else(|| parse_date_str(s).map(|d| d.and_time(NaiveTime::MIN)))
                .ok_or_else(|| mismatch("date-time", v))
        }
        Value::Number(_) => epoch_from_value(v)
            .and_then(from_epoch)
            .ok_or_else(|| mismatch("date-time", v)),
        _ => Err(mismatch("date-time", v)),
    }
}

pub(crate) fn date_value(d: NaiveDate) -> Value {
    Value::String(d.format("%Y-%m-%d").to_string())
}

pub(crate) fn datetime_value(dt: NaiveDateTime) -> Value {
    Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Parse numeric cells, accepting thousands separators and a trailing `%`.
pub(crate) fn to_f64(v: &Value) -> Result<f64, CoerceError> {
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('%')
                .chars()
                .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| mismatch("number", v))
}

pub(crate) fn to_i64(v: &Value) -> Result<i64, CoerceError> {
    if let Some(i) = v.as_i64() {
        return Ok(i);
    }
    let f = to_f64(v).map_err(|_| mismatch("integer", v))?;
    if f.fract() != 0.0 || f.abs() > 9.0e15 {
        return Err(mismatch("integer", v));
    }
    Ok(f as i64)
}

pub(crate) fn number_value(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

pub(crate) fn to_text(v: &Value) -> Result<String, CoerceError> {
    match v {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        _ => Err(mismatch("text", v)),
    }
}

fn enum_key(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub(crate) fn to_enum(v: &Value, spec: &EnumSpec) -> Result<&'static str, CoerceError> {
    let text = to_text(v)?;
    let key = enum_key(&text);
    if let Some(hit) = spec.values.iter().copied().find(|c| enum_key(c) == key) {
        return Ok(hit);
    }
    if let Some((_, canon)) = spec.aliases.iter().find(|(alias, _)| enum_key(alias) == key) {
        return Ok(*canon);
    }
    spec.fallback.ok_or_else(|| {
        CoerceError::OutOfRange(format!(
            "`{text}` is not one of {}",
            spec.values.join(", ")
        ))
    })
}

/// Whether a percentage column is expressed as fractions.
pub(crate) fn looks_fractional(values: &[f64]) -> bool {
    !values.is_empty()
        && values.iter().all(|v| (0.0..=1.0).contains(v))
        && values.iter().any(|v| *v > 0.0 && *v < 1.0)
}

/// Scale a fraction to percent, trimming float noise (`0.752 * 100`).
pub(crate) fn fraction_to_percent(v: f64) -> f64 {
    (v * 100.0 * 1e9).round() / 1e9
}

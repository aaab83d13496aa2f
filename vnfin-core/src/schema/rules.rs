//! Row and table invariants checked after coercion.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use vnfin_types::{ValidationFault, ValidationFaultKind};

use super::DomainSchema;

/// Tolerance for float noise when summing percentages.
const SUM_EPSILON: f64 = 0.05;

/// Invariant over the values of a single row. Rules are skipped when a
/// referenced value is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRule {
    /// Value must be `>= 0`.
    NonNegative(&'static str),
    /// `field >= 0`, checked only when `with` is also present.
    NonNegativeWith {
        /// Field that must not be negative.
        field: &'static str,
        /// Companion field whose presence enables the check.
        with: &'static str,
    },
    /// Value must be `> 0`.
    Positive(&'static str),
    /// `lower <= upper`.
    AtMost {
        /// Field expected to be the smaller value.
        lower: &'static str,
        /// Field expected to be the larger value.
        upper: &'static str,
    },
    /// Three upper-case ASCII letters.
    CurrencyCode(&'static str),
}

impl RowRule {
    /// Fields referenced by the rule.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match *self {
            Self::NonNegative(f) | Self::Positive(f) | Self::CurrencyCode(f) => vec![f],
            Self::AtMost { lower, upper } => vec![lower, upper],
            Self::NonNegativeWith { field, with } => vec![field, with],
        }
    }
}

/// Invariant spanning several rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRule {
    /// Sum of `field` within each `group_by` value stays at or below `limit`.
    PercentSumAtMost {
        /// Percentage field to sum.
        field: &'static str,
        /// Grouping field; rows with a null group form one group.
        group_by: &'static str,
        /// Upper bound of each group's sum.
        limit: f64,
    },
    /// `icb_codeN` shares its first N-1 digits with `icb_code(N-1)`, and a
    /// level is only present when its parent is.
    IcbHierarchy,
}

fn violation(
    schema: &DomainSchema,
    row: usize,
    field: &str,
    kind: ValidationFaultKind,
    detail: String,
) -> ValidationFault {
    ValidationFault::new(schema.domain, Some(row), field, kind, detail)
}

pub(super) fn check_row(
    schema: &DomainSchema,
    idx: usize,
    row: &Map<String, Value>,
) -> Result<(), ValidationFault> {
    let num = |f: &str| row.get(f).and_then(Value::as_f64);
    for rule in schema.row_rules {
        match *rule {
            RowRule::NonNegative(f) => {
                if let Some(v) = num(f).filter(|v| *v < 0.0) {
                    return Err(violation(
                        schema,
                        idx,
                        f,
                        ValidationFaultKind::OutOfRange,
                        format!("{v} is negative"),
                    ));
                }
            }
            RowRule::NonNegativeWith { field, with } => {
                if num(with).is_some()
                    && let Some(v) = num(field).filter(|v| *v < 0.0)
                {
                    return Err(violation(
                        schema,
                        idx,
                        field,
                        ValidationFaultKind::OutOfRange,
                        format!("{v} is negative"),
                    ));
                }
            }
            RowRule::Positive(f) => {
                if let Some(v) = num(f).filter(|v| *v <= 0.0) {
                    return Err(violation(
                        schema,
                        idx,
                        f,
                        ValidationFaultKind::OutOfRange,
                        format!("{v} is not positive"),
                    ));
                }
            }
            RowRule::AtMost { lower, upper } => {
                if let (Some(lo), Some(hi)) = (num(lower), num(upper))
                    && lo > hi
                {
                    return Err(violation(
                        schema,
                        idx,
                        lower,
                        ValidationFaultKind::ConstraintViolated,
                        format!("{lower}={lo} exceeds {upper}={hi}"),
                    ));
                }
            }
            RowRule::CurrencyCode(f) => {
                if let Some(code) = row.get(f).and_then(Value::as_str)
                    && !(code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()))
                {
                    return Err(violation(
                        schema,
                        idx,
                        f,
                        ValidationFaultKind::OutOfRange,
                        format!("`{code}` is not an ISO currency code"),
                    ));
                }
            }
        }
    }
    Ok(())
}

pub(super) fn check_table(
    schema: &DomainSchema,
    rows: &[Map<String, Value>],
) -> Result<(), ValidationFault> {
    for rule in schema.table_rules {
        match *rule {
            TableRule::PercentSumAtMost {
                field,
                group_by,
                limit,
            } => check_percent_sum(schema, rows, field, group_by, limit)?,
            TableRule::IcbHierarchy => check_icb(schema, rows)?,
        }
    }
    Ok(())
}

fn check_percent_sum(
    schema: &DomainSchema,
    rows: &[Map<String, Value>],
    field: &'static str,
    group_by: &'static str,
    limit: f64,
) -> Result<(), ValidationFault> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        let Some(pct) = row.get(field).and_then(Value::as_f64) else {
            continue;
        };
        let group = row
            .get(group_by)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let total = sums.entry(group.clone()).or_insert(0.0);
        *total += pct;
        if *total > limit + SUM_EPSILON {
            let scope = if group.is_empty() {
                String::from("undated rows")
            } else {
                format!("{group_by} {group}")
            };
            return Err(violation(
                schema,
                idx,
                field,
                ValidationFaultKind::ConstraintViolated,
                format!("{field} sums to {total:.2} for {scope}, above {limit}"),
            ));
        }
    }
    Ok(())
}

const ICB_LEVELS: [(&str, &str); 4] = [
    ("icb_code1", "icb_name1"),
    ("icb_code2", "icb_name2"),
    ("icb_code3", "icb_name3"),
    ("icb_code4", "icb_name4"),
];

fn check_icb(schema: &DomainSchema, rows: &[Map<String, Value>]) -> Result<(), ValidationFault> {
    for (idx, row) in rows.iter().enumerate() {
        let code = |level: usize| row.get(ICB_LEVELS[level].0).and_then(Value::as_str);
        for level in 1..ICB_LEVELS.len() {
            let field = ICB_LEVELS[level].0;
            let Some(child) = code(level) else {
                continue;
            };
            let Some(parent) = code(level - 1) else {
                return Err(violation(
                    schema,
                    idx,
                    field,
                    ValidationFaultKind::ConstraintViolated,
                    format!("{field}={child} has no parent level"),
                ));
            };
            // Level N+1 shares the first N digits of level N.
            let prefix = level;
            if child.len() < prefix
                || parent.len() < prefix
                || child.as_bytes()[..prefix] != parent.as_bytes()[..prefix]
            {
                return Err(violation(
                    schema,
                    idx,
                    field,
                    ValidationFaultKind::ConstraintViolated,
                    format!("{field}={child} is not under {parent}"),
                ));
            }
        }
        for (code_field, name_field) in ICB_LEVELS {
            if row.get(code_field).is_some_and(Value::is_string)
                && row.get(name_field).is_none_or(Value::is_null)
            {
                return Err(violation(
                    schema,
                    idx,
                    name_field,
                    ValidationFaultKind::MissingField,
                    format!("{code_field} present without a name"),
                ));
            }
        }
    }
    Ok(())
}

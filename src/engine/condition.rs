// SPDX-License-Identifier: MIT

//! The closed set of rule conditions and their predicates

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A rule condition.
///
/// The set is closed on purpose: adding or removing a condition is a
/// compile-time-checked change everywhere conditions are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Eq,
    Neq,
    Gte,
    Gt,
    Contains,
}

/// Evaluator runtime errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// `contains` over a value with no membership semantics (number, bool,
    /// null, object).
    #[error("contains is only defined for strings and arrays")]
    UnsupportedHaystack,
}

impl Condition {
    /// Parse a condition name, returning `None` for anything outside the set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Condition::Eq),
            "neq" => Some(Condition::Neq),
            "gte" => Some(Condition::Gte),
            "gt" => Some(Condition::Gt),
            "contains" => Some(Condition::Contains),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Condition::Eq => "eq",
            Condition::Neq => "neq",
            Condition::Gte => "gte",
            Condition::Gt => "gt",
            Condition::Contains => "contains",
        }
    }

    /// Apply the condition's predicate to the resolved field value and the
    /// rule's reference value.
    pub fn evaluate(&self, value: &Value, reference: &Value) -> Result<bool, ConditionError> {
        match self {
            Condition::Eq => Ok(values_equal(value, reference)),
            Condition::Neq => Ok(!values_equal(value, reference)),
            Condition::Gt => Ok(compare(value, reference, |ord| ord.is_gt())),
            Condition::Gte => Ok(compare(value, reference, |ord| ord.is_ge())),
            Condition::Contains => check_contains(value, reference),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Equality with cross-representation numeric compare (45 equals 45.0);
/// every other pairing uses structural equality.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
            _ => a == b,
        },
        _ => left == right,
    }
}

/// Ordering over numbers (as f64) or strings (lexicographic). Any other
/// pairing is unordered and the predicate is false.
fn compare<F>(left: &Value, right: &Value, accept: F) -> bool
where
    F: Fn(std::cmp::Ordering) -> bool,
{
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).map(&accept).unwrap_or(false),
            _ => false,
        },
        (Value::String(a), Value::String(b)) => accept(a.cmp(b)),
        _ => false,
    }
}

fn check_contains(haystack: &Value, needle: &Value) -> Result<bool, ConditionError> {
    match haystack {
        // Substring test against the needle's string form.
        Value::String(s) => Ok(s.contains(&needle_string(needle))),
        // Element membership.
        Value::Array(items) => Ok(items.iter().any(|item| values_equal(item, needle))),
        _ => Err(ConditionError::UnsupportedHaystack),
    }
}

fn needle_string(needle: &Value) -> String {
    match needle {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// SPDX-License-Identifier: MIT

//! Ordered structural checks and rule orchestration
//!
//! Checks run fail-fast in a fixed order clients depend on; the only
//! multi-message case is when both `rule` and `data` are missing from the
//! payload. A missing *or falsy* `rule`/`data` counts as absent, matching the
//! behavior the API has always had.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::condition::Condition;
use super::path::{field_to_string, is_truthy, resolve, split_segments, ExistencePolicy};
use super::verdict::Verdict;

/// Field paths may nest at most two levels below the root key.
pub const MAX_SEGMENTS: usize = 3;

/// A structural violation found before (or while) evaluating a rule.
///
/// Display strings are part of the API contract; do not reword them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Empty or non-object request body.
    #[error("Invalid JSON payload passed.")]
    InvalidPayload,
    /// Both halves missing; reported as a two-message list, see
    /// [`ValidationError::message`].
    #[error("rule is required. data is required.")]
    RuleAndDataRequired,
    #[error("rule is required.")]
    RuleRequired,
    #[error("data is required.")]
    DataRequired,
    #[error("rule should be an object.")]
    RuleNotObject,
    #[error("{key} in rule is required.")]
    RuleKeyRequired { key: &'static str },
    #[error("field in rule should not contain nested objects more than two levels.")]
    FieldTooDeep,
    #[error("condition in rule should be one of [eq | neq | gte | gt | contains].")]
    UnknownCondition,
    #[error("data should be either a valid JSON object, a valid array or a string.")]
    DataNotValidShape,
    #[error("field {field} is missing from data.")]
    FieldMissing { field: String },
    #[error("condition contains cannot be applied to the value of field {field}.")]
    ContainsUnsupported { field: String },
}

/// The `message` half of a response envelope: a single line, or the ordered
/// list emitted for the dual-error case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    One(String),
    Many(Vec<String>),
}

impl ValidationError {
    pub fn message(&self) -> Message {
        match self {
            ValidationError::RuleAndDataRequired => Message::Many(vec![
                "rule is required.".to_string(),
                "data is required.".to_string(),
            ]),
            other => Message::One(other.to_string()),
        }
    }
}

/// A rule that has passed every structural check, ready to evaluate.
#[derive(Debug, Clone)]
pub struct CheckedRule {
    pub field: String,
    pub segments: Vec<String>,
    pub condition: Condition,
    pub condition_value: Value,
}

/// Run the ordered structural checks over a raw request payload, returning
/// the checked rule and a borrow of the data document.
pub fn check_payload(
    payload: &Value,
    policy: ExistencePolicy,
) -> Result<(CheckedRule, &Value), ValidationError> {
    let body = match payload {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(ValidationError::InvalidPayload),
    };

    let rule = body.get("rule").filter(|v| is_truthy(v));
    let data = body.get("data").filter(|v| is_truthy(v));
    let (rule, data) = match (rule, data) {
        (Some(rule), Some(data)) => (rule, data),
        (None, None) => return Err(ValidationError::RuleAndDataRequired),
        (None, Some(_)) => return Err(ValidationError::RuleRequired),
        (Some(_), None) => return Err(ValidationError::DataRequired),
    };

    let rule = match rule {
        Value::Object(map) => map,
        _ => return Err(ValidationError::RuleNotObject),
    };

    // Key presence, not truthiness: a null condition_value is still present.
    let field_raw = rule
        .get("field")
        .ok_or(ValidationError::RuleKeyRequired { key: "field" })?;
    let condition_raw = rule
        .get("condition")
        .ok_or(ValidationError::RuleKeyRequired { key: "condition" })?;
    let condition_value = rule
        .get("condition_value")
        .ok_or(ValidationError::RuleKeyRequired {
            key: "condition_value",
        })?;

    let field = field_to_string(field_raw);
    let segments = split_segments(&field);
    if segments.len() > MAX_SEGMENTS {
        return Err(ValidationError::FieldTooDeep);
    }

    let condition = condition_raw
        .as_str()
        .and_then(Condition::parse)
        .ok_or(ValidationError::UnknownCondition)?;

    if !matches!(data, Value::Object(_) | Value::Array(_) | Value::String(_)) {
        return Err(ValidationError::DataNotValidShape);
    }

    if !resolve(&segments, data).exists(policy) {
        return Err(ValidationError::FieldMissing { field });
    }

    Ok((
        CheckedRule {
            field,
            segments,
            condition,
            condition_value: condition_value.clone(),
        },
        data,
    ))
}

/// Validate a payload end to end: structural checks, path resolution, then
/// condition evaluation.
pub fn validate(payload: &Value, policy: ExistencePolicy) -> Result<Verdict, ValidationError> {
    let (rule, data) = check_payload(payload, policy)?;
    let field_value = resolve(&rule.segments, data).into_value();
    let passed = rule
        .condition
        .evaluate(&field_value, &rule.condition_value)
        .map_err(|_| ValidationError::ContainsUnsupported {
            field: rule.field.clone(),
        })?;

    Ok(Verdict {
        error: !passed,
        field: rule.field,
        field_value,
        condition: rule.condition,
        condition_value: rule.condition_value,
    })
}

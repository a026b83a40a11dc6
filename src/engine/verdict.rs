// SPDX-License-Identifier: MIT

//! The structured result of evaluating a rule

use serde::Serialize;
use serde_json::Value;

use super::condition::Condition;

/// Snapshot of one rule evaluation: the rule's fields plus the resolved value
/// and the boolean outcome. Built once per request, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub error: bool,
    pub field: String,
    /// The value the field path resolved to, or null when the path did not
    /// resolve to anything.
    pub field_value: Value,
    pub condition: Condition,
    pub condition_value: Value,
}

impl Verdict {
    /// Human-readable outcome line for the response envelope.
    pub fn message(&self) -> String {
        if self.error {
            format!("field {} failed validation.", self.field)
        } else {
            format!("field {} successfully validated.", self.field)
        }
    }
}

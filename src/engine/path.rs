// SPDX-License-Identifier: MIT

//! Field-path resolution over JSON values
//!
//! Paths use dot or bracket-quote notation (`missions.count`,
//! `missions["count"]`); both split to the same segment list. The walk
//! mirrors the behavior upstream clients already depend on: a truthy current
//! value is indexed by the next segment, anything else short-circuits to
//! absence.

use serde_json::Value;

/// Outcome of walking a field path through a data value.
///
/// `Absent` means the walk fell off the data at some segment. `Found` carries
/// the value at the end of the path, which may itself be falsy; whether that
/// counts as "the field exists" is an [`ExistencePolicy`] decision, not a
/// property of the walk.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Value),
    Absent,
}

impl Resolution {
    /// The resolved value, with absence collapsed to JSON null.
    pub fn into_value(self) -> Value {
        match self {
            Resolution::Found(value) => value,
            Resolution::Absent => Value::Null,
        }
    }

    /// Whether this resolution passes the existence check under `policy`.
    pub fn exists(&self, policy: ExistencePolicy) -> bool {
        match (self, policy) {
            (Resolution::Absent, _) => false,
            (Resolution::Found(value), ExistencePolicy::Truthy) => is_truthy(value),
            (Resolution::Found(_), ExistencePolicy::Present) => true,
        }
    }
}

/// Policy for the field-existence check.
///
/// The upstream behavior conflates "resolves to a falsy value" (0, "", false,
/// null) with "missing". `Truthy` preserves that; `Present` accepts any value
/// the walk actually reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistencePolicy {
    #[default]
    Truthy,
    Present,
}

impl ExistencePolicy {
    /// Read the policy from `EXISTENCE_POLICY` ("truthy" | "present"),
    /// defaulting to `Truthy`.
    pub fn from_env() -> Self {
        match std::env::var("EXISTENCE_POLICY").as_deref() {
            Ok("present") => ExistencePolicy::Present,
            _ => ExistencePolicy::Truthy,
        }
    }
}

/// JavaScript-style truthiness over JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The string form a field expression is coerced to before splitting.
///
/// JSON strings use their raw contents; any other value uses its compact JSON
/// rendering (so a numeric field like `5` indexes an array).
pub fn field_to_string(field: &Value) -> String {
    match field {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Split a field-path expression into non-empty segments.
///
/// Separators are `.`, `["` and `"]`; empty segments left behind by leading
/// or trailing separators and bracket artifacts are dropped.
pub fn split_segments(path: &str) -> Vec<String> {
    path.replace("[\"", ".")
        .replace("\"]", ".")
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Walk `data` through `segments` left to right.
///
/// The same walk serves both the existence check and value extraction.
pub fn resolve(segments: &[String], data: &Value) -> Resolution {
    let mut current = Resolution::Found(data.clone());
    for segment in segments {
        current = match current {
            Resolution::Found(ref value) if is_truthy(value) => index(value, segment),
            _ => Resolution::Absent,
        };
    }
    current
}

fn index(value: &Value, segment: &str) -> Resolution {
    match value {
        Value::Object(map) => map
            .get(segment)
            .cloned()
            .map(Resolution::Found)
            .unwrap_or(Resolution::Absent),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .map(Resolution::Found)
            .unwrap_or(Resolution::Absent),
        Value::String(s) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| s.chars().nth(i))
            .map(|c| Resolution::Found(Value::String(c.to_string())))
            .unwrap_or(Resolution::Absent),
        // Numbers, bools and null have no members to index into.
        _ => Resolution::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(path: &str) -> Vec<String> {
        split_segments(path)
    }

    #[test]
    fn test_split_dot_notation() {
        assert_eq!(segs("a.b.c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_bracket_notation() {
        assert_eq!(segs(r#"a["b"]["c"]"#), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_mixed_notation() {
        assert_eq!(segs(r#"a.b["c"]"#), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(segs(".a..b."), vec!["a", "b"]);
        assert!(segs("").is_empty());
        assert!(segs(".").is_empty());
    }

    #[test]
    fn test_notation_invariance() {
        let data = json!({"missions": {"count": 45}});
        assert_eq!(
            resolve(&segs("missions.count"), &data),
            resolve(&segs(r#"missions["count"]"#), &data)
        );
        assert_eq!(
            resolve(&segs("missions.count"), &data),
            Resolution::Found(json!(45))
        );
    }

    #[test]
    fn test_resolve_top_level_key() {
        let data = json!({"missions": 45});
        assert_eq!(resolve(&segs("missions"), &data), Resolution::Found(json!(45)));
    }

    #[test]
    fn test_resolve_missing_key() {
        let data = json!({"missions": 45});
        assert_eq!(resolve(&segs("crew"), &data), Resolution::Absent);
        assert_eq!(resolve(&segs("crew.name"), &data), Resolution::Absent);
    }

    #[test]
    fn test_resolve_array_index() {
        let data = json!(["N", "R", "Roc", "T"]);
        assert_eq!(resolve(&segs("2"), &data), Resolution::Found(json!("Roc")));
        assert_eq!(resolve(&segs("5"), &data), Resolution::Absent);
        assert_eq!(resolve(&segs("x"), &data), Resolution::Absent);
    }

    #[test]
    fn test_resolve_string_index() {
        let data = json!("hello");
        assert_eq!(resolve(&segs("1"), &data), Resolution::Found(json!("e")));
        assert_eq!(resolve(&segs("9"), &data), Resolution::Absent);
    }

    #[test]
    fn test_resolve_short_circuits_on_falsy() {
        // "count" is 0, so the walk cannot continue below it.
        let data = json!({"missions": {"count": 0}});
        assert_eq!(resolve(&segs("missions.count.x"), &data), Resolution::Absent);
    }

    #[test]
    fn test_resolve_scalar_has_no_members() {
        let data = json!({"age": 34});
        assert_eq!(resolve(&segs("age.unit"), &data), Resolution::Absent);
    }

    #[test]
    fn test_existence_policy() {
        let found_zero = Resolution::Found(json!(0));
        assert!(!found_zero.exists(ExistencePolicy::Truthy));
        assert!(found_zero.exists(ExistencePolicy::Present));

        assert!(!Resolution::Absent.exists(ExistencePolicy::Truthy));
        assert!(!Resolution::Absent.exists(ExistencePolicy::Present));

        let found = Resolution::Found(json!("Rocinante"));
        assert!(found.exists(ExistencePolicy::Truthy));
        assert!(found.exists(ExistencePolicy::Present));
    }

    #[test]
    fn test_into_value_collapses_absence_to_null() {
        assert_eq!(Resolution::Absent.into_value(), Value::Null);
        assert_eq!(Resolution::Found(json!(45)).into_value(), json!(45));
    }

    #[test]
    fn test_field_to_string() {
        assert_eq!(field_to_string(&json!("missions.count")), "missions.count");
        assert_eq!(field_to_string(&json!(5)), "5");
        assert_eq!(field_to_string(&json!(null)), "null");
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}

//! Structural comparison against an example-shaped template
//!
//! Rules:
//! - Any numeric target matches any numeric template (numeric widening)
//! - All other scalars must have the same JSON type
//! - An empty template list matches any list; a non-empty template list
//!   requires a non-empty target whose every element matches the template's
//!   first element (homogeneous-element contract)
//! - Every template object key must be present in the target; extra target
//!   keys are ignored
//! - The first mismatch short-circuits; no error aggregation

use crate::clean::clean_payload;
use serde_json::Value;

/// First structural mismatch found between target and template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema mismatch at '{path}': {message}")]
pub struct SchemaMismatch {
    /// Dotted path into the compared structure (empty for the root)
    pub path: String,
    /// Human-readable description of the mismatch
    pub message: String,
}

impl SchemaMismatch {
    fn at(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Structurally validate `target` against `template`.
///
/// Pure: no side effects, short-circuits on the first mismatch.
pub fn validate(target: &Value, template: &Value) -> Result<(), SchemaMismatch> {
    check(target, template, "")
}

fn check(target: &Value, template: &Value, path: &str) -> Result<(), SchemaMismatch> {
    // Numeric widening: any number satisfies a numeric template
    if template.is_number() && target.is_number() {
        return Ok(());
    }

    if std::mem::discriminant(template) != std::mem::discriminant(target) {
        return Err(SchemaMismatch::at(
            path,
            format!(
                "expected {}, found {}",
                type_name(template),
                type_name(target)
            ),
        ));
    }

    match (template, target) {
        (Value::Array(template_items), Value::Array(target_items)) => {
            let Some(template_item) = template_items.first() else {
                // Empty template list matches any list
                return Ok(());
            };
            if target_items.is_empty() {
                return Err(SchemaMismatch::at(path, "list is empty but content is expected"));
            }
            for (i, item) in target_items.iter().enumerate() {
                check(item, template_item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        (Value::Object(template_map), Value::Object(target_map)) => {
            for (key, template_value) in template_map {
                let Some(target_value) = target_map.get(key) else {
                    return Err(SchemaMismatch::at(path, format!("missing required key '{key}'")));
                };
                check(target_value, template_value, &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Clean raw generator text, parse it as JSON, and validate it against
/// `template`, returning the parsed value on success.
pub fn check_payload(text: &str, template: &Value) -> Result<Value, SchemaMismatch> {
    let cleaned = clean_payload(text);
    let parsed: Value = serde_json::from_str(&cleaned).map_err(|e| {
        let preview: String = cleaned.chars().take(100).collect();
        SchemaMismatch::at("", format!("not valid JSON: {e} (content: {preview})"))
    })?;
    validate(&parsed, template)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn reflexive_for_well_formed_values() {
        let values = [
            json!("text"),
            json!(42),
            json!(1.5),
            json!(true),
            json!([1, 2, 3]),
            json!({"a": {"b": ["c"]}, "d": 0}),
        ];
        for v in &values {
            assert_eq!(validate(v, v), Ok(()));
        }
    }

    #[test]
    fn numeric_widening_both_directions() {
        assert_eq!(validate(&json!(2), &json!(1.5)), Ok(()));
        assert_eq!(validate(&json!(2.5), &json!(1)), Ok(()));
    }

    #[test]
    fn scalar_type_mismatch_reports_path() {
        let template = json!({"a": {"b": "text"}});
        let target = json!({"a": {"b": 7}});
        let err = validate(&target, &template).unwrap_err();
        assert_eq!(err.path, ".a.b");
        assert!(err.message.contains("expected string"));
    }

    #[test]
    fn missing_key_reports_path() {
        let template = json!({"outer": {"required": 1}});
        let target = json!({"outer": {}});
        let err = validate(&target, &template).unwrap_err();
        assert_eq!(err.path, ".outer");
        assert!(err.message.contains("'required'"));
    }

    #[test]
    fn extra_target_keys_ignored() {
        let template = json!({"a": 1});
        let target = json!({"a": 2, "b": "extra"});
        assert_eq!(validate(&target, &template), Ok(()));
    }

    #[test]
    fn empty_template_list_matches_any_list() {
        assert_eq!(validate(&json!([]), &json!([])), Ok(()));
        assert_eq!(validate(&json!([1, "mixed"]), &json!([])), Ok(()));
    }

    #[test]
    fn nonempty_template_list_rejects_empty_target() {
        let err = validate(&json!([]), &json!([{"k": 1}])).unwrap_err();
        assert!(err.message.contains("empty"));
    }

    #[test]
    fn list_elements_checked_against_first_template_element() {
        let template = json!([{"id": "1", "title": ""}]);
        let target = json!([
            {"id": "1", "title": "a"},
            {"id": "2"}
        ]);
        let err = validate(&target, &template).unwrap_err();
        assert_eq!(err.path, "[1]");
        assert!(err.message.contains("'title'"));
    }

    #[test]
    fn check_payload_cleans_and_parses() {
        let template = json!({"ok": true});
        let raw = "<think>reasoning</think>```json\n{\"ok\": false}\n```";
        let value = check_payload(raw, &template).unwrap();
        assert_eq!(value, json!({"ok": false}));
    }

    #[test]
    fn check_payload_rejects_garbage() {
        let err = check_payload("not json at all", &json!({})).unwrap_err();
        assert!(err.message.contains("not valid JSON"));
    }
}

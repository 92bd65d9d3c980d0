// Reserved vocabulary of the input document. The representation is
// serde_json's `Value` (with `preserve_order`, so object keys keep document
// order); this module names the reserved keys and the diagnostic shape
// names the resolver and builder report with.

use serde_json::Value;

/// Reserved key carrying an explicit type identifier.
pub const TYPE_TAG_KEY: &str = "$type";
/// Reserved key inferring a table wrapper when no tag is present.
pub const ROWS_KEY: &str = "rows";
/// Reserved key inferring a control wrapper when no tag is present.
pub const CONTROL_KEY: &str = "control";

/// Human-readable shape name for diagnostics.
pub fn shape_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shape_names_cover_every_variant() {
        assert_eq!(shape_name(&json!(null)), "null");
        assert_eq!(shape_name(&json!(true)), "a boolean");
        assert_eq!(shape_name(&json!(3.5)), "a number");
        assert_eq!(shape_name(&json!("x")), "a string");
        assert_eq!(shape_name(&json!([1, 2])), "an array");
        assert_eq!(shape_name(&json!({"a": 1})), "an object");
    }
}

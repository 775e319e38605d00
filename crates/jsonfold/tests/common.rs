#![allow(missing_docs, dead_code)]

use bstr::ByteSlice;
use jsonfold::{Value, decode};

pub const DOCUMENT: &str = r#"
{
    "moderation": {"decision": "allow", "reason": null},
    "request": {
        "filename": "example.rs",
        "options": {"opt_level": 2, "features": ["serde", "log"]}
    },
    "scores": [1, -2, 3.25, 1e3],
    "matrix": [[], [{}], [["a"]]],
    "escapes": "tab\tquote\"snow☃",
    "empty": ""
}
"#;

/// Converts a decoded tree into a `serde_json` value so it can be rendered
/// as compact JSON.
pub fn to_serde(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::String(s) => serde_json::Value::String(s.to_str_lossy().into_owned()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_serde).collect()),
        Value::Object(object) => serde_json::Value::Object(
            object
                .iter()
                .map(|(k, v)| (k.to_str_lossy().into_owned(), to_serde(v)))
                .collect(),
        ),
    }
}

/// Decodes `input` and renders the outcome on one line.
pub fn render(input: &[u8]) -> String {
    match decode(input) {
        Ok(value) => to_serde(&value).to_string(),
        Err(err) => format!("error: {err}"),
    }
}

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use crate::enums::http_method::HttpMethod;

pub const COMPARISON_PROMPT: &str = r#"Compare the following two OpenAPI YAML specifications and identify all changes.
Focus on added/removed endpoints, modified parameters, and breaking changes.

For each change, provide a 'technicalDetail' field that gives a comprehensive technical explanation,
specifying exactly which parameters, types, or schema fields were altered, added, or removed.

YAML 1 (Old):
{{OLD_SPEC}}

YAML 2 (New):
{{NEW_SPEC}}
"#;

pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Structured-output schema handed to the comparison engine. Mirrors the
/// shape `ResultSchema` accepts.
pub static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let methods: Vec<&str> = HttpMethod::ALL.iter().map(HttpMethod::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "Overall summary of the changes" },
            "versionOld": { "type": "STRING" },
            "versionNew": { "type": "STRING" },
            "changes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "enum": ["ADDED", "REMOVED", "MODIFIED", "BREAKING"] },
                        "endpoint": { "type": "STRING" },
                        "method": { "type": "STRING", "enum": methods },
                        "description": { "type": "STRING", "description": "A concise summary of the change for the board." },
                        "technicalDetail": { "type": "STRING", "description": "A detailed technical explanation of the change, including specific field names and type changes." },
                        "impact": { "type": "STRING", "enum": ["LOW", "MEDIUM", "HIGH"] }
                    },
                    "required": ["type", "endpoint", "method", "description", "technicalDetail", "impact"]
                }
            }
        },
        "required": ["summary", "changes"]
    })
});

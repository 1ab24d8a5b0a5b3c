use std::str::FromStr;
use serde_json::{Map, Value};
use crate::enums::change_type::ChangeType;
use crate::enums::http_method::HttpMethod;
use crate::enums::impact_level::ImpactLevel;
use crate::enums::validation_error::ValidationError;
use crate::structs::comparison_result::ComparisonResult;
use crate::structs::spec_change::SpecChange;

const SUMMARY_FIELD: &str = "summary";
const VERSION_OLD_FIELD: &str = "versionOld";
const VERSION_NEW_FIELD: &str = "versionNew";
const CHANGES_FIELD: &str = "changes";
const TYPE_FIELD: &str = "type";
const ENDPOINT_FIELD: &str = "endpoint";
const METHOD_FIELD: &str = "method";
const DESCRIPTION_FIELD: &str = "description";
const TECHNICAL_DETAIL_FIELD: &str = "technicalDetail";
const IMPACT_FIELD: &str = "impact";

/// Gatekeeper between the comparison engine's raw output and the board.
///
/// Every rule is strict: unknown enum tags, wrong JSON types and missing
/// required fields all reject the whole payload. Nothing is coerced and no
/// partially populated result is ever returned.
pub struct ResultSchema;

impl ResultSchema {
    pub fn validate(raw: &str) -> Result<ComparisonResult, ValidationError> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
        Self::validate_value(&value)
    }

    pub fn validate_value(value: &Value) -> Result<ComparisonResult, ValidationError> {
        let root = value.as_object().ok_or_else(|| {
            ValidationError::MalformedPayload(format!("expected a JSON object, found {}", json_kind(value)))
        })?;

        let summary = required_string(root, SUMMARY_FIELD, SUMMARY_FIELD)?;
        if summary.trim().is_empty() {
            return Err(ValidationError::MissingField(SUMMARY_FIELD.to_string()));
        }

        let changes = match present(root, CHANGES_FIELD) {
            None => return Err(ValidationError::MissingField(CHANGES_FIELD.to_string())),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(invalid_type(CHANGES_FIELD, "an array")),
        };

        let changes = changes
            .iter()
            .enumerate()
            .map(|(index, item)| Self::validate_change(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComparisonResult {
            summary,
            version_old: optional_string(root, VERSION_OLD_FIELD, VERSION_OLD_FIELD)?,
            version_new: optional_string(root, VERSION_NEW_FIELD, VERSION_NEW_FIELD)?,
            changes,
        })
    }

    fn validate_change(index: usize, item: &Value) -> Result<SpecChange, ValidationError> {
        let path = format!("{}[{}]", CHANGES_FIELD, index);
        let change = item
            .as_object()
            .ok_or_else(|| invalid_type(&path, "an object"))?;

        let field = |name: &str| format!("{}.{}", path, name);

        Ok(SpecChange {
            change_type: required_enum::<ChangeType>(change, TYPE_FIELD, &field(TYPE_FIELD))?,
            endpoint: required_string(change, ENDPOINT_FIELD, &field(ENDPOINT_FIELD))?,
            method: required_enum::<HttpMethod>(change, METHOD_FIELD, &field(METHOD_FIELD))?,
            description: required_string(change, DESCRIPTION_FIELD, &field(DESCRIPTION_FIELD))?,
            technical_detail: optional_string(change, TECHNICAL_DETAIL_FIELD, &field(TECHNICAL_DETAIL_FIELD))?
                .unwrap_or_default(),
            impact: required_enum::<ImpactLevel>(change, IMPACT_FIELD, &field(IMPACT_FIELD))?,
        })
    }
}

/// `null` is treated the same as an absent key.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn required_string(object: &Map<String, Value>, key: &str, path: &str) -> Result<String, ValidationError> {
    match present(object, key) {
        None => Err(ValidationError::MissingField(path.to_string())),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(invalid_type(path, "a string")),
    }
}

fn optional_string(object: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>, ValidationError> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(invalid_type(path, "a string")),
    }
}

fn required_enum<T: FromStr>(object: &Map<String, Value>, key: &str, path: &str) -> Result<T, ValidationError> {
    let raw = required_string(object, key, path)?;
    raw.parse::<T>().map_err(|_| ValidationError::InvalidEnum {
        field: path.to_string(),
        value: raw,
    })
}

fn invalid_type(path: &str, expected: &str) -> ValidationError {
    ValidationError::InvalidType {
        field: path.to_string(),
        expected: expected.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use thiserror::Error;

/// Ways a comparison payload can fail the result contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload is not well-formed JSON object text: {0}")]
    MalformedPayload(String),
    #[error("required field '{0}' is missing")]
    MissingField(String),
    #[error("field '{field}' has value '{value}' outside its allowed set")]
    InvalidEnum { field: String, value: String },
    #[error("field '{field}' must be {expected}")]
    InvalidType { field: String, expected: String },
}

use serde::{Deserialize, Serialize};

/// Body of `POST /api/session/{id}/compare`. Absent fields read as empty
/// text and fail the precondition check.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub old_spec: String,
    #[serde(default)]
    pub new_spec: String,
}

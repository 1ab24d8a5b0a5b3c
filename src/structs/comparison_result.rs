use serde::{Deserialize, Serialize};
use crate::structs::spec_change::SpecChange;

/// Validated outcome of one comparison request. `changes` keeps the order
/// the comparison engine produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_old: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_new: Option<String>,
    pub changes: Vec<SpecChange>,
}

impl ComparisonResult {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

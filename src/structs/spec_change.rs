use serde::{Deserialize, Serialize};
use crate::enums::change_type::ChangeType;
use crate::enums::http_method::HttpMethod;
use crate::enums::impact_level::ImpactLevel;

pub const MISSING_TECHNICAL_DETAIL: &str = "No additional technical details available.";

/// One detected difference between the two specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecChange {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub endpoint: String,
    pub method: HttpMethod,
    pub description: String,
    #[serde(default)]
    pub technical_detail: String,
    pub impact: ImpactLevel,
}

impl SpecChange {
    pub fn heading(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }

    pub fn technical_detail_or_fallback(&self) -> &str {
        if self.technical_detail.trim().is_empty() {
            MISSING_TECHNICAL_DETAIL
        } else {
            &self.technical_detail
        }
    }
}

use serde::{Deserialize, Serialize};
use crate::structs::ai::gemini::gemini_content::GeminiContent;
use crate::structs::ai::gemini::gemini_generation_config::GeminiGenerationConfig;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

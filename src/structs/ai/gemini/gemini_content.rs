use serde::{Deserialize, Serialize};
use crate::structs::ai::gemini::gemini_part::GeminiPart;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn user(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![GeminiPart { text }],
        }
    }
}

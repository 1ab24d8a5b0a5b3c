use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::constants::prompts::{RESPONSE_MIME_TYPE, RESPONSE_SCHEMA};
use crate::enums::ai_provider_error::AiProviderError;
use crate::helpers::prompt_generator::generate_comparison_prompt;
use crate::structs::ai::gemini::gemini_content::GeminiContent;
use crate::structs::ai::gemini::gemini_generation_config::GeminiGenerationConfig;
use crate::structs::ai::gemini::gemini_request::GeminiRequest;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::comparison_service::ComparisonService;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    temperature: f32,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: &AiConfig) -> Result<Self, AiProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get_request(&self, old_spec: &str, new_spec: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent::user(generate_comparison_prompt(old_spec, new_spec))],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(self.temperature),
                candidate_count: Some(1),
                response_mime_type: Some(RESPONSE_MIME_TYPE.to_string()),
                response_schema: Some(RESPONSE_SCHEMA.clone()),
            }),
        }
    }

    async fn make_request(&self, url: String, request_body: GeminiRequest) -> Result<reqwest::Response, AiProviderError> {
        log::info!("📦 Request model: {}", self.model);

        self.client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(AiProviderError::from)
    }

    /// Pulls the first candidate's text out of a `generateContent` response.
    pub fn extract_text(json: &serde_json::Value) -> Result<String, AiProviderError> {
        json.get("candidates")
            .and_then(|candidates| candidates.as_array())
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
            .and_then(|parts| parts.first())
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .map(|text| text.trim().to_string())
            .ok_or_else(|| AiProviderError::SerializationError("No content in response".to_string()))
    }

    pub async fn get_non_streaming_response(&self, old_spec: &str, new_spec: &str) -> Result<String, AiProviderError> {
        let url = format!("{}/models/{}:generateContent?key={}",
                          self.base_url, self.model, self.api_key);
        let request_body = self.get_request(old_spec, new_spec);

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::error!("❌ Gemini API Error Response: {}", error_text);
            return Err(AiProviderError::from_status(status.as_u16(), error_text));
        }

        let json: serde_json::Value = response.json().await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        Self::extract_text(&json)
    }
}

#[async_trait]
impl ComparisonService for GeminiProvider {
    async fn compare(&self, old_spec: String, new_spec: String) -> Result<String, AiProviderError> {
        self.get_non_streaming_response(&old_spec, &new_spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new("test-key".to_string(), &AiConfig::default()).unwrap()
    }

    #[test]
    fn request_asks_for_structured_json() {
        let request = provider().get_request("openapi: 3.0.0", "openapi: 3.1.0");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["required"], json!(["summary", "changes"]));
        let change = &body["generationConfig"]["responseSchema"]["properties"]["changes"]["items"]["properties"];
        assert_eq!(
            change["method"]["enum"],
            json!(["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE", "CONNECT"])
        );
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("openapi: 3.1.0"));
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  {\"summary\": \"x\"}\n" }] } }]
        });

        assert_eq!(GeminiProvider::extract_text(&response).unwrap(), "{\"summary\": \"x\"}");
    }

    #[test]
    fn missing_candidates_is_a_serialization_error() {
        let err = GeminiProvider::extract_text(&json!({ "promptFeedback": {} })).unwrap_err();

        assert!(matches!(err, AiProviderError::SerializationError(_)));
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert!(matches!(AiProviderError::from_status(401, "bad key".into()), AiProviderError::AuthenticationError(_)));
        assert_eq!(
            AiProviderError::from_status(429, "quota".into()).to_string(),
            "Comparison API Error: Rate limit exceeded: quota"
        );
    }
}

use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;

/// The external engine that diffs two specifications.
///
/// Implementations return the engine's raw structured text; shaping and
/// checking it is the caller's job.
#[async_trait]
pub trait ComparisonService: Send + Sync {
    async fn compare(&self, old_spec: String, new_spec: String) -> Result<String, AiProviderError>;
}

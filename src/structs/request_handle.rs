use futures::FutureExt;
use tokio::task::JoinHandle;
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::request_status::RequestId;

pub type ServiceOutcome = Result<String, AiProviderError>;

/// The one outbound comparison call started by a `submit`.
#[derive(Debug)]
pub struct RequestHandle {
    id: RequestId,
    task: JoinHandle<ServiceOutcome>,
}

impl RequestHandle {
    pub fn new(id: RequestId, task: JoinHandle<ServiceOutcome>) -> Self {
        Self { id, task }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Takes the outcome if the call already finished, without waiting.
    pub fn try_outcome(&mut self) -> Option<ServiceOutcome> {
        if !self.task.is_finished() {
            return None;
        }
        (&mut self.task).now_or_never().map(Self::flatten)
    }

    pub async fn wait(self) -> ServiceOutcome {
        Self::flatten(self.task.await)
    }

    pub fn abort(&self) {
        self.task.abort();
    }

    fn flatten(joined: Result<ServiceOutcome, tokio::task::JoinError>) -> ServiceOutcome {
        joined.unwrap_or_else(|e| {
            Err(AiProviderError::ApiError(format!("comparison task did not complete: {}", e)))
        })
    }
}

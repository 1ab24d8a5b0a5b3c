use std::sync::Arc;
use crate::config::constants::{GENERIC_FAILURE_MESSAGE, INVALID_RESPONSE_MESSAGE, MISSING_SPECS_MESSAGE};
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::request_status::{RequestId, RequestStatus};
use crate::errors::{SpecBoardError, SpecBoardResult};
use crate::services::result_schema::ResultSchema;
use crate::structs::comparison_result::ComparisonResult;
use crate::structs::request_handle::{RequestHandle, ServiceOutcome};
use crate::traits::comparison_service::ComparisonService;

/// Drives comparison requests against the external engine.
///
/// Only one request may be in flight; its identity is carried by
/// `RequestStatus::Pending`, so an outcome for any other request id is
/// ignored. No retries are made.
pub struct ComparisonOrchestrator {
    service: Arc<dyn ComparisonService>,
    status: RequestStatus,
    last_request_id: RequestId,
}

impl ComparisonOrchestrator {
    pub fn new(service: Arc<dyn ComparisonService>) -> Self {
        Self {
            service,
            status: RequestStatus::Idle,
            last_request_id: 0,
        }
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn result(&self) -> Option<Arc<ComparisonResult>> {
        self.status.result().cloned()
    }

    /// Starts one outbound comparison. Must run inside a tokio runtime.
    ///
    /// Empty inputs fail immediately without contacting the service; a
    /// submit while another request is pending is rejected outright.
    pub fn submit(&mut self, old_spec: &str, new_spec: &str) -> SpecBoardResult<RequestHandle> {
        if let RequestStatus::Pending(request_id) = self.status {
            return Err(SpecBoardError::RequestInFlight { request_id });
        }

        if old_spec.trim().is_empty() || new_spec.trim().is_empty() {
            self.status = RequestStatus::Failed(MISSING_SPECS_MESSAGE.to_string());
            return Err(SpecBoardError::precondition(MISSING_SPECS_MESSAGE));
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.status = RequestStatus::Pending(request_id);

        log::info!("🛫 Submitting comparison #{} ({} → {} bytes)", request_id, old_spec.len(), new_spec.len());

        let service = Arc::clone(&self.service);
        let old_spec = old_spec.to_string();
        let new_spec = new_spec.to_string();
        let task = tokio::spawn(async move { service.compare(old_spec, new_spec).await });

        Ok(RequestHandle::new(request_id, task))
    }

    /// Applies the outcome of `request_id`. Outcomes of superseded requests
    /// leave the status untouched.
    pub fn complete(&mut self, request_id: RequestId, outcome: ServiceOutcome) -> &RequestStatus {
        if self.status != RequestStatus::Pending(request_id) {
            log::warn!("⚠️ Ignoring outcome of superseded comparison #{}", request_id);
            return &self.status;
        }

        self.status = match outcome {
            Ok(raw) => match ResultSchema::validate(&raw) {
                Ok(result) => {
                    log::info!("🛬 Comparison #{} landed with {} changes", request_id, result.changes.len());
                    RequestStatus::Succeeded(Arc::new(result))
                }
                Err(e) => {
                    log::error!("❌ Failed to validate comparison response #{}: {}", request_id, e);
                    RequestStatus::Failed(INVALID_RESPONSE_MESSAGE.to_string())
                }
            },
            Err(e) => {
                log::error!("❌ Comparison #{} failed: {}", request_id, e);
                RequestStatus::Failed(service_failure_message(&e))
            }
        };

        &self.status
    }

    /// Submit, wait and complete in one step.
    pub async fn compare(&mut self, old_spec: &str, new_spec: &str) -> SpecBoardResult<&RequestStatus> {
        let handle = match self.submit(old_spec, new_spec) {
            Ok(handle) => handle,
            Err(SpecBoardError::PreconditionError { .. }) => return Ok(&self.status),
            Err(e) => return Err(e),
        };

        let request_id = handle.id();
        let outcome = handle.wait().await;
        Ok(self.complete(request_id, outcome))
    }
}

/// The service's own detail text, without the error category prefix.
pub fn service_failure_message(error: &AiProviderError) -> String {
    let message = error.message();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

use std::sync::Arc;
use crate::structs::comparison_result::ComparisonResult;

pub type RequestId = u64;

/// Lifecycle of the single comparison request a session may have.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending(RequestId),
    Succeeded(Arc<ComparisonResult>),
    Failed(String),
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn result(&self) -> Option<&Arc<ComparisonResult>> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending(_) => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

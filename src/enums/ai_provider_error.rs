use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiProviderError {
    ApiError(String),
    NetworkError(String),
    SerializationError(String),
    AuthenticationError(String),
    TimeoutError(String),
}

impl AiProviderError {
    /// Detail text carried by the variant, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ApiError(msg)
            | Self::NetworkError(msg)
            | Self::SerializationError(msg)
            | Self::AuthenticationError(msg)
            | Self::TimeoutError(msg) => msg,
        }
    }

    pub fn from_status(status: u16, error_text: String) -> Self {
        match status {
            400 => Self::ApiError(format!("Bad request: {}", error_text)),
            401 => Self::AuthenticationError(error_text),
            403 => Self::ApiError(format!("Forbidden: {}", error_text)),
            429 => Self::ApiError(format!("Rate limit exceeded: {}", error_text)),
            _ => Self::ApiError(format!("HTTP {}: {}", status, error_text)),
        }
    }
}

impl fmt::Display for AiProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AiProviderError::ApiError(msg) => write!(f, "Comparison API Error: {}", msg),
            AiProviderError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AiProviderError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            AiProviderError::AuthenticationError(msg) => write!(f, "Authentication Error: {}", msg),
            AiProviderError::TimeoutError(msg) => write!(f, "Timeout Error: {}", msg),
        }
    }
}

impl Error for AiProviderError {}

impl From<reqwest::Error> for AiProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            AiProviderError::TimeoutError(error.to_string())
        } else {
            AiProviderError::NetworkError(error.to_string())
        }
    }
}

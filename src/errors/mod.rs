use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecBoardError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // Comparison lifecycle errors
    PreconditionError {
        message: String,
    },
    RequestInFlight {
        request_id: u64,
    },
    ComparisonFailed {
        message: String,
    },

    // Board interaction errors
    InvalidSelection {
        row: usize,
        available: usize,
    },
    SessionNotFound {
        session_id: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },

    // Multiple errors (for batch operations)
    MultipleErrors {
        errors: Vec<SpecBoardError>,
        context: String,
    },
}

impl SpecBoardError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn precondition(message: &str) -> Self {
        Self::PreconditionError {
            message: message.to_string(),
        }
    }

    pub fn comparison_failed(message: &str) -> Self {
        Self::ComparisonFailed {
            message: message.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::PreconditionError { .. } => true,
            Self::RequestInFlight { .. } => true,
            Self::ComparisonFailed { .. } => true,
            Self::InvalidSelection { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::SessionNotFound { .. } => false,
            Self::SystemError { .. } => false,
            Self::MultipleErrors { errors, .. } => errors.iter().any(|e| e.is_recoverable()),
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::ComparisonFailed { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::SessionNotFound { .. } => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::PreconditionError { .. } => ErrorSeverity::Low,
            Self::RequestInFlight { .. } => ErrorSeverity::Low,
            Self::InvalidSelection { .. } => ErrorSeverity::Low,
            Self::MultipleErrors { errors, .. } => {
                errors.iter()
                    .map(|e| e.severity())
                    .max()
                    .unwrap_or(ErrorSeverity::Low)
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg
            }
            Self::PreconditionError { message } => message.clone(),
            Self::RequestInFlight { request_id } => {
                format!("Comparison request #{} is still processing\n💡 Wait for it to finish before submitting again", request_id)
            }
            Self::ComparisonFailed { message } => message.clone(),
            Self::InvalidSelection { row, available } => {
                if *available == 0 {
                    format!("Row {} cannot be selected: the board has no change rows", row)
                } else {
                    format!("Row {} cannot be selected\n💡 Choose a row between 1 and {}", row, available)
                }
            }
            Self::SessionNotFound { session_id } => {
                format!("Board session '{}' not found\n💡 Reload the board to start a new session", session_id)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
            Self::MultipleErrors { errors, context } => {
                let mut msg = format!("Multiple errors occurred during {}:\n", context);
                for (i, error) in errors.iter().enumerate() {
                    msg.push_str(&format!("  {}. {}\n", i + 1, error.user_message().replace('\n', "\n     ")));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for SpecBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for SpecBoardError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for specboard operations
pub type SpecBoardResult<T> = Result<T, SpecBoardError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &SpecBoardError) {
        let severity = error.severity();

        log::debug!("[{}] {}", severity.name(), error.technical_details());

        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for SpecBoardError {
    fn from(error: std::io::Error) -> Self {
        SpecBoardError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SpecBoardError {
    fn from(error: serde_json::Error) -> Self {
        SpecBoardError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SpecBoardError {
    fn from(error: toml::de::Error) -> Self {
        SpecBoardError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

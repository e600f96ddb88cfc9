//! Error types for clausula operations.
//!
//! The document pipeline itself never fails: extraction problems collapse
//! to empty text. These errors cover the surrounding machinery (loading
//! configuration, compiling custom rules, the processing queue and the
//! transport form of extracted data).

use thiserror::Error;

/// Result type alias for clausula operations.
pub type ClausulaResult<T> = Result<T, ClausulaError>;

/// Main error type for all clausula operations.
#[derive(Error, Debug)]
pub enum ClausulaError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A field rule pattern failed to compile.
    #[error("Invalid pattern for field '{field}': {message}")]
    InvalidPattern { field: String, message: String },

    /// Processing queue rejected or lost a job.
    #[error("Queue error: {message}")]
    Queue { message: String, code: ErrorCode },

    /// Job not found.
    #[error("Job not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        job_id: Option<String>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Configuration (CFG_xxx)
    CfgInvalid,

    // Patterns (PAT_xxx)
    PatInvalidRegex,

    // Queue (QUE_xxx)
    QueueClosed,
    QueueWorkerLost,

    // Jobs (JOB_xxx)
    JobNotFound,
    JobActive,

    // Serialization (SER_xxx)
    SerInvalidJson,

    // IO
    Io,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::PatInvalidRegex => "PAT_001",
            ErrorCode::QueueClosed => "QUE_001",
            ErrorCode::QueueWorkerLost => "QUE_002",
            ErrorCode::JobNotFound => "JOB_001",
            ErrorCode::JobActive => "JOB_002",
            ErrorCode::SerInvalidJson => "SER_001",
            ErrorCode::Io => "IO_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ClausulaError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a queue-closed error.
    pub fn queue_closed() -> Self {
        Self::Queue {
            message: "processing queue is shut down".to_string(),
            code: ErrorCode::QueueClosed,
        }
    }

    /// Create a worker-lost error.
    pub fn worker_lost(message: impl Into<String>) -> Self {
        Self::Queue {
            message: message.into(),
            code: ErrorCode::QueueWorkerLost,
        }
    }

    /// Create a not found error.
    pub fn not_found(job_id: impl Into<String>) -> Self {
        let id = job_id.into();
        Self::NotFound {
            message: format!("Job with id '{}' not found", id),
            code: ErrorCode::JobNotFound,
            job_id: Some(id),
        }
    }

    /// Create an error for a job that has not finished yet.
    pub fn job_active(job_id: impl Into<String>) -> Self {
        Self::Queue {
            message: format!("Job '{}' is still queued or running", job_id.into()),
            code: ErrorCode::JobActive,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            Self::InvalidPattern { .. } => ErrorCode::PatInvalidRegex,
            Self::Queue { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::Io(_) => ErrorCode::Io,
            Self::Serialization(_) => ErrorCode::SerInvalidJson,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Configuration(_) => Some("Use a .toml, .json or .yaml file matching the documented keys"),
            Self::InvalidPattern { .. } => Some("Check the regular expression syntax of custom field rules"),
            Self::NotFound { .. } => Some("Please check the job ID and ensure it was submitted to this queue"),
            Self::Queue { code: ErrorCode::QueueClosed, .. } => Some("Start a new queue before submitting documents"),
            Self::Queue { code: ErrorCode::JobActive, .. } => Some("Wait for the job to finish before removing it"),
            _ => None,
        }
    }
}

//! Query error types

/// Errors surfaced by a query binding.
///
/// The binding never recovers or retries on its own; errors are committed to
/// the cache entry verbatim and the caller owns any retry UI.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// The service returned a fault.
    #[error("service error {status}: {message}")]
    Service {
        /// Status code reported by the service.
        status: u16,
        /// Error message.
        message: String,
        /// Service-specific error code, if available.
        code: Option<String>,
    },

    /// The transport failed before a service reply arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The reply arrived but did not match the expected result shape.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

impl QueryError {
    /// Creates a new service error.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new service error with a service-specific code.
    pub fn service_with_code(
        status: u16,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Service {
            status,
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Creates a new transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a new decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns the status code if this is a service error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the service-specific error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    ///
    /// Classification only; the retry itself belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Service { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Transport(_) => true,
            Self::Decode { .. } => false,
        }
    }
}

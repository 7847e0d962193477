use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExaError>;

#[derive(Debug, Error)]
pub enum ExaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Authentication failed (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Coarse failure class, for callers that only need to branch on cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    InvalidParameter,
    Auth,
    RateLimited,
    Api,
    Network,
    Parse,
}

impl ExaError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ExaError::Auth { status, message },
            429 => ExaError::RateLimited { message },
            400 | 422 => ExaError::InvalidParameter(message),
            _ => ExaError::Api { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExaError::Config(_) => ErrorKind::Config,
            ExaError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            ExaError::Auth { .. } => ErrorKind::Auth,
            ExaError::RateLimited { .. } => ErrorKind::RateLimited,
            ExaError::Api { .. } => ErrorKind::Api,
            ExaError::Network(_) => ErrorKind::Network,
            ExaError::Parse(_) => ErrorKind::Parse,
        }
    }
}

impl From<reqwest::Error> for ExaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExaError::Parse(err.to_string())
        } else {
            ExaError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExaError {
    fn from(err: serde_json::Error) -> Self {
        ExaError::Parse(err.to_string())
    }
}

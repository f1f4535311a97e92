use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RouterError {
    /// Backend answered 429. Absorbed by the failover transport.
    #[error("Rate limited by {0}")]
    RateLimited(String),

    /// Every equivalent endpoint for a backend was exhausted without success
    #[error("Endpoint Unavailable: {0}")]
    EndpointUnavailable(String),

    /// No executor produced a usable quote
    #[error("No Route: {0}")]
    NoRoute(String),

    /// Backend returned malformed or incomplete data
    #[error("Invalid Response: {0}")]
    InvalidResponse(String),

    /// Backend answered with an authoritative non-2xx status
    #[error("Backend Error {status} from {backend}: {body}")]
    BackendStatus {
        backend: String,
        status: u16,
        body: String,
    },

    /// The execution delegate could not obtain or build a final transaction
    #[error("Transaction Build Failed: {0}")]
    TransactionBuildFailed(String),

    /// Transport-level failure (timeout, connection, DNS)
    #[error("HTTP Error: {0}")]
    Http(String),

    #[error("Timeout Error: {0}")]
    Timeout(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for RouterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RouterError::Timeout(err.to_string())
        } else if err.is_decode() {
            RouterError::InvalidResponse(format!("Failed to decode response body: {}", err))
        } else {
            RouterError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::InvalidResponse(format!("JSON serialization/deserialization error: {}", err))
    }
}

impl RouterError {
    /// Whether trying an equivalent endpoint could succeed where this attempt failed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RouterError::RateLimited(_) => true,
            RouterError::Http(_) => true,
            RouterError::Timeout(_) => true,
            RouterError::EndpointUnavailable(_) => false, // every endpoint already tried
            RouterError::BackendStatus { .. } => false,  // authoritative answer
            RouterError::NoRoute(_) => false,
            RouterError::InvalidResponse(_) => false,
            RouterError::TransactionBuildFailed(_) => false,
            RouterError::Config(_) => false,
            RouterError::InvalidInput(_) => false,
        }
    }

    /// Failures that stay inside an executor and only turn its quote into `None`.
    pub fn is_backend_local(&self) -> bool {
        !matches!(
            self,
            RouterError::TransactionBuildFailed(_)
                | RouterError::Config(_)
                | RouterError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;

use thiserror::Error;

/// Errors that can occur during external service communication
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Service unreachable or timeout
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Authentication error (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    /// The caller handed over something the service can't act on
    #[error("{0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    pub fn from_status(status: reqwest::StatusCode, text: String) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized(text)
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(text),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(text),
            status if status.is_server_error() => {
                Self::ServiceUnavailable(format!("{}: {}", status, text))
            }
            status => Self::HttpError(format!("{}: {}", status, text)),
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

//! Stop-data client error types.

use std::fmt;

/// Errors from the stop-data HTTP client and cache.
#[derive(Debug)]
pub enum StopsError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json { message: String },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Disk cache read/write failed
    Cache { message: String },
}

impl fmt::Display for StopsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopsError::Http(e) => write!(f, "HTTP error: {e}"),
            StopsError::Json { message } => write!(f, "JSON parse error: {message}"),
            StopsError::Api { status, message } => write!(f, "API error {status}: {message}"),
            StopsError::Cache { message } => write!(f, "cache error: {message}"),
        }
    }
}

impl std::error::Error for StopsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StopsError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StopsError {
    fn from(err: reqwest::Error) -> Self {
        StopsError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StopsError::Api {
            status: 404,
            message: "route not found".into(),
        };
        assert_eq!(err.to_string(), "API error 404: route not found");

        let err = StopsError::Cache {
            message: "disk full".into(),
        };
        assert!(err.to_string().contains("disk full"));
    }
}

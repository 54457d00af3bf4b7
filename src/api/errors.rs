use thiserror::Error;
use url::Url;

use crate::errors::BackendFailure;

/// The network died before the server produced a status code.
///
/// Distinct from [`BackendFailure`] so a caller can never mistake "no such
/// resource" for "the connection is down".
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out, the operation may still have been accepted by the array: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("connection to the Unisphere server failed: {0}")]
    Connection(#[source] reqwest::Error),

    #[error(transparent)]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else if error.is_connect() {
            Self::Connection(error)
        } else {
            Self::Http(error)
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} cannot be a base, provide a valid URL")]
    CannotBeBase(Url),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Failure(#[from] BackendFailure),

    #[error("Job {0} not found")]
    JobNotFound(String),

    #[error("Error {operation}. Job finished with status {status}. Result: {result:?}")]
    JobFailed {
        operation: String,
        status: String,
        result: Option<String>,
    },

    #[error("Wait for job {0} was cancelled before a terminal status was observed")]
    Cancelled(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_failure_display_carries_context() {
        let error = ApiError::from(BackendFailure::new(
            "PUT storagegroup resource",
            StatusCode::BAD_REQUEST,
            "Invalid srpId",
        ));
        let message = format!("{error}");
        assert!(message.contains("PUT storagegroup resource"));
        assert!(message.contains("400"));
        assert!(message.contains("Invalid srpId"));
    }

    #[test]
    fn test_job_failed_display() {
        let error = ApiError::JobFailed {
            operation: "POST storagegroup resource".to_string(),
            status: "failed".to_string(),
            result: Some("SG1 already exists".to_string()),
        };
        let message = format!("{error}");
        assert!(message.contains("POST storagegroup resource"));
        assert!(message.contains("failed"));
        assert!(message.contains("SG1 already exists"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
        assert_send_sync::<TransportError>();
    }
}

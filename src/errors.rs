use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use thiserror::Error;

/// A request the server answered with a status code outside the success set.
///
/// Carries enough context for a caller to act on: which operation was being
/// performed, the exact status code, and the raw server message.
#[derive(Debug, Error)]
pub struct BackendFailure {
    pub operation: String,
    pub status: StatusCode,
    pub msg: String,
}

impl BackendFailure {
    pub fn new(operation: impl Into<String>, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "Error {}. The status code received is {} and the message is: {}",
            self.operation, self.status, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failure_display() {
        let failure = BackendFailure::new(
            "POST storagegroup resource",
            StatusCode::INTERNAL_SERVER_ERROR,
            "A problem occurred modifying the storage group",
        );
        let message = format!("{failure}");
        assert!(message.contains("POST storagegroup resource"));
        assert!(message.contains("500"));
        assert!(message.contains("A problem occurred modifying the storage group"));
    }
}

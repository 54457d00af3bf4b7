use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt::Display;

/// Job status vocabulary reported by the array.
///
/// The non-terminal set is closed: `created`, `scheduled`, `running`,
/// `validating`, `validated`. `succeeded` is the only terminal success.
/// Every other string the server may report lands in [`JobStatus::Other`]
/// and is treated as terminal failure, not retried.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "String")]
pub enum JobStatus {
    Created,
    Scheduled,
    Running,
    Validating,
    Validated,
    Succeeded,
    Other(String),
}

impl Default for JobStatus {
    /// A handle that arrives without a status has only just been created;
    /// the tracker polls to find out more.
    fn default() -> Self {
        Self::Created
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        // Status comparison is case-insensitive on read.
        match raw.to_lowercase().as_str() {
            "created" => Self::Created,
            "scheduled" => Self::Scheduled,
            "running" => Self::Running,
            "validating" => Self::Validating,
            "validated" => Self::Validated,
            "succeeded" => Self::Succeeded,
            _ => Self::Other(raw),
        }
    }
}

impl JobStatus {
    /// No further state change will occur once a terminal status is seen.
    pub const fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Created | Self::Scheduled | Self::Running | Self::Validating | Self::Validated
        )
    }

    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub const fn has_failed(&self) -> bool {
        self.is_terminal() && !self.is_succeeded()
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Running => write!(f, "running"),
            Self::Validating => write!(f, "validating"),
            Self::Validated => write!(f, "validated"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Classification of a response status code, applied uniformly before any
/// caller-specific logic runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success,
    ClientError,
    ServerError,
    Unclassified,
}

impl Outcome {
    /// Success is exactly {200, 201, 202, 204}; anything else is an error.
    /// 202 additionally means the call is executing asynchronously and the
    /// body carries a job handle.
    pub fn of(status: StatusCode) -> Self {
        match status.as_u16() {
            200 | 201 | 202 | 204 => Self::Success,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unclassified,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

use std::time::Duration;
use url::Url;

use crate::api::PollBudget;

/// Default Unisphere REST API version segment.
pub const DEFAULT_API_VERSION: &str = "91";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_POLL_RETRIES: u32 = 200;

/// Everything the client needs to talk to one Unisphere server.
///
/// Built explicitly by the embedding application and handed to
/// [`RestClient::new`](crate::api::RestClient::new); there is no config-file
/// discovery and no process-wide state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub username: String,
    pub password: String,
    pub api_version: String,
    /// Verify the server's TLS certificate. Disable only for lab arrays
    /// with self-signed certificates.
    pub verify_tls: bool,
    pub request_timeout: Duration,
    /// Seconds between job-status polls.
    pub poll_interval: Duration,
    /// Maximum number of job-status polls per wait call.
    pub poll_retries: u32,
    /// Optional application identifier reported to the server.
    pub application_type: Option<String>,
}

impl ClientConfig {
    /// Configuration with the documented defaults: TLS verification on,
    /// 120 second request timeout, 5 second poll interval, 200 poll
    /// attempts, API version "91".
    pub fn new(base_url: Url, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url,
            username: username.into(),
            password: password.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            verify_tls: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_retries: DEFAULT_POLL_RETRIES,
            application_type: None,
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    #[must_use]
    pub const fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_poll_retries(mut self, retries: u32) -> Self {
        self.poll_retries = retries;
        self
    }

    #[must_use]
    pub fn with_application_type(mut self, application_type: impl Into<String>) -> Self {
        self.application_type = Some(application_type.into());
        self
    }

    /// A fresh poll budget from the configured interval and retry count.
    /// Each wait call should take its own; budgets are not renewed.
    #[must_use]
    pub const fn poll_budget(&self) -> PollBudget {
        PollBudget::new(self.poll_interval, self.poll_retries)
    }
}

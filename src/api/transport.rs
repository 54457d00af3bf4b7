use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use super::errors::{ApiError, TransportError};
use crate::config::ClientConfig;

const USER_AGENT: &str = concat!("unisphere/", env!("CARGO_PKG_VERSION"));

/// One authenticated HTTP session against a Unisphere server.
///
/// Issues a single request and hands back the decoded body and status code,
/// or a [`TransportError`] when the network died. Business meaning of
/// status codes is the dispatcher's concern, never this layer's.
pub(crate) struct RestSession {
    base: Url,
    client: Client,
    username: String,
    password: String,
}

impl RestSession {
    /// # Errors
    ///
    /// Fails if the base URL cannot be a base (other methods rely on that
    /// invariant), the application type is not a valid header value, or the
    /// underlying client cannot be built.
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ApiError::CannotBeBase(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(application_type) = &config.application_type {
            let value = HeaderValue::from_str(application_type).map_err(|_| {
                ApiError::InvalidRequest(format!(
                    "application type {application_type:?} is not a valid header value"
                ))
            })?;
            headers.insert("application-type", value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.request_timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            base: config.base_url.clone(),
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Append a composed path to the base verbatim. `Url::join` would
    /// discard the base's `/univmax/restapi` suffix and percent-encode the
    /// sub-segments a resource name may legitimately carry.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut raw = self.base.as_str().trim_end_matches('/').to_string();
        raw.push_str(path);
        Url::parse(&raw).map_err(ApiError::from)
    }

    /// Send one request.
    ///
    /// Any exchange the server completed comes back as
    /// `(decoded_body, status_code)`; an empty or non-JSON body decodes to
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the request never produced a
    /// status code (timeout, refused connection), with the timeout case
    /// kept distinct because the array may still have accepted the
    /// operation.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&[(&str, String)]>,
        payload: Option<&Value>,
    ) -> Result<(Option<Value>, StatusCode), ApiError> {
        let url = self.endpoint(path)?;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(&self.username, Some(&self.password));
        if let Some(params) = params {
            builder = builder.query(params);
        }
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }

        let response = builder.send().map_err(TransportError::from)?;
        let status = response.status();
        let text = response.text().map_err(TransportError::from)?;

        let body = if text.is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(error) => {
                    log::debug!("No decodable body received from {url}: {error}");
                    None
                }
            }
        };

        log::debug!("{method} request to {url} returned status code {status}");
        Ok((body, status))
    }
}

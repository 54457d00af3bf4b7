use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::ApiError;
use super::models::{ApiResponse, IteratorPage, Job, PagedResult, SymmetrixList, UnisphereVersion};
use super::polling::PollBudget;
use super::transport::RestSession;
use super::types::Outcome;
use crate::config::ClientConfig;
use crate::errors::BackendFailure;
use crate::uri::{self, ResourceAddress};

/// The generic resource dispatcher.
///
/// Every call, synchronous or asynchronous, goes through one of the four
/// verbs here; the status code is classified before any caller-specific
/// logic runs. A 202 response carries a job handle the caller hands to
/// [`wait_for_job_complete`](super::wait_for_job_complete); the dispatcher
/// itself never blocks on job completion.
///
/// Calls are synchronous and blocking. A client is safe to reuse across
/// sequential calls from one thread; code that tracks several jobs at once
/// should give each thread its own client.
pub struct RestClient {
    session: RestSession,
    api_version: String,
    poll_interval: std::time::Duration,
    poll_retries: u32,
}

impl RestClient {
    /// # Errors
    ///
    /// Fails if the configured base URL cannot be a base or the HTTP
    /// session cannot be established.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let session = RestSession::new(&config)?;
        Ok(Self {
            session,
            api_version: config.api_version,
            poll_interval: config.poll_interval,
            poll_retries: config.poll_retries,
        })
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// A fresh budget from the configured poll interval and retry count.
    #[must_use]
    pub const fn poll_budget(&self) -> PollBudget {
        PollBudget::new(self.poll_interval, self.poll_retries)
    }

    /// Fetch a resource, softly.
    ///
    /// A status outside the success set is logged and swallowed here: the
    /// caller gets `Ok((None, status))` and can branch on presence, which
    /// is how existence probes are written. Only a dead network is an
    /// `Err`, so "not found" and "connection refused" stay distinguishable.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for transport failures or an unparseable
    /// composed URL.
    pub fn get_resource(
        &self,
        address: &ResourceAddress,
        params: Option<&[(&str, String)]>,
    ) -> Result<(Option<Value>, StatusCode), ApiError> {
        let path = address.path();
        let (body, status) = self.session.request(Method::GET, &path, params, None)?;
        if !Outcome::of(status).is_success() {
            log::warn!("GET {path} returned {status}, treating the resource as absent");
            return Ok((None, status));
        }
        Ok((body, status))
    }

    /// Create a resource (POST).
    ///
    /// # Errors
    ///
    /// Returns `Err` on transport failure, or [`ApiError::Failure`] when
    /// the status code falls outside {200, 201, 202, 204}; no partial
    /// object is ever returned on failure.
    pub fn create_resource(
        &self,
        address: &ResourceAddress,
        payload: &Value,
    ) -> Result<ApiResponse, ApiError> {
        self.mutate(Method::POST, address, payload)
    }

    /// Modify a resource (PUT).
    ///
    /// # Errors
    ///
    /// Same contract as [`RestClient::create_resource`].
    pub fn modify_resource(
        &self,
        address: &ResourceAddress,
        payload: &Value,
    ) -> Result<ApiResponse, ApiError> {
        self.mutate(Method::PUT, address, payload)
    }

    /// Delete a resource. No body is expected back.
    ///
    /// # Errors
    ///
    /// Same raise-on-failure contract as the other mutating verbs.
    pub fn delete_resource(
        &self,
        address: &ResourceAddress,
        payload: Option<&Value>,
        params: Option<&[(&str, String)]>,
    ) -> Result<StatusCode, ApiError> {
        let operation = format!("DELETE {} resource", address.resource_type());
        let (body, status) = self
            .session
            .request(Method::DELETE, &address.path(), params, payload)?;
        Self::check_status(&operation, status, body.as_ref())?;
        Ok(status)
    }

    fn mutate(
        &self,
        method: Method,
        address: &ResourceAddress,
        payload: &Value,
    ) -> Result<ApiResponse, ApiError> {
        let operation = format!("{method} {} resource", address.resource_type());
        let (body, status) = self
            .session
            .request(method, &address.path(), None, Some(payload))?;
        Self::check_status(&operation, status, body.as_ref())?;
        Ok(ApiResponse::new(body, status))
    }

    /// Uniform classification rule: success is exactly {200, 201, 202, 204}.
    fn check_status(
        operation: &str,
        status: StatusCode,
        body: Option<&Value>,
    ) -> Result<(), BackendFailure> {
        if Outcome::of(status).is_success() {
            return Ok(());
        }
        let msg = body.map_or_else(|| "none".to_string(), Value::to_string);
        Err(BackendFailure::new(operation, status, msg))
    }

    fn decode<T: DeserializeOwned>(
        operation: &str,
        status: StatusCode,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let body = body
            .ok_or_else(|| BackendFailure::new(operation, status, "empty response body"))?;
        serde_json::from_value(body).map_err(|error| {
            log::error!("Failed to decode {operation} response: {error}");
            ApiError::from(BackendFailure::new(
                operation,
                status,
                format!("undecodable response body: {error}"),
            ))
        })
    }

    /// Fetch the current state of a job by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::JobNotFound`] for a 404, [`ApiError::Failure`]
    /// for any other non-success status, and a transport error if the
    /// network died.
    pub fn get_job(&self, job_id: &str) -> Result<Job, ApiError> {
        let path = uri::job_path(&self.api_version, job_id);
        let (body, status) = self.session.request(Method::GET, &path, None, None)?;
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::JobNotFound(job_id.to_string()));
        }
        Self::check_status("GET job", status, body.as_ref())?;
        Self::decode("GET job", status, body)
    }

    /// Fetch the server software version from the versionless endpoint.
    ///
    /// # Errors
    ///
    /// Transport failures and non-success statuses propagate.
    pub fn get_version(&self) -> Result<UnisphereVersion, ApiError> {
        let (body, status) =
            self.session
                .request(Method::GET, &uri::version_path(), None, None)?;
        Self::check_status("GET version", status, body.as_ref())?;
        Self::decode("GET version", status, body)
    }

    /// List the arrays this server manages, optionally filtered.
    ///
    /// # Errors
    ///
    /// Transport failures and non-success statuses propagate.
    pub fn get_array_list(
        &self,
        filters: Option<&[(&str, String)]>,
    ) -> Result<Vec<String>, ApiError> {
        let path = uri::symmetrix_list_path(&self.api_version);
        let (body, status) = self.session.request(Method::GET, &path, filters, None)?;
        Self::check_status("GET symmetrix", status, body.as_ref())?;
        let list: SymmetrixList = Self::decode("GET symmetrix", status, body)?;
        Ok(list.symmetrix_id)
    }

    /// Fetch one window of results from an iterator instance.
    ///
    /// # Errors
    ///
    /// Rejects an empty or inverted window as [`ApiError::InvalidRequest`]
    /// before any network call; otherwise transport failures and
    /// non-success statuses propagate.
    pub fn get_iterator_page(
        &self,
        iterator_id: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<Value>, ApiError> {
        if start == 0 || start > end {
            return Err(ApiError::InvalidRequest(format!(
                "iterator window {start}..{end} is not a valid 1-based range"
            )));
        }
        let path = uri::iterator_page_path(iterator_id);
        let params = [("from", start.to_string()), ("to", end.to_string())];
        let (body, status) = self
            .session
            .request(Method::GET, &path, Some(&params), None)?;
        Self::check_status("GET iterator page", status, body.as_ref())?;
        let page: IteratorPage = Self::decode("GET iterator page", status, body)?;
        Ok(page.result)
    }

    /// Collect every result behind a paged response.
    ///
    /// The first page is already in hand; when `count` exceeds
    /// `maxPageSize` the remaining pages are pulled from the iterator
    /// resource in max-page-size windows.
    ///
    /// # Errors
    ///
    /// Page fetches propagate their failures; results gathered so far are
    /// dropped.
    pub fn get_iterator_results(&self, paged: PagedResult) -> Result<Vec<Value>, ApiError> {
        let count = paged.count().unwrap_or(0);
        let max_page_size = paged.max_page_size().unwrap_or(0);
        let iterator_id = paged.iterator_id().map(str::to_string);
        let mut full_response = paged.into_first_page();

        if max_page_size > 0 && count > max_page_size {
            if let Some(iterator_id) = iterator_id {
                let total_pages = (count + max_page_size - 1) / max_page_size;
                // First page came with the original response, skip to the second.
                for page in 1..total_pages {
                    let start = page * max_page_size + 1;
                    let end = ((page + 1) * max_page_size).min(count);
                    full_response.extend(self.get_iterator_page(&iterator_id, start, end)?);
                }
            }
        }
        Ok(full_response)
    }
}

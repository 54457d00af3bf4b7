use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::types::{JobStatus, Outcome};

/// One step of a job, as reported under the job's `task` list.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    execution_order: Option<i64>,
    description: Option<String>,
}

impl Task {
    pub const fn execution_order(&self) -> Option<i64> {
        self.execution_order
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Server-side record of an asynchronous operation.
///
/// Returned in the body of a 202 response and re-fetched from the
/// job-status resource while polling; the client never mutates a handle in
/// place.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    #[serde(rename = "jobId")]
    job_id: String,
    name: Option<String>,
    #[serde(default)]
    status: JobStatus,
    result: Option<String>,
    task: Option<Vec<Task>>,
}

impl Job {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn tasks(&self) -> Option<&[Task]> {
        self.task.as_deref()
    }

    pub const fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }

    pub const fn has_failed(&self) -> bool {
        self.status.has_failed()
    }
}

/// A dispatcher response whose status code passed classification.
///
/// Holds the decoded body (if the server sent one) and the exact status
/// code, so callers can branch on 202 and hand the job to the tracker.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    body: Option<Value>,
    status: StatusCode,
}

impl ApiResponse {
    pub(crate) const fn new(body: Option<Value>, status: StatusCode) -> Self {
        Self { body, status }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<Value> {
        self.body
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.status)
    }

    /// The job handle carried by a 202 "accepted, executing asynchronously"
    /// response. `None` for synchronous responses or a body without a
    /// `jobId` field.
    pub fn job(&self) -> Option<Job> {
        if self.status != StatusCode::ACCEPTED {
            return None;
        }
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_value(body.clone()).ok())
    }
}

/// Server software version, e.g. `V9.1.0.2`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnisphereVersion {
    version: String,
}

impl UnisphereVersion {
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Major version in URI form: `V9.1.0.2` becomes `91`.
    pub fn major_version(&self) -> Option<String> {
        let trimmed = self
            .version
            .strip_prefix('V')
            .or_else(|| self.version.strip_prefix('v'))
            .unwrap_or(&self.version);
        let mut parts = trimmed.split('.');
        match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) if !major.is_empty() && !minor.is_empty() => {
                Some(format!("{major}{minor}"))
            }
            _ => None,
        }
    }
}

/// First response of a paged listing; large result sets continue through
/// the iterator resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResult {
    #[serde(rename = "resultList")]
    result_list: ResultList,
    id: Option<String>,
    count: Option<u64>,
    #[serde(rename = "maxPageSize")]
    max_page_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResultList {
    #[serde(default)]
    result: Vec<Value>,
}

impl PagedResult {
    pub fn first_page(&self) -> &[Value] {
        &self.result_list.result
    }

    pub(crate) fn into_first_page(self) -> Vec<Value> {
        self.result_list.result
    }

    pub fn iterator_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub const fn count(&self) -> Option<u64> {
        self.count
    }

    pub const fn max_page_size(&self) -> Option<u64> {
        self.max_page_size
    }
}

/// Body of one iterator page fetch.
#[derive(Debug, Deserialize)]
pub(crate) struct IteratorPage {
    #[serde(default)]
    pub(crate) result: Vec<Value>,
}

/// Body of the symmetrix listing.
#[derive(Debug, Deserialize)]
pub(crate) struct SymmetrixList {
    #[serde(rename = "symmetrixId", default)]
    pub(crate) symmetrix_id: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_deserialization() {
        let job: Job = serde_json::from_value(json!({
            "jobId": "1570622921",
            "name": "Create storage group",
            "status": "RUNNING",
            "result": null,
            "task": [{ "execution_order": 1, "description": "Creating SG1" }]
        }))
        .unwrap();
        assert_eq!(job.job_id(), "1570622921");
        assert_eq!(job.status(), &JobStatus::Running);
        assert!(!job.is_completed());
        let tasks = job.tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].execution_order(), Some(1));
        assert_eq!(tasks[0].description(), Some("Creating SG1"));
    }

    #[test]
    fn test_job_with_minimal_fields() {
        let job: Job = serde_json::from_value(json!({
            "jobId": "42",
            "status": "succeeded"
        }))
        .unwrap();
        assert!(job.is_completed());
        assert!(!job.has_failed());
        assert!(job.result().is_none());
        assert!(job.tasks().is_none());
    }

    #[test]
    fn test_job_without_status_defaults_to_created() {
        let job: Job = serde_json::from_value(json!({ "jobId": "9" })).unwrap();
        assert_eq!(job.status(), &JobStatus::Created);
        assert!(!job.is_completed());
    }

    #[test]
    fn test_accepted_response_yields_job() {
        let response = ApiResponse::new(
            Some(json!({ "jobId": "7", "status": "created" })),
            StatusCode::ACCEPTED,
        );
        let job = response.job().unwrap();
        assert_eq!(job.job_id(), "7");
        assert_eq!(response.outcome(), Outcome::Success);
    }

    #[test]
    fn test_synchronous_response_has_no_job() {
        let response = ApiResponse::new(
            Some(json!({ "storageGroupId": "SG1" })),
            StatusCode::OK,
        );
        assert!(response.job().is_none());
    }

    #[test]
    fn test_major_version() {
        let version: UnisphereVersion =
            serde_json::from_value(json!({ "version": "V9.1.0.2" })).unwrap();
        assert_eq!(version.version(), "V9.1.0.2");
        assert_eq!(version.major_version().as_deref(), Some("91"));
    }

    #[test]
    fn test_major_version_malformed() {
        let version: UnisphereVersion =
            serde_json::from_value(json!({ "version": "unknown" })).unwrap();
        assert!(version.major_version().is_none());
    }

    #[test]
    fn test_paged_result_deserialization() {
        let paged: PagedResult = serde_json::from_value(json!({
            "id": "f8a1d2b3-1",
            "count": 2500,
            "maxPageSize": 1000,
            "resultList": { "result": [{ "volumeId": "00001" }], "from": 1, "to": 1000 }
        }))
        .unwrap();
        assert_eq!(paged.iterator_id(), Some("f8a1d2b3-1"));
        assert_eq!(paged.count(), Some(2500));
        assert_eq!(paged.max_page_size(), Some(1000));
        assert_eq!(paged.first_page().len(), 1);
    }
}

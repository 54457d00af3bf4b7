// Re-export the API module components
pub use self::{
    client::RestClient,
    errors::{ApiError, TransportError},
    models::{ApiResponse, Job, PagedResult, Task, UnisphereVersion},
    polling::{
        cancel_pair, wait_for_job, wait_for_job_complete, wait_for_job_complete_cancellable,
        CancelHandle, CancelToken, JobOutcome, PollBudget,
    },
    types::{JobStatus, Outcome},
};

// Module declarations
mod client;
mod errors;
mod models;
mod polling;
mod transport;
mod types;

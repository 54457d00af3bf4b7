use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use reqwest::StatusCode;

use super::client::RestClient;
use super::errors::ApiError;
use super::models::{ApiResponse, Job, Task};
use super::types::JobStatus;

/// How long one wait call may keep polling.
///
/// One attempt is spent per poll; `interval * max_attempts` is the hard
/// wall-clock ceiling. A budget belongs to a single wait call and is never
/// renewed, each fresh wait takes a fresh budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollBudget {
    interval: Duration,
    max_attempts: u32,
    attempts_used: u32,
}

impl PollBudget {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            attempts_used: 0,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Consume one attempt, yielding the budget for the next iteration.
    /// `None` once exhausted.
    #[must_use]
    pub const fn spend(self) -> Option<Self> {
        if self.attempts_used >= self.max_attempts {
            None
        } else {
            Some(Self {
                interval: self.interval,
                max_attempts: self.max_attempts,
                attempts_used: self.attempts_used + 1,
            })
        }
    }
}

/// Terminal report of one wait call.
///
/// An array-reported failure and an exhausted budget both come back with
/// `succeeded() == false`; the two are deliberately indistinguishable
/// here, callers that must escalate use [`wait_for_job`].
#[derive(Debug, Clone)]
pub struct JobOutcome {
    succeeded: bool,
    status: JobStatus,
    result: Option<String>,
    tasks: Option<Vec<Task>>,
}

impl JobOutcome {
    fn from_job(job: &Job, succeeded: bool) -> Self {
        Self {
            succeeded,
            status: job.status().clone(),
            result: job.result().map(str::to_string),
            tasks: job.tasks().map(<[Task]>::to_vec),
        }
    }

    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// The last status observed before the wait ended.
    pub const fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    pub fn into_tasks(self) -> Option<Vec<Task>> {
        self.tasks
    }
}

/// Sending half of a cancellation pair. Clone it into whatever thread
/// decides to abort the wait.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// Abort the wait holding the paired token. Signalling a wait that
    /// already finished is harmless.
    pub fn cancel(&self) {
        // Err means the token is gone, nothing left to cancel.
        let _ = self.tx.send(());
    }
}

/// Receiving half of a cancellation pair; passed to the cancellable wait.
#[derive(Debug)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    /// Sleep for `interval`, waking early only on cancellation.
    fn cancelled_within(&self, interval: Duration) -> bool {
        match self.rx.recv_timeout(interval) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                // Every handle is gone; cancellation can no longer happen.
                thread::sleep(interval);
                false
            }
        }
    }
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = mpsc::channel();
    (CancelHandle { tx }, CancelToken { rx })
}

/// Wait for a job to reach a terminal state.
///
/// A handle that already reads `succeeded` returns immediately, without a
/// single network call. Otherwise the job is re-fetched on the budget's
/// fixed interval until a terminal status is observed or the budget runs
/// out; either way the outcome is reported, not raised, and carries the
/// last known status, result, and task details.
///
/// # Errors
///
/// Dispatcher and transport errors while re-fetching the job propagate;
/// they are infrastructure problems, not job outcomes.
pub fn wait_for_job_complete(
    client: &RestClient,
    job: &Job,
    budget: PollBudget,
) -> Result<JobOutcome, ApiError> {
    wait_loop(client, job, budget, None)
}

/// [`wait_for_job_complete`] with sleeps that wake on cancellation, so an
/// embedding application can abort without waiting out the full budget.
///
/// # Errors
///
/// Returns [`ApiError::Cancelled`] when the paired [`CancelHandle`] fires
/// mid-wait; otherwise as [`wait_for_job_complete`].
pub fn wait_for_job_complete_cancellable(
    client: &RestClient,
    job: &Job,
    budget: PollBudget,
    cancel: &CancelToken,
) -> Result<JobOutcome, ApiError> {
    wait_loop(client, job, budget, Some(cancel))
}

fn wait_loop(
    client: &RestClient,
    job: &Job,
    budget: PollBudget,
    cancel: Option<&CancelToken>,
) -> Result<JobOutcome, ApiError> {
    if job.status().is_succeeded() {
        return Ok(JobOutcome::from_job(job, true));
    }

    let job_id = job.job_id().to_string();
    let mut last = JobOutcome::from_job(job, false);
    let mut budget = budget;

    loop {
        budget = match budget.spend() {
            Some(spent) => spent,
            None => {
                log::error!(
                    "Job {job_id} still {} after {} polls, giving up",
                    last.status(),
                    budget.attempts_used()
                );
                return Ok(last);
            }
        };

        match cancel {
            Some(token) => {
                if token.cancelled_within(budget.interval()) {
                    return Err(ApiError::Cancelled(job_id));
                }
            }
            None => thread::sleep(budget.interval()),
        }

        let current = client.get_job(&job_id)?;
        if current.status().is_terminal() {
            let succeeded = current.status().is_succeeded();
            log::debug!(
                "Job {job_id} finished with status {} after {} polls",
                current.status(),
                budget.attempts_used()
            );
            return Ok(JobOutcome::from_job(&current, succeeded));
        }
        last = JobOutcome::from_job(&current, false);
    }
}

/// Check whether a dispatcher call went asynchronous and, if so, wait it
/// out.
///
/// A no-op unless the response status is 202. A job that does not succeed,
/// whether the array reported failure or the budget ran out, escalates to
/// [`ApiError::JobFailed`] carrying the operation name; callers that want
/// to branch on the outcome instead use [`wait_for_job_complete`]
/// directly.
///
/// # Errors
///
/// [`ApiError::JobFailed`] for a non-succeeded outcome, plus everything
/// [`wait_for_job_complete`] can return.
pub fn wait_for_job(
    client: &RestClient,
    operation: &str,
    response: &ApiResponse,
    budget: PollBudget,
) -> Result<Option<Vec<Task>>, ApiError> {
    if response.status() != StatusCode::ACCEPTED {
        return Ok(None);
    }
    let job = match response.job() {
        Some(job) => job,
        None => {
            return Err(ApiError::InvalidRequest(
                "202 response did not carry a job handle".to_string(),
            ))
        }
    };

    let outcome = wait_for_job_complete(client, &job, budget)?;
    if outcome.succeeded() {
        Ok(outcome.into_tasks())
    } else {
        Err(ApiError::JobFailed {
            operation: operation.to_string(),
            status: outcome.status().to_string(),
            result: outcome.result().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_budget_spend_counts_attempts() {
        let budget = PollBudget::new(Duration::ZERO, 2);
        let budget = budget.spend().unwrap();
        assert_eq!(budget.attempts_used(), 1);
        let budget = budget.spend().unwrap();
        assert_eq!(budget.attempts_used(), 2);
        assert!(budget.spend().is_none());
    }

    #[test]
    fn test_zero_attempt_budget_is_spent_immediately() {
        let budget = PollBudget::new(Duration::from_secs(5), 0);
        assert!(budget.spend().is_none());
    }

    #[test]
    fn test_cancel_wakes_token_early() {
        let (handle, token) = cancel_pair();
        handle.cancel();
        let started = Instant::now();
        assert!(token.cancelled_within(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_uncancelled_token_times_out() {
        let (_handle, token) = cancel_pair();
        assert!(!token.cancelled_within(Duration::from_millis(10)));
    }

    #[test]
    fn test_dropped_handle_never_cancels() {
        let (handle, token) = cancel_pair();
        drop(handle);
        assert!(!token.cancelled_within(Duration::from_millis(10)));
    }
}

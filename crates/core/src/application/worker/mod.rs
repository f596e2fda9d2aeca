// Worker - Job abstraction and the bounded worker pool

pub mod constants;
mod context;
mod panic;
mod pool;

pub use context::{cancellation_channel, CancelHandle, ExecutionContext};
pub use panic::panic_message;
pub use pool::WorkerPool;

use crate::port::RemoteError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Per-job failure, recorded in that job's result only
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("failed to create file: {0}")]
    Remote(#[from] RemoteError),

    #[error("job cancelled before completion")]
    Cancelled,

    #[error("job panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Failed(String),
}

/// A unit of work executed by the worker pool
///
/// Implementations must not share mutable state with other jobs; they may be
/// executed from any worker task.
#[async_trait]
pub trait Job: Send + Sync {
    /// Short label used in logs and reports
    fn label(&self) -> &str;

    /// Execute the unit of work
    ///
    /// The context is advisory: long network calls should race it and
    /// return JobError::Cancelled when it fires first.
    async fn process(&self, ctx: &ExecutionContext) -> Result<(), JobError>;
}

/// Outcome of one job, paired with the job that produced it
#[derive(Clone)]
pub struct JobResult {
    job: Arc<dyn Job>,
    outcome: Result<(), JobError>,
}

impl JobResult {
    pub fn new(job: Arc<dyn Job>, outcome: Result<(), JobError>) -> Self {
        Self { job, outcome }
    }

    pub fn job(&self) -> &Arc<dyn Job> {
        &self.job
    }

    pub fn error(&self) -> Option<&JobError> {
        self.outcome.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Debug for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobResult")
            .field("job", &self.job.label())
            .field("outcome", &self.outcome)
            .finish()
    }
}

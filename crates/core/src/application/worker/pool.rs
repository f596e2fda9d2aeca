// Worker Pool - fixed-size fan-out/fan-in over a batch of jobs

use super::panic::panic_message;
use super::{ExecutionContext, Job, JobError, JobResult};
use crate::error::{AppError, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

type JobQueue = Arc<Mutex<mpsc::Receiver<Arc<dyn Job>>>>;

/// Bounded worker pool
///
/// Every call to [`WorkerPool::work`] spawns exactly `concurrency` worker
/// tasks, one feeder and one completion task, and returns once every job has
/// produced a result. The intake queue and result channel are allocated per
/// call, so the pool can be reused for any number of batches.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    concurrency: usize,
}

impl WorkerPool {
    /// Create a pool running `concurrency` workers per batch
    ///
    /// # Errors
    /// - AppError::Validation if `concurrency` is 0
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(AppError::Validation(
                "worker pool concurrency must be at least 1".to_string(),
            ));
        }
        Ok(Self { concurrency })
    }

    /// Run a batch of jobs to completion and return one result per job
    ///
    /// Results are unordered. A failing or panicking job only affects its own
    /// result. Cancelling `ctx` does not abort in-flight jobs; the call still
    /// waits for every worker to finish.
    pub async fn work(&self, ctx: &ExecutionContext, jobs: Vec<Arc<dyn Job>>) -> Vec<JobResult> {
        let total = jobs.len();
        info!(
            jobs = total,
            concurrency = self.concurrency,
            "Worker pool batch started"
        );

        // Sized to the batch so result delivery never blocks
        let (results_tx, mut results_rx) = mpsc::channel::<JobResult>(total.max(1));
        let (jobs_tx, jobs_rx) = mpsc::channel::<Arc<dyn Job>>(self.concurrency);
        let queue: JobQueue = Arc::new(Mutex::new(jobs_rx));

        let workers: Vec<_> = (0..self.concurrency)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&queue),
                    results_tx.clone(),
                    ctx.clone(),
                ))
            })
            .collect();

        tokio::spawn(feed_jobs(jobs, jobs_tx, results_tx.clone()));

        // Completion: once all workers are joined, release the last sender
        tokio::spawn(async move {
            for (worker_id, joined) in join_all(workers).await.into_iter().enumerate() {
                if let Err(e) = joined {
                    error!(worker_id, error = %e, "Worker task terminated abnormally");
                }
            }
            drop(results_tx);
        });

        let mut results = Vec::with_capacity(total);
        while let Some(result) = results_rx.recv().await {
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(
            jobs = total,
            succeeded = results.len() - failed,
            failed,
            "Worker pool batch finished"
        );
        results
    }
}

/// Submit jobs in input order, then close the intake queue on drop
///
/// A job that can no longer be queued still gets a result.
async fn feed_jobs(
    jobs: Vec<Arc<dyn Job>>,
    jobs_tx: mpsc::Sender<Arc<dyn Job>>,
    results: mpsc::Sender<JobResult>,
) {
    for job in jobs {
        if let Err(mpsc::error::SendError(job)) = jobs_tx.send(job).await {
            warn!(job = job.label(), "Intake queue closed, no worker available");
            let outcome = Err(JobError::Failed("no worker available".to_string()));
            if results.send(JobResult::new(job, outcome)).await.is_err() {
                debug!("Result channel closed, feeder stopping");
                return;
            }
        }
    }
}

async fn run_worker(
    worker_id: usize,
    queue: JobQueue,
    results: mpsc::Sender<JobResult>,
    ctx: ExecutionContext,
) {
    loop {
        let next = queue.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };

        debug!(worker_id, job = job.label(), "Processing job");
        let outcome = execute_isolated(&job, &ctx).await;

        if results.send(JobResult::new(job, outcome)).await.is_err() {
            // Caller stopped draining; nobody is left to read results
            break;
        }
    }
    debug!(worker_id, "Worker stopped");
}

/// Run the job in its own task so a panic becomes a result
async fn execute_isolated(
    job: &Arc<dyn Job>,
    ctx: &ExecutionContext,
) -> std::result::Result<(), JobError> {
    let job = Arc::clone(job);
    let ctx = ctx.clone();

    match tokio::spawn(async move { job.process(&ctx).await }).await {
        Ok(outcome) => outcome,
        Err(join_err) if join_err.is_panic() => {
            let message = panic_message(join_err.into_panic());
            error!(panic_msg = %message, "Job panicked");
            Err(JobError::Panicked(message))
        }
        Err(join_err) => Err(JobError::Failed(format!("job task aborted: {}", join_err))),
    }
}

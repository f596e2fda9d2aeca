// Application Layer - Use Cases and the Worker Pool

pub mod distribution;
pub mod worker;

// Re-exports
pub use distribution::{DistributionManager, DistributionReport, FileCommitter};
pub use worker::{cancellation_channel, ExecutionContext, Job, JobError, JobResult, WorkerPool};

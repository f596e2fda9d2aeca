// Distribution Manager - commit the workflow file to every repository

mod committer;
pub mod listing;
mod report;

pub use committer::{CommitFileJob, FileCommitter, COMMIT_MESSAGE};
pub use listing::{list_repositories, REPOSITORIES_PER_PAGE};
pub use report::{DistributionReport, FailedRepository};

use crate::application::worker::{ExecutionContext, Job, WorkerPool};
use crate::domain::{Repository, Visibility, WorkflowFile};
use crate::error::{AppError, Result};
use crate::port::{RepositoriesService, TimeProvider};
use std::sync::Arc;
use tracing::{debug, info};

/// Distribution Manager
///
/// Lists the organisation's repositories, builds one commit job per repository
/// and runs the batch on the worker pool.
pub struct DistributionManager {
    organisation: String,
    workflow_file: Arc<WorkflowFile>,
    worker_pool: WorkerPool,
    repositories: Arc<dyn RepositoriesService>,
    committer: Arc<FileCommitter>,
    time_provider: Arc<dyn TimeProvider>,
}

impl DistributionManager {
    pub fn new(
        organisation: impl Into<String>,
        dry_run: bool,
        workflow_file: WorkflowFile,
        worker_pool: WorkerPool,
        repositories: Arc<dyn RepositoriesService>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        let organisation = organisation.into();
        let committer = Arc::new(FileCommitter::new(
            organisation.clone(),
            dry_run,
            Arc::clone(&repositories),
        ));

        Self {
            organisation,
            workflow_file: Arc::new(workflow_file),
            worker_pool,
            repositories,
            committer,
            time_provider,
        }
    }

    /// List every repository of the organisation, following pagination
    ///
    /// # Errors
    /// - AppError::Listing if any page fails
    pub async fn list_repositories(&self, visibility: Visibility) -> Result<Vec<Repository>> {
        list_repositories(self.repositories.as_ref(), &self.organisation, visibility)
            .await
            .map_err(AppError::Listing)
    }

    /// One commit job per repository, sharing the rendered workflow file
    pub fn build_jobs(&self, repositories: &[Repository]) -> Vec<Arc<dyn Job>> {
        repositories
            .iter()
            .map(|repository| {
                Arc::new(CommitFileJob::new(
                    Arc::clone(&self.committer),
                    repository.name.clone(),
                    Arc::clone(&self.workflow_file),
                )) as Arc<dyn Job>
            })
            .collect()
    }

    /// Distribute the workflow file to every matching repository
    ///
    /// Only a listing failure is returned as an error; per-repository failures
    /// are recorded in the report.
    pub async fn distribute(
        &self,
        ctx: &ExecutionContext,
        visibility: Visibility,
    ) -> Result<DistributionReport> {
        let started_at = self.time_provider.now();

        let repositories = self.list_repositories(visibility).await?;
        info!(
            organisation = %self.organisation,
            visibility = %visibility,
            repositories = repositories.len(),
            dry_run = self.committer.is_dry_run(),
            "Distributing workflow file"
        );
        for (i, repository) in repositories.iter().enumerate() {
            debug!(count = i + 1, repository = repository.display_name(), "Target repository");
        }

        let jobs = self.build_jobs(&repositories);
        let results = self.worker_pool.work(ctx, jobs).await;

        let report = DistributionReport::from_results(
            self.organisation.clone(),
            self.workflow_file.path(),
            self.committer.is_dry_run(),
            &results,
            started_at,
            self.time_provider.now(),
        );

        info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "Distribution finished"
        );
        Ok(report)
    }
}

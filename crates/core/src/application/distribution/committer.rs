// File Committer and the per-repository commit job

use crate::application::worker::{ExecutionContext, Job, JobError};
use crate::domain::WorkflowFile;
use crate::port::RepositoriesService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Commit message attached to every distributed workflow file
pub const COMMIT_MESSAGE: &str = "GitHub Actions workflow for Mobydick";

/// Creates the workflow file in one repository, or pretends to in dry-run mode
pub struct FileCommitter {
    organisation: String,
    dry_run: bool,
    repositories: Arc<dyn RepositoriesService>,
}

impl FileCommitter {
    pub fn new(
        organisation: impl Into<String>,
        dry_run: bool,
        repositories: Arc<dyn RepositoriesService>,
    ) -> Self {
        Self {
            organisation: organisation.into(),
            dry_run,
            repositories,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Create `path` with `content` on the default branch of `repository`
    ///
    /// Dry-run mode reports success without contacting the platform. The remote
    /// call races the context; if cancellation wins the job reports Cancelled.
    pub async fn create_file(
        &self,
        ctx: &ExecutionContext,
        repository: &str,
        path: &str,
        content: &[u8],
    ) -> Result<(), JobError> {
        if self.dry_run {
            info!(repository, path, "create_file.dry_run");
            return Ok(());
        }

        if ctx.is_cancelled() {
            warn!(repository, "create_file.cancelled");
            return Err(JobError::Cancelled);
        }

        let call = self.repositories.create_file(
            &self.organisation,
            repository,
            path,
            COMMIT_MESSAGE,
            content,
        );

        let outcome = tokio::select! {
            result = call => result.map_err(JobError::from),
            _ = ctx.cancelled() => Err(JobError::Cancelled),
        };

        match &outcome {
            Ok(()) => info!(repository, path, "create_file.success"),
            Err(e) => warn!(repository, path, error = %e, "create_file.failure"),
        }
        outcome
    }
}

/// Job committing the workflow file to a single repository
pub struct CommitFileJob {
    committer: Arc<FileCommitter>,
    repository: String,
    workflow_file: Arc<WorkflowFile>,
}

impl CommitFileJob {
    pub fn new(
        committer: Arc<FileCommitter>,
        repository: impl Into<String>,
        workflow_file: Arc<WorkflowFile>,
    ) -> Self {
        Self {
            committer,
            repository: repository.into(),
            workflow_file,
        }
    }
}

#[async_trait]
impl Job for CommitFileJob {
    fn label(&self) -> &str {
        &self.repository
    }

    async fn process(&self, ctx: &ExecutionContext) -> Result<(), JobError> {
        self.committer
            .create_file(
                ctx,
                &self.repository,
                self.workflow_file.path(),
                self.workflow_file.content(),
            )
            .await
    }
}

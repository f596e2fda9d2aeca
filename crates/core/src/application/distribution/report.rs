// Distribution report - per-repository outcome of one run

use crate::application::worker::JobResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A repository the workflow could not be committed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRepository {
    pub repository: String,
    pub error: String,
}

/// Outcome of a distribution run
///
/// In dry-run mode `succeeded` lists the repositories that would receive the file.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub organisation: String,
    pub path: String,
    pub dry_run: bool,
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedRepository>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DistributionReport {
    /// Partition job results by the presence of an error
    ///
    /// Repository names are sorted so the report is stable across runs.
    pub fn from_results(
        organisation: impl Into<String>,
        path: impl Into<String>,
        dry_run: bool,
        results: &[JobResult],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for result in results {
            let repository = result.job().label().to_string();
            match result.error() {
                None => succeeded.push(repository),
                Some(e) => failed.push(FailedRepository {
                    repository,
                    error: e.to_string(),
                }),
            }
        }
        succeeded.sort();
        failed.sort_by(|a, b| a.repository.cmp(&b.repository));

        Self {
            organisation: organisation.into(),
            path: path.into(),
            dry_run,
            succeeded,
            failed,
            started_at,
            finished_at,
        }
    }

    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.success_count() + self.failure_count()
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

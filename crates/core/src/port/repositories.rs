// Repositories Service Port
// Abstraction over the remote platform's repository listing and content APIs

use crate::domain::{Repository, Visibility};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error returned by the remote platform, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct RemoteError {
    /// The HTTP status code, if available
    pub status_code: Option<u16>,

    /// A human-readable description of the error
    pub message: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl RemoteError {
    pub fn new(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Error without an HTTP status (transport failures, decoding errors)
    pub fn without_status(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}

/// Options for one page of the "list repositories by organisation" call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub visibility: Visibility,
    /// 1-based page number
    pub page: u32,
    pub per_page: u8,
}

/// One page of repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryPage {
    pub repositories: Vec<Repository>,
    /// Next page number, 0 when this is the last page
    pub next_page: u32,
}

impl RepositoryPage {
    pub fn new(repositories: Vec<Repository>, next_page: u32) -> Self {
        Self {
            repositories,
            next_page,
        }
    }
}

/// Repositories Service trait
///
/// Implementations:
/// - OctocrabRepositories: GitHub REST API (infra-github)
/// - mocks::FakeRepositoriesService: scripted in-memory fake
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoriesService: Send + Sync {
    /// Fetch a single page of the organisation's repositories
    ///
    /// # Errors
    /// - RemoteError if the page cannot be fetched
    async fn list_by_org(
        &self,
        organisation: &str,
        options: &ListOptions,
    ) -> Result<RepositoryPage, RemoteError>;

    /// Create a file on the repository's default branch in a single commit
    ///
    /// # Errors
    /// - RemoteError as reported by the platform (e.g. 422 when the file exists)
    async fn create_file(
        &self,
        organisation: &str,
        repository: &str,
        path: &str,
        message: &str,
        content: &[u8],
    ) -> Result<(), RemoteError>;
}

// ============================================================================
// Fake Implementation for Testing
// ============================================================================

#[cfg(any(test, feature = "testing"))]
pub mod mocks {
    use super::*;
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// A file the fake recorded as committed
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CommittedFile {
        pub organisation: String,
        pub repository: String,
        pub path: String,
        pub message: String,
        pub content: Vec<u8>,
    }

    /// Scripted RepositoriesService
    ///
    /// Listing returns the queued pages in order (an empty last page once the
    /// queue runs out). Commits succeed unless the repository was marked failing.
    #[derive(Default)]
    pub struct FakeRepositoriesService {
        pages: Mutex<VecDeque<Result<RepositoryPage, RemoteError>>>,
        failing: Mutex<HashSet<String>>,
        commit_delay: Option<Duration>,
        committed: Mutex<Vec<CommittedFile>>,
        list_calls: AtomicUsize,
        create_calls: AtomicUsize,
    }

    impl FakeRepositoriesService {
        pub fn new() -> Self {
            Self::default()
        }

        /// Single page holding the given repository names
        pub fn with_repositories<I, S>(names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let fake = Self::new();
            fake.push_page(fake_repositories(names), 0);
            fake
        }

        /// Delay every create_file call (for timing tests)
        pub fn with_commit_delay(mut self, delay: Duration) -> Self {
            self.commit_delay = Some(delay);
            self
        }

        pub fn push_page(&self, repositories: Vec<Repository>, next_page: u32) {
            self.pages
                .lock()
                .unwrap()
                .push_back(Ok(RepositoryPage::new(repositories, next_page)));
        }

        pub fn push_error(&self, error: RemoteError) {
            self.pages.lock().unwrap().push_back(Err(error));
        }

        /// Make create_file fail for this repository
        pub fn fail_commits_for(&self, repository: impl Into<String>) {
            self.failing.lock().unwrap().insert(repository.into());
        }

        pub fn list_call_count(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn create_call_count(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        pub fn committed(&self) -> Vec<CommittedFile> {
            self.committed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RepositoriesService for FakeRepositoriesService {
        async fn list_by_org(
            &self,
            _organisation: &str,
            _options: &ListOptions,
        ) -> Result<RepositoryPage, RemoteError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(RepositoryPage::default()))
        }

        async fn create_file(
            &self,
            organisation: &str,
            repository: &str,
            path: &str,
            message: &str,
            content: &[u8],
        ) -> Result<(), RemoteError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.commit_delay {
                tokio::time::sleep(delay).await;
            }

            if self.failing.lock().unwrap().contains(repository) {
                return Err(RemoteError::new(
                    Some(422),
                    format!("Invalid request: \"sha\" wasn't supplied for {}", repository),
                ));
            }

            self.committed.lock().unwrap().push(CommittedFile {
                organisation: organisation.to_string(),
                repository: repository.to_string(),
                path: path.to_string(),
                message: message.to_string(),
                content: content.to_vec(),
            });
            Ok(())
        }
    }

    /// Build repositories from short names
    pub fn fake_repositories<I, S>(names: I) -> Vec<Repository>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Repository::new).collect()
    }
}

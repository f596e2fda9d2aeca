// Octocrab-backed RepositoriesService

use async_trait::async_trait;
use octocrab::params::repos::Type as RepoType;
use octocrab::Octocrab;
use tracing::debug;

use mobydick_core::domain::{Repository, Visibility};
use mobydick_core::port::{ListOptions, RemoteError, RepositoriesService, RepositoryPage};

use crate::error::remote_error;

/// Build an octocrab client authenticated with a personal access token
///
/// `api_url` overrides the REST endpoint (GitHub Enterprise Server).
pub fn build_client(token: &str, api_url: Option<&str>) -> Result<Octocrab, RemoteError> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());
    if let Some(url) = api_url {
        builder = builder.base_uri(url).map_err(remote_error)?;
    }
    builder.build().map_err(remote_error)
}

/// GitHub repositories service
#[derive(Clone)]
pub struct OctocrabRepositories {
    client: Octocrab,
}

impl OctocrabRepositories {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Create the service from a token
    pub fn from_token(token: &str, api_url: Option<&str>) -> Result<Self, RemoteError> {
        Ok(Self::new(build_client(token, api_url)?))
    }
}

impl std::fmt::Debug for OctocrabRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabRepositories").finish_non_exhaustive()
    }
}

#[async_trait]
impl RepositoriesService for OctocrabRepositories {
    async fn list_by_org(
        &self,
        organisation: &str,
        options: &ListOptions,
    ) -> Result<RepositoryPage, RemoteError> {
        let page = self
            .client
            .orgs(organisation)
            .list_repos()
            .repo_type(repo_type(options.visibility))
            .per_page(options.per_page)
            .page(options.page)
            .send()
            .await
            .map_err(remote_error)?;

        let has_next = page.next.is_some();
        debug!(
            organisation,
            page = options.page,
            count = page.items.len(),
            has_next,
            "Listed repositories"
        );

        Ok(RepositoryPage::new(
            page.items.into_iter().map(to_repository).collect(),
            next_page(options.page, has_next),
        ))
    }

    async fn create_file(
        &self,
        organisation: &str,
        repository: &str,
        path: &str,
        message: &str,
        content: &[u8],
    ) -> Result<(), RemoteError> {
        self.client
            .repos(organisation, repository)
            .create_file(path, message, content)
            .send()
            .await
            .map_err(remote_error)?;
        Ok(())
    }
}

fn repo_type(visibility: Visibility) -> RepoType {
    match visibility {
        Visibility::All => RepoType::All,
        Visibility::Private => RepoType::Private,
    }
}

/// Follow the `Link: rel="next"` header; 0 marks the last page
fn next_page(page: u32, has_next: bool) -> u32 {
    if has_next {
        page + 1
    } else {
        0
    }
}

fn to_repository(repository: octocrab::models::Repository) -> Repository {
    let mut converted = Repository::new(repository.name);
    converted.full_name = repository.full_name;
    converted
}

// Repository listing - follows the platform's page/next-page convention

use crate::domain::{Repository, Visibility};
use crate::port::{ListOptions, RemoteError, RepositoriesService};
use tracing::debug;

/// Repositories requested per page (GitHub's maximum)
pub const REPOSITORIES_PER_PAGE: u8 = 100;

/// List every repository of the organisation matching `visibility`
///
/// Pages are fetched until the service reports no next page. The first page
/// error is returned immediately and anything accumulated so far is discarded.
pub async fn list_repositories(
    service: &dyn RepositoriesService,
    organisation: &str,
    visibility: Visibility,
) -> Result<Vec<Repository>, RemoteError> {
    let mut options = ListOptions {
        visibility,
        page: 1,
        per_page: REPOSITORIES_PER_PAGE,
    };

    let mut all_repositories = Vec::new();
    loop {
        let page = service.list_by_org(organisation, &options).await?;
        debug!(
            organisation,
            page = options.page,
            count = page.repositories.len(),
            next_page = page.next_page,
            "Fetched repositories page"
        );

        all_repositories.extend(page.repositories);
        if page.next_page == 0 {
            break;
        }
        options.page = page.next_page;
    }

    Ok(all_repositories)
}

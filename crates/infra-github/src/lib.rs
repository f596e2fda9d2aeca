// Mobydick Infrastructure - GitHub Adapter
// Implements: RepositoriesService (list repositories by organisation, create file)

mod client;
mod error;

pub use client::{build_client, OctocrabRepositories};
pub use error::remote_error;

// Note: octocrab::Error cannot convert into RemoteError via From here
// (orphan rules), so the adapter maps errors through remote_error()

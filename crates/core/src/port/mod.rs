// Port Layer - Interfaces for external dependencies

pub mod repositories;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use repositories::{ListOptions, RemoteError, RepositoriesService, RepositoryPage};
pub use time_provider::TimeProvider;

// Domain Layer - Pure entities and value objects

pub mod error;
pub mod repository;
pub mod workflow;

// Re-exports
pub use error::DomainError;
pub use repository::{Repository, Visibility};
pub use workflow::{WorkflowFile, WORKFLOW_DIRECTORY};

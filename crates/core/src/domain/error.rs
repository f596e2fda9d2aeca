// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid workflow file name: {0:?}")]
    InvalidWorkflowFileName(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

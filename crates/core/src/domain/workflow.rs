// Workflow File Domain Model

use crate::domain::error::{DomainError, Result};
use std::path::Path;

/// Directory inside every target repository that holds workflow definitions
pub const WORKFLOW_DIRECTORY: &str = ".github/workflows";

/// Rendered workflow file, produced once per run and read by every job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowFile {
    path: String,
    content: Vec<u8>,
}

impl WorkflowFile {
    /// Create a workflow file destined for `.github/workflows/<basename of source>`
    ///
    /// # Errors
    /// - DomainError::InvalidWorkflowFileName if `source` has no file name component
    pub fn new(source: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Result<Self> {
        let source = source.as_ref();
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidWorkflowFileName(source.display().to_string())
            })?;

        Ok(Self {
            path: format!("{}/{}", WORKFLOW_DIRECTORY, file_name),
            content: content.into(),
        })
    }

    /// Destination path inside each repository
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rendered bytes
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

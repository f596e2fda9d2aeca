// Mobydick Validate - checks that every Dockerfile pins its base images
//
// Scans a directory tree for files named `Dockerfile`, parses their `FROM`
// instructions and reports images without a version.

mod dockerfile;
mod error;
mod report;
mod scan;

pub use dockerfile::{Dockerfile, ImageReference};
pub use error::{Result, ValidateError};
pub use report::{DockerfileReport, ValidationReport, ValidationStatus};
pub use scan::{find_dockerfiles, DOCKERFILE_NAME};

use std::path::Path;
use tracing::info;

/// Validate every Dockerfile under `root`
///
/// # Errors
/// - ValidateError::Walk if the tree cannot be traversed
/// - ValidateError::Read if a Dockerfile cannot be read
pub fn validate_tree(root: impl AsRef<Path>) -> Result<ValidationReport> {
    let root = root.as_ref();
    let paths = find_dockerfiles(root)?;

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let dockerfile = Dockerfile::read(&path)?;
        files.push(DockerfileReport::from_dockerfile(&dockerfile));
    }

    let report = ValidationReport::new(files);
    info!(
        root = %root.display(),
        dockerfiles = report.files.len(),
        status = %report.status(),
        "Dockerfile validation finished"
    );
    Ok(report)
}

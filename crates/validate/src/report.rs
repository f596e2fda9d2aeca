// Validation report

use crate::dockerfile::Dockerfile;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Overall outcome of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// No Dockerfile found
    Skip,
    Pass,
    Fail,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationStatus::Skip => "skip",
            ValidationStatus::Pass => "pass",
            ValidationStatus::Fail => "fail",
        })
    }
}

/// Outcome for one Dockerfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerfileReport {
    pub path: PathBuf,
    pub images: usize,
    pub unversioned: Vec<String>,
}

impl DockerfileReport {
    pub fn from_dockerfile(dockerfile: &Dockerfile) -> Self {
        let images = dockerfile.images();
        let unversioned = images
            .iter()
            .filter(|image| !image.is_versioned())
            .map(|image| image.to_string())
            .collect();

        Self {
            path: dockerfile.path.clone(),
            images: images.len(),
            unversioned,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.unversioned.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub files: Vec<DockerfileReport>,
}

impl ValidationReport {
    pub fn new(files: Vec<DockerfileReport>) -> Self {
        Self { files }
    }

    pub fn status(&self) -> ValidationStatus {
        if self.files.is_empty() {
            ValidationStatus::Skip
        } else if self.files.iter().all(DockerfileReport::is_valid) {
            ValidationStatus::Pass
        } else {
            ValidationStatus::Fail
        }
    }

    /// Dockerfiles with at least one unversioned image
    pub fn failing(&self) -> impl Iterator<Item = &DockerfileReport> {
        self.files.iter().filter(|file| !file.is_valid())
    }
}

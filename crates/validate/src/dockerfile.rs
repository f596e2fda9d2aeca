// Dockerfile parsing: base images referenced by FROM instructions

use crate::error::{Result, ValidateError};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// FROM [--platform=<p>] <image> [AS <stage>]
static FROM_INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*FROM\s+(?:--\S+\s+)*(\S+)(?:\s+AS\s+(\S+))?")
        .expect("FROM instruction pattern is valid")
});

/// Image with nothing to pin
const SCRATCH: &str = "scratch";

/// A base image as written after `FROM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry and repository, without tag or digest
    pub name: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    /// Split `registry:port/name:tag@digest` into its parts
    ///
    /// A colon only starts a tag after the last `/`, so registry ports are
    /// kept in the name.
    pub fn parse(reference: &str) -> Self {
        let (rest, digest) = match reference.split_once('@') {
            Some((rest, digest)) => (rest, Some(digest.to_string())),
            None => (reference, None),
        };

        let name_start = rest.rfind('/').map_or(0, |i| i + 1);
        let (name, tag) = match rest[name_start..].rfind(':') {
            Some(i) => {
                let split = name_start + i;
                (&rest[..split], Some(rest[split + 1..].to_string()))
            }
            None => (rest, None),
        };

        Self {
            name: name.to_string(),
            tag: tag.filter(|t| !t.is_empty()),
            digest,
        }
    }

    /// Pinned by digest or by a tag other than `latest`
    pub fn is_versioned(&self) -> bool {
        if self.digest.is_some() || self.name.eq_ignore_ascii_case(SCRATCH) {
            return true;
        }
        self.tag
            .as_deref()
            .is_some_and(|tag| !tag.eq_ignore_ascii_case("latest"))
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

/// A Dockerfile and its content
#[derive(Debug, Clone)]
pub struct Dockerfile {
    pub path: PathBuf,
    pub content: String,
}

impl Dockerfile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ValidateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, content))
    }

    /// Base images in order of appearance
    ///
    /// `FROM <stage>` lines referring to an earlier `AS <stage>` are skipped.
    pub fn images(&self) -> Vec<ImageReference> {
        let mut stages = HashSet::new();
        let mut images = Vec::new();

        for line in self.content.lines() {
            let Some(captures) = FROM_INSTRUCTION.captures(line) else {
                continue;
            };
            let Some(image) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };

            if !stages.contains(&image.to_ascii_lowercase()) {
                images.push(ImageReference::parse(image));
            }
            if let Some(stage) = captures.get(2) {
                stages.insert(stage.as_str().to_ascii_lowercase());
            }
        }
        images
    }

    pub fn unversioned_images(&self) -> Vec<ImageReference> {
        self.images()
            .into_iter()
            .filter(|image| !image.is_versioned())
            .collect()
    }
}

// Dockerfile discovery

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Only files with exactly this name are checked
pub const DOCKERFILE_NAME: &str = "Dockerfile";

const SKIPPED_DIRECTORIES: &[&str] = &[".git", "target", "node_modules"];

/// Every `Dockerfile` below `root`, sorted by path
pub fn find_dockerfiles(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_skipped(e)) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == DOCKERFILE_NAME {
            debug!(path = %entry.path().display(), "Found Dockerfile");
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name))
}

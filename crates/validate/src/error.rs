// Validation errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("cannot traverse directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ValidateError>;

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source photo {0} has no file name")]
    NoFileName(PathBuf),
    #[error("failed to {action} {from} to {to}: {source}")]
    Transfer {
        action: &'static str,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Materializes named groups as one directory per label.
pub trait PhotoOrganizer: Send {
    /// Returns the directory created (or reused) for each label.
    ///
    /// Stops at the first failing file; files already placed stay where
    /// they are.
    fn organize(
        &self,
        groups: &BTreeMap<String, Vec<PathBuf>>,
    ) -> Result<BTreeMap<String, PathBuf>, OrganizeError>;
}

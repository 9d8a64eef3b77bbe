//! Display-name lookup against the site password file

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reading the directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The site password file could not be read
    #[error("unable to open site password file: {0}")]
    Unavailable(#[from] io::Error),
}

/// Lookup of a human-readable display name for an account.
///
/// Confirmation text only; never an authorization decision.
pub trait Directory {
    /// The display name for `username`, or `None` if the account is not
    /// listed.
    fn lookup(&self, username: &str) -> Result<Option<String>, DirectoryError>;
}

/// Colon-separated site password file; the display name is the GECOS
/// field.
#[derive(Debug, Clone)]
pub struct PasswdFile {
    path: PathBuf,
}

impl PasswdFile {
    /// Scan the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Directory for PasswdFile {
    fn lookup(&self, username: &str) -> Result<Option<String>, DirectoryError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(find_name(&contents, username))
    }
}

/// First matching entry that actually carries a GECOS field wins; shorter
/// lines for the same account are skipped.
fn find_name(contents: &str, username: &str) -> Option<String> {
    contents
        .lines()
        .filter(|line| line.split(':').next() == Some(username))
        .find_map(|line| line.split(':').nth(4))
        .map(ToString::to_string)
}

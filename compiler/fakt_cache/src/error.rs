//! Signature store errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An I/O failure of the signature store.
///
/// Never fatal: the store degrades to "always regenerate" and keeps the error
/// for the caller to report.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cannot read signature cache `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write signature cache `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    pub fn path(&self) -> &PathBuf {
        match self {
            CacheError::Read { path, .. } | CacheError::Write { path, .. } => path,
        }
    }
}

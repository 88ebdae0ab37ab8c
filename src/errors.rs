//! Errors and the exit codes they map to.
//!
//! Loading the index is the only fallible domain step, so [`LoadError`] is
//! the only layer error. [`SyError`] wraps it together with output and usage
//! failures and knows how `main` should report each one. A query that
//! matches nothing is not an error.

use std::path::PathBuf;

use thiserror::Error;

/// Also used for queries with no matches.
pub const EXIT_SUCCESS: i32 = 0;
/// Runtime failure, e.g. an unreadable index.
pub const EXIT_ERROR: i32 = 1;
/// Bad command line.
pub const EXIT_USAGE: i32 = 2;

/// Errors arising while loading a SCIP index. Always fatal, never retried.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The index file could not be read.
    #[error("failed to read SCIP index {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a valid SCIP protobuf message.
    #[error("failed to decode SCIP index {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: protobuf::Error,
    },
}

/// Anything that ends a `sy` run early.
#[derive(Error, Debug)]
pub enum SyError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<clap::Error> for SyError {
    /// Drops clap's `error:` prefix and `--help` tip; the printer and
    /// [`SyError::hint`] supply both.
    fn from(err: clap::Error) -> Self {
        let text = err.to_string();
        let text = text.trim_end();
        let text = text.strip_prefix("error: ").unwrap_or(text);
        let text = text.split("\n\nFor more information").next().unwrap_or(text);
        SyError::Usage(text.to_string())
    }
}

impl SyError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SyError::Usage(_) => EXIT_USAGE,
            _ => EXIT_ERROR,
        }
    }

    /// A follow-up suggestion printed after the error, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SyError::Load(LoadError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Some("verify the index file exists")
            }
            SyError::Load(LoadError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                Some("check file permissions")
            }
            SyError::Usage(_) => Some("run `sy --help` for usage"),
            SyError::Load(LoadError::Decode { .. }) => {
                Some("the file may not be a SCIP index; regenerate it with your indexer")
            }
            _ => None,
        }
    }
}

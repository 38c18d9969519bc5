//! Error types for the HTTP filesystem.
//!
//! # Design
//! `NotExist` gets a dedicated variant because callers branch on "the file
//! does not exist" the same way they would against a local filesystem. The
//! conversion into `io::Error` maps it to `ErrorKind::NotFound` so that
//! check is source-compatible with `std::fs` callers. All other error
//! statuses land in `Http` with the status line for debugging, and transport
//! failures are carried through untouched.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Errors returned by `HttpFs::open`.
///
/// `E` is the transport's own error type, preserved as-is in `Transport`.
#[derive(Debug, Error)]
pub enum FsError<E> {
    /// The transport could not complete the exchange.
    #[error(transparent)]
    Transport(E),

    /// The server answered 404.
    #[error("file does not exist")]
    NotExist,

    /// The server answered with an error status other than 404.
    #[error("HTTP error: {status_text}")]
    Http { status: u16, status_text: String },

    /// The path could not be resolved against the base URL.
    #[error("invalid path {path:?}: {source}")]
    InvalidPath {
        path: String,
        source: url::ParseError,
    },
}

impl<E> FsError<E> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotExist)
    }

    /// Status code of the response that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FsError::NotExist => Some(404),
            FsError::Http { status, .. } => Some(*status),
            FsError::Transport(_) | FsError::InvalidPath { .. } => None,
        }
    }
}

impl<E> From<FsError<E>> for io::Error
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: FsError<E>) -> Self {
        match err {
            FsError::Transport(inner) => {
                // An io::Error from the transport keeps its kind.
                let boxed: Box<dyn StdError + Send + Sync> = Box::new(inner);
                match boxed.downcast::<io::Error>() {
                    Ok(io_err) => *io_err,
                    Err(other) => io::Error::other(other),
                }
            }
            err @ FsError::NotExist => io::Error::new(io::ErrorKind::NotFound, err),
            err @ FsError::InvalidPath { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            err @ FsError::Http { .. } => io::Error::other(err),
        }
    }
}

/// Errors from building an `HttpFsConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("base URL {0} cannot have relative paths resolved against it")]
    NotABase(url::Url),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error type of this crate.

use std::io;

use ndarray::ShapeError;
use thiserror::Error;

/// `Result` type alias for operations that can lead to `Error`.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Errors of this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O operation failed.
    #[error("{desc}: {error}")]
    Io {
        desc: String,
        #[source]
        error: io::Error,
    },

    /// Data did not have the expected format.
    #[error("{0}")]
    Format(String),

    /// Embedding matrix shape error.
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Vectors of incompatible dimensionalities were combined.
    #[error("Dimensionality mismatch, expected: {expected}, got: {got}")]
    Dimensions { expected: usize, got: usize },

    /// A token stream was read past its last token.
    #[error("Token stream is exhausted after {consumed} tokens")]
    Exhausted { consumed: usize },

    /// A trained model was requested before training completed.
    #[error("Model has not been trained")]
    Untrained,
}

impl Error {
    pub(crate) fn io_error(desc: impl Into<String>, error: io::Error) -> Self {
        Error::Io {
            desc: desc.into(),
            error,
        }
    }

    pub(crate) fn read_error(desc: impl Into<String>, error: io::Error) -> Self {
        Error::io_error(desc, error)
    }

    pub(crate) fn write_error(desc: impl Into<String>, error: io::Error) -> Self {
        Error::io_error(desc, error)
    }
}

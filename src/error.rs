//! Error type shared by the seekable readers.

use std::borrow::Cow;
use std::io;

use thiserror::Error;

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Errors returned by [`SeekableByteStream`](crate::SeekableByteStream) operations.
///
/// Reaching the end of the object is never an error: reads there return an
/// empty buffer.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A seek target before the start of the object, or another bad argument.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: Cow<'static, str>,
    },

    /// The stream is read-only.
    #[error("Operation '{operation}' is not supported on a read-only stream")]
    NotSupported {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// The range source failed.
    #[error("Transport error: {0:#}")]
    Transport(#[from] anyhow::Error),

    /// The range source returned a different number of bytes than requested.
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Bytes requested
        expected: u64,
        /// Bytes received
        actual: u64,
    },
}

impl StreamError {
    pub(crate) fn invalid_argument(reason: impl Into<Cow<'static, str>>) -> Self {
        StreamError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// True for failures that came from the range source.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StreamError::Transport(_) | StreamError::ShortRead { .. }
        )
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match &err {
            StreamError::InvalidArgument { .. } => io::ErrorKind::InvalidInput,
            StreamError::NotSupported { .. } => io::ErrorKind::Unsupported,
            StreamError::ShortRead { .. } => io::ErrorKind::UnexpectedEof,
            StreamError::Transport(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

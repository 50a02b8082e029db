//! Error types for bytestream operations.

use std::fmt;

/// Result type for bytestream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur during byte-level reading and patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the readable region.
    UnexpectedEof {
        /// Byte offset the read started at.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// An absolute offset lies outside the buffer.
    OffsetOutOfRange {
        /// The offending offset.
        offset: usize,
        /// Length of the buffer.
        len: usize,
    },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                offset,
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes at offset {offset} but only {available} bytes available"
                )
            }
            Self::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for buffer of {len} bytes")
            }
        }
    }
}

impl std::error::Error for ByteError {}

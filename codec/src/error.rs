//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during compression or decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Stream framing or packet error.
    Wire(wire::DecodeError),

    /// Packet layout error while encoding.
    WireEncode(wire::EncodeError),

    /// A match refers to bytes before the start of the output.
    LookbackOutOfRange {
        /// Offset of the offending packet in the stream.
        offset: usize,
        distance: usize,
        /// Output length when the packet was read.
        available: usize,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Thread count must be at least one.
    InvalidThreadCount { requested: usize },

    /// Block granularity must be non-zero.
    InvalidGranularity { granularity: usize },

    /// A block worker panicked.
    WorkerFailed {
        /// Index of the block whose worker failed.
        block: usize,
    },
}

impl CodecError {
    /// Returns `true` for malformed stream headers.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        match self {
            Self::Wire(e) => e.is_format(),
            _ => false,
        }
    }

    /// Returns `true` for malformed packet sequences.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        match self {
            Self::Wire(e) => e.is_corruption(),
            Self::LookbackOutOfRange { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` for invalid arguments and encoder invariant breaks.
    #[must_use]
    pub const fn is_contract(&self) -> bool {
        matches!(
            self,
            Self::WireEncode(_)
                | Self::InvalidThreadCount { .. }
                | Self::InvalidGranularity { .. }
                | Self::WorkerFailed { .. }
        )
    }
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    OutputBytes,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::WireEncode(e) => write!(f, "encode error: {e}"),
            Self::LookbackOutOfRange {
                offset,
                distance,
                available,
            } => {
                write!(
                    f,
                    "lookback of {distance} bytes at offset 0x{offset:X} exceeds {available} decoded bytes"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::InvalidThreadCount { requested } => {
                write!(f, "invalid thread count {requested}, need at least 1")
            }
            Self::InvalidGranularity { granularity } => {
                write!(f, "invalid block granularity {granularity}")
            }
            Self::WorkerFailed { block } => {
                write!(f, "worker for block {block} panicked")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OutputBytes => "output bytes",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::WireEncode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::WireEncode(err)
    }
}

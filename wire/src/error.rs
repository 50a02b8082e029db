//! Error types for wire format operations.

use std::fmt;

use bytestream::ByteError;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for stream framing and packet parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Stream is too small to contain the header.
    StreamTooSmall { actual: usize, required: usize },

    /// Invalid magic tag in the stream header.
    InvalidMagic { found: [u8; 3] },

    /// Declared `total_size` is smaller than the header or larger than the buffer.
    DeclaredSizeMismatch { declared: u32, actual: usize },

    /// A packet runs past the declared end of the stream.
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Two literal packets follow each other.
    AdjacentLiterals { offset: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

impl DecodeError {
    /// Returns `true` for errors in the header (bad magic, size fields).
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(
            self,
            Self::StreamTooSmall { .. } | Self::InvalidMagic { .. } | Self::DeclaredSizeMismatch { .. }
        )
    }

    /// Returns `true` for errors in the packet sequence itself.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::AdjacentLiterals { .. })
    }
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    StreamBytes,
}

/// Errors that can occur while laying out packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Stream length does not fit the 32-bit `total_size` field.
    StreamTooLarge { length: usize },
    /// Literal run length has no literal packet encoding.
    LiteralOutOfRange { length: usize },
    /// Match has no packet encoding.
    MatchOutOfRange { distance: usize, length: usize },
    /// A reserved field or inline slot is missing from the output.
    MissingField { offset: usize, len: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamTooSmall { actual, required } => {
                write!(
                    f,
                    "stream too small: {actual} bytes, need at least {required}"
                )
            }
            Self::InvalidMagic { found } => {
                write!(
                    f,
                    "invalid magic tag: {:02X} {:02X} {:02X}",
                    found[0], found[1], found[2]
                )
            }
            Self::DeclaredSizeMismatch { declared, actual } => {
                write!(
                    f,
                    "declared stream size {declared} does not fit buffer of {actual} bytes"
                )
            }
            Self::Truncated {
                offset,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated packet at offset 0x{offset:X}: need {needed} bytes, have {available}"
                )
            }
            Self::AdjacentLiterals { offset } => {
                write!(f, "two literal packets in a row at offset 0x{offset:X}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StreamBytes => "stream bytes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamTooLarge { length } => {
                write!(f, "stream too large for 32-bit size field: {length} bytes")
            }
            Self::LiteralOutOfRange { length } => {
                write!(f, "literal run of {length} bytes has no packet encoding")
            }
            Self::MatchOutOfRange { distance, length } => {
                write!(
                    f,
                    "match of {length} bytes at distance {distance} has no packet encoding"
                )
            }
            Self::MissingField { offset, len } => {
                write!(f, "field at offset {offset} missing from {len} written bytes")
            }
        }
    }
}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                offset,
                requested,
                available,
            } => Self::Truncated {
                offset,
                needed: requested,
                available,
            },
            ByteError::OffsetOutOfRange { offset, len } => Self::Truncated {
                offset,
                needed: 0,
                available: len,
            },
        }
    }
}

impl From<ByteError> for EncodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                offset, available, ..
            } => Self::MissingField {
                offset,
                len: available,
            },
            ByteError::OffsetOutOfRange { offset, len } => Self::MissingField { offset, len },
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

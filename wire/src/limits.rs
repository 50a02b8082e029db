//! Configurable limits for bounded decoding.

/// Wire-level limits for stream decoding.
///
/// Output-size limits belong to the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum declared stream size in bytes.
    pub max_stream_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Asset segments are a few MiB at most
            max_stream_bytes: 64 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_stream_bytes: 256 * 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_stream_bytes: usize::MAX,
        }
    }
}

//! Limits for codec-level decoding.

/// Codec-specific limits enforced during decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of decompressed bytes.
    pub max_output_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_output_bytes: 256 * 1024 * 1024,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_output_bytes: 1024 * 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_output_bytes: usize::MAX,
        }
    }
}

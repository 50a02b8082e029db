//! Encoder configuration.

use crate::error::{CodecError, CodecResult};

/// Default block size granularity in bytes.
pub const DEFAULT_BLOCK_GRANULARITY: usize = 0x100;

/// Options controlling how the encoder splits its input.
///
/// The thread count only partitions the search space; any count produces a
/// stream that decodes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Number of blocks compressed in parallel, at least 1.
    pub thread_count: usize,
    /// Block sizes are rounded up to a multiple of this value.
    pub block_granularity: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            thread_count: 1,
            block_granularity: DEFAULT_BLOCK_GRANULARITY,
        }
    }
}

impl EncodeOptions {
    /// Creates default options with `thread_count` workers.
    #[must_use]
    pub fn with_threads(thread_count: usize) -> Self {
        Self {
            thread_count,
            ..Self::default()
        }
    }

    /// Checks that the options can drive the scheduler.
    pub fn validate(&self) -> CodecResult<()> {
        if self.thread_count == 0 {
            return Err(CodecError::InvalidThreadCount {
                requested: self.thread_count,
            });
        }
        if self.block_granularity == 0 {
            return Err(CodecError::InvalidGranularity {
                granularity: self.block_granularity,
            });
        }
        Ok(())
    }
}

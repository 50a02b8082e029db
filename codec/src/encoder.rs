//! Configured parallel encoder.

use crate::error::CodecResult;
use crate::options::EncodeOptions;
use crate::scheduler::{compress_blocks, merge, partition};
use crate::trace::{CodecTrace, NoTrace};

/// Encoder configured with [`EncodeOptions`].
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    /// Creates an encoder with the given options.
    #[must_use]
    pub const fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Returns the encoder options.
    #[must_use]
    pub const fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Compresses `source` into a finished stream.
    pub fn compress(&self, source: &[u8]) -> CodecResult<Vec<u8>> {
        self.compress_traced(source, &mut NoTrace)
    }

    /// Compresses `source`, reporting blocks, fillers and pads to `trace`.
    pub fn compress_traced<T: CodecTrace + ?Sized>(
        &self,
        source: &[u8],
        trace: &mut T,
    ) -> CodecResult<Vec<u8>> {
        self.options.validate()?;
        let ranges = partition(
            source.len(),
            self.options.thread_count,
            self.options.block_granularity,
        )?;
        log::debug!(
            "compressing {} bytes in {} blocks",
            source.len(),
            ranges.len()
        );
        let blocks = compress_blocks(source, &ranges)?;
        merge(&blocks, trace)
    }
}

/// Compresses `source` using `thread_count` parallel blocks.
pub fn compress(source: &[u8], thread_count: usize) -> CodecResult<Vec<u8>> {
    Encoder::new(EncodeOptions::with_threads(thread_count)).compress(source)
}

//! Compression and decompression of WAD LZ streams.
//!
//! This is the main codec crate that ties together `bytestream` and `wire`
//! to provide the decoder and the parallel block encoder.
//!
//! # Features
//!
//! - Sequential decoding with overlapping lookback copies
//! - Greedy match search within 16 KiB windows
//! - Block-parallel encoding on scoped threads
//! - Pad and filler insertion when blocks are merged
//! - Injectable trace sinks
//!
//! # Design Principles
//!
//! - **Correctness first** - Every produced stream decodes to the exact input.
//! - **Loader constraints hold after merging** - Pads and join fillers are
//!   placed in the sequential merge pass.
//! - **Deterministic** - Same input and thread count produce the same stream.
//!
//! # Example
//!
//! ```
//! let source = b"abcabcabcabcabcabc".repeat(10);
//! let stream = codec::compress(&source, 2).unwrap();
//! assert_eq!(codec::decompress(&stream, None).unwrap(), source);
//! ```

mod assembler;
mod decoder;
mod encoder;
mod error;
mod limits;
mod match_finder;
mod options;
mod packet_encoder;
mod scheduler;
mod trace;
mod types;

pub use assembler::{assemble_block, Intermediate};
pub use decoder::{decompress, decompress_into, Decoder};
pub use encoder::{compress, Encoder};
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::CodecLimits;
pub use match_finder::{find_step, longest_match};
pub use options::{EncodeOptions, DEFAULT_BLOCK_GRANULARITY};
pub use packet_encoder::PacketEncoder;
pub use scheduler::{compress_blocks, merge, partition};
pub use trace::{CodecTrace, FillerCounts, FillerReason, LogTrace, NoTrace, ShapeStats, TraceStats};
pub use types::{Match, Step};
pub use wire::Limits as WireLimits;

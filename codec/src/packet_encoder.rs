//! Packet emission for one block.

use bytestream::ByteWriter;
use wire::{
    write_inline_literal, write_literal_packet, write_match_packet, MatchShape, FILLER_PACKET,
    MAX_INLINE_LITERAL_LEN,
};

use crate::error::CodecResult;
use crate::trace::{FillerCounts, FillerReason};

/// Kind of the most recently written packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    /// Nothing written yet, or an inline slot was just filled.
    Closed,
    /// A literal packet.
    Literal,
    /// A match or filler packet with an empty inline slot.
    OpenSlot,
}

/// Appends packets to a block's private buffer.
///
/// Never writes two literal packets in a row and folds literal runs of up
/// to three bytes into the preceding packet's inline slot.
#[derive(Debug)]
pub struct PacketEncoder {
    out: ByteWriter,
    last: Last,
    fillers: FillerCounts,
}

impl Default for PacketEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an encoder whose buffer can hold `bytes` without reallocating.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            out: ByteWriter::with_capacity(bytes),
            last: Last::Closed,
            fillers: FillerCounts::default(),
        }
    }

    /// Writes `bytes` as a literal run.
    pub fn push_literal(&mut self, bytes: &[u8]) -> CodecResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        if bytes.len() <= MAX_INLINE_LITERAL_LEN {
            if self.last != Last::OpenSlot {
                self.push_filler(FillerReason::InlineHost);
            }
            write_inline_literal(&mut self.out, bytes)?;
            self.last = Last::Closed;
        } else {
            if self.last == Last::Literal {
                self.push_filler(FillerReason::AdjacentLiteral);
            }
            write_literal_packet(&mut self.out, bytes)?;
            self.last = Last::Literal;
        }
        Ok(())
    }

    /// Writes a match packet.
    pub fn push_match(&mut self, distance: usize, length: usize) -> CodecResult<MatchShape> {
        let shape = write_match_packet(&mut self.out, distance, length)?;
        self.last = Last::OpenSlot;
        Ok(shape)
    }

    fn push_filler(&mut self, reason: FillerReason) {
        self.out.write_bytes(&FILLER_PACKET);
        self.fillers.record(reason);
        self.last = Last::OpenSlot;
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Returns the written packets and the fillers emitted.
    #[must_use]
    pub fn finish(self) -> (Vec<u8>, FillerCounts) {
        (self.out.finish(), self.fillers)
    }
}

//! Compression of one block into an intermediate packet stream.

use crate::error::CodecResult;
use crate::match_finder::find_step;
use crate::packet_encoder::PacketEncoder;
use crate::trace::FillerCounts;

/// Header-less, pad-less packets for one block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Intermediate {
    /// Encoded packets.
    pub packets: Vec<u8>,
    /// Number of source bytes the packets decode to.
    pub input_len: usize,
    /// Fillers emitted while encoding.
    pub fillers: FillerCounts,
}

/// Compresses `block` on its own.
///
/// Matches only reference bytes inside `block`, so blocks can be compressed
/// independently and decoded back to back.
pub fn assemble_block(block: &[u8]) -> CodecResult<Intermediate> {
    let mut encoder = PacketEncoder::with_capacity(block.len() + block.len() / 64 + 16);
    let mut cursor = 0;
    while cursor < block.len() {
        let step = find_step(block, cursor);
        encoder.push_literal(&block[cursor..cursor + step.literal_len])?;
        cursor += step.literal_len;
        if let Some(found) = step.found {
            encoder.push_match(found.distance, found.length)?;
            cursor += found.length;
        }
    }
    let (packets, fillers) = encoder.finish();
    Ok(Intermediate {
        packets,
        input_len: block.len(),
        fillers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{PacketBody, PacketReader};

    fn replay(packets: &[u8]) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        for packet in PacketReader::for_packets(packets) {
            match packet.unwrap().body {
                PacketBody::Literal(bytes) | PacketBody::Filler { inline: bytes } => {
                    out.extend_from_slice(bytes);
                }
                PacketBody::Match {
                    distance,
                    length,
                    inline,
                    ..
                } => {
                    let start = out.len() - distance;
                    for i in 0..length {
                        out.push(out[start + i]);
                    }
                    out.extend_from_slice(inline);
                }
                PacketBody::Pad { .. } => unreachable!("blocks never contain pads"),
            }
        }
        out
    }

    #[test]
    fn empty_block_has_no_packets() {
        let intermediate = assemble_block(&[]).unwrap();
        assert!(intermediate.packets.is_empty());
        assert_eq!(intermediate.input_len, 0);
    }

    #[test]
    fn repeated_bytes_compress() {
        let block = vec![0x41; 300];
        let intermediate = assemble_block(&block).unwrap();
        assert!(intermediate.packets.len() < 20);
        assert_eq!(replay(&intermediate.packets), block);
    }

    #[test]
    fn text_roundtrips() {
        let block = b"the quick brown fox jumps over the lazy dog; the quick brown fox again".repeat(5);
        let intermediate = assemble_block(&block).unwrap();
        assert!(intermediate.packets.len() < block.len());
        assert_eq!(replay(&intermediate.packets), block);
    }

    #[test]
    fn tiny_block_uses_inline_host() {
        let intermediate = assemble_block(b"hi").unwrap();
        assert_eq!(intermediate.packets, [0x11, 0x02, 0x00, b'h', b'i']);
        assert_eq!(intermediate.fillers.total(), 1);
    }

    #[test]
    fn long_unique_run_splits_literals() {
        let block: Vec<u8> = (0..=255).chain(0..=255u8).map(|b| b ^ 0x5A).collect();
        let intermediate = assemble_block(&block[..300]).unwrap();
        assert_eq!(replay(&intermediate.packets), &block[..300]);
    }
}

//! Block partitioning, parallel compression and stream merging.
//!
//! The source is split into contiguous blocks that are compressed on scoped
//! worker threads. Workers share nothing but the read-only source. The merge
//! pass then walks every block's packets in order and restores the
//! stream-level invariants the workers cannot see: pad packets every
//! alignment window and no literal packet directly after another across a
//! block join.

use std::ops::Range;
use std::thread;

use bytestream::ByteWriter;
use wire::{
    encode_header, needs_pad, patch_total_size, write_pad, PacketReader, StreamHeader,
    FILLER_PACKET,
};

use crate::assembler::{assemble_block, Intermediate};
use crate::error::{CodecError, CodecResult};
use crate::options::EncodeOptions;
use crate::trace::{CodecTrace, FillerReason};

/// Splits `len` source bytes into at most `thread_count` contiguous ranges.
///
/// Every range but the last is a multiple of `granularity` bytes long. Empty
/// ranges are dropped, so short inputs may produce fewer ranges.
pub fn partition(
    len: usize,
    thread_count: usize,
    granularity: usize,
) -> CodecResult<Vec<Range<usize>>> {
    EncodeOptions {
        thread_count,
        block_granularity: granularity,
    }
    .validate()?;

    if len == 0 {
        return Ok(Vec::new());
    }
    if thread_count == 1 {
        return Ok(vec![0..len]);
    }
    let block_size = len.div_ceil(thread_count).next_multiple_of(granularity);
    Ok((0..thread_count)
        .map(|i| (i * block_size).min(len)..((i + 1) * block_size).min(len))
        .filter(|range| !range.is_empty())
        .collect())
}

/// Compresses each range of `source` on its own scoped thread.
///
/// Results are returned in range order.
pub fn compress_blocks(source: &[u8], ranges: &[Range<usize>]) -> CodecResult<Vec<Intermediate>> {
    if let [range] = ranges {
        return Ok(vec![assemble_block(&source[range.clone()])?]);
    }

    let results: Vec<thread::Result<CodecResult<Intermediate>>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .iter()
            .map(|range| {
                let block = &source[range.clone()];
                scope.spawn(move || assemble_block(block))
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    results
        .into_iter()
        .enumerate()
        .map(|(block, result)| result.map_err(|_| CodecError::WorkerFailed { block })?)
        .collect()
}

/// Concatenates block packets into a finished stream.
pub fn merge<T: CodecTrace + ?Sized>(
    blocks: &[Intermediate],
    trace: &mut T,
) -> CodecResult<Vec<u8>> {
    let payload: usize = blocks.iter().map(|b| b.packets.len()).sum();
    let mut out = ByteWriter::with_capacity(wire::HEADER_SIZE + payload + payload / 64);
    encode_header(StreamHeader::placeholder(), &mut out);

    for (index, block) in blocks.iter().enumerate() {
        block.fillers.replay(trace);
        let mut first = index > 0;
        for packet in PacketReader::for_packets(&block.packets) {
            let packet = packet?;
            trace.packet_decoded(&packet);
            let join_filler = first && packet.is_literal();
            first = false;

            let upcoming = packet.len + if join_filler { FILLER_PACKET.len() } else { 0 };
            if needs_pad(out.len(), upcoming) {
                let position = out.len();
                let fill = write_pad(&mut out);
                trace.pad_inserted(position, fill);
            }
            if join_filler {
                out.write_bytes(&FILLER_PACKET);
                trace.filler_inserted(FillerReason::BlockJoin);
            }
            out.write_bytes(packet.raw(&block.packets));
        }
        trace.block_compressed(index, block.input_len, block.packets.len());
    }

    let total_size = patch_total_size(&mut out)?;
    log::debug!("merged {} blocks into {total_size} bytes", blocks.len());
    Ok(out.finish())
}

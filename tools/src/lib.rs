//! Introspection and debugging tools for the wadlz codec.
//!
//! This crate provides utilities for inspecting compressed streams:
//!
//! - Decode a stream and summarise its packets by shape
//! - Check the header, literal adjacency and padding coverage
//! - Report compression ratio
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use codec::{CodecLimits, CodecResult, Decoder, ShapeStats, TraceStats};
use serde::Serialize;
use wire::{
    decode_header, MatchShape, PacketBody, PacketReader, ALIGNMENT_WINDOW, HEADER_SIZE,
    TOTAL_SIZE_OFFSET,
};

/// Summary of one compressed stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub header: HeaderReport,
    pub packets: PacketReport,
    pub checks: CheckReport,
    /// Decompressed size in bytes.
    pub decoded_len: usize,
    /// Compressed size divided by decompressed size.
    pub ratio: f64,
}

/// Header fields as found in the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    pub total_size: u32,
    pub buffer_len: usize,
    pub trailer: String,
}

/// Packet counts and ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketReport {
    pub total: usize,
    pub literal_packets: usize,
    pub literal_bytes: usize,
    pub max_literal_len: usize,
    pub inline_literal_bytes: usize,
    pub filler_packets: usize,
    pub pad_packets: usize,
    pub matches: Vec<ShapeReport>,
}

/// Counts and ranges for one match shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeReport {
    pub shape: String,
    pub count: usize,
    pub min_distance: usize,
    pub max_distance: usize,
    pub min_length: usize,
    pub max_length: usize,
}

/// Structural checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// `total_size` equals the buffer length.
    pub header_exact: bool,
    /// Start offsets of completed alignment windows without a pad packet.
    pub unpadded_windows: Vec<usize>,
}

impl CheckReport {
    /// Returns `true` if every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.header_exact && self.unpadded_windows.is_empty()
    }
}

/// Decodes `bytes` and builds an [`InspectReport`].
///
/// Fails with the decoder's error if the stream is malformed, which covers
/// adjacent literal packets and out-of-range lookbacks.
pub fn inspect_stream(
    bytes: &[u8],
    wire_limits: &wire::Limits,
    limits: &CodecLimits,
) -> CodecResult<InspectReport> {
    let header = decode_header(bytes)?;
    let mut stats = TraceStats::new();
    let mut decoded = Vec::new();
    Decoder::with_limits(wire_limits.clone(), limits.clone()).decompress_traced(
        bytes,
        None,
        &mut decoded,
        &mut stats,
    )?;

    let stream_len = header.stream_len();
    let pads = pad_offsets(bytes, wire_limits)?;
    let trailer_start = TOTAL_SIZE_OFFSET + 4;

    Ok(InspectReport {
        header: HeaderReport {
            total_size: header.total_size,
            buffer_len: bytes.len(),
            trailer: String::from_utf8_lossy(&bytes[trailer_start..HEADER_SIZE]).into_owned(),
        },
        packets: packet_report(&stats),
        checks: CheckReport {
            header_exact: stream_len == bytes.len(),
            unpadded_windows: unpadded_windows(stream_len, &pads),
        },
        decoded_len: decoded.len(),
        ratio: ratio(stream_len, decoded.len()),
    })
}

fn pad_offsets(bytes: &[u8], wire_limits: &wire::Limits) -> CodecResult<Vec<usize>> {
    let mut pads = Vec::new();
    for packet in PacketReader::new(bytes, wire_limits)? {
        let packet = packet?;
        if matches!(packet.body, PacketBody::Pad { .. }) {
            pads.push(packet.offset);
        }
    }
    Ok(pads)
}

fn unpadded_windows(stream_len: usize, pads: &[usize]) -> Vec<usize> {
    let mut missing = Vec::new();
    let mut start = HEADER_SIZE;
    while start + ALIGNMENT_WINDOW <= stream_len {
        let end = start + ALIGNMENT_WINDOW;
        if !pads.iter().any(|&pad| pad >= start && pad < end) {
            missing.push(start);
        }
        start = end;
    }
    missing
}

#[allow(clippy::cast_precision_loss)]
fn ratio(compressed: usize, decoded: usize) -> f64 {
    if decoded == 0 {
        return 0.0;
    }
    compressed as f64 / decoded as f64
}

fn packet_report(stats: &TraceStats) -> PacketReport {
    let matches = [
        MatchShape::Little,
        MatchShape::Big,
        MatchShape::Bigger,
        MatchShape::Far,
    ]
    .into_iter()
    .map(|shape| shape_report(shape, stats.shape(shape)))
    .filter(|report| report.count > 0)
    .collect();
    PacketReport {
        total: stats.packets,
        literal_packets: stats.literal_packets,
        literal_bytes: stats.literal_bytes,
        max_literal_len: stats.max_literal_len,
        inline_literal_bytes: stats.inline_literal_bytes,
        filler_packets: stats.filler_packets,
        pad_packets: stats.pad_packets,
        matches,
    }
}

fn shape_report(shape: MatchShape, stats: &ShapeStats) -> ShapeReport {
    ShapeReport {
        shape: format!("{shape:?}").to_lowercase(),
        count: stats.count,
        min_distance: stats.min_distance,
        max_distance: stats.max_distance,
        min_length: stats.min_length,
        max_length: stats.max_length,
    }
}

/// Formats a report for terminal output.
#[must_use]
pub fn format_report_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let header = &report.header;
    let _ = writeln!(
        out,
        "total_size: {} buffer: {} bytes trailer: {}",
        header.total_size, header.buffer_len, header.trailer
    );
    let _ = writeln!(
        out,
        "decoded: {} bytes ratio: {:.3}",
        report.decoded_len, report.ratio
    );
    let packets = &report.packets;
    let _ = writeln!(out, "packets: {}", packets.total);
    let _ = writeln!(
        out,
        "  literal: {} ({} bytes, max {})",
        packets.literal_packets, packets.literal_bytes, packets.max_literal_len
    );
    for shape in &packets.matches {
        let _ = writeln!(
            out,
            "  {}: {} (length {}..={}, distance {}..={})",
            shape.shape,
            shape.count,
            shape.min_length,
            shape.max_length,
            shape.min_distance,
            shape.max_distance
        );
    }
    let _ = writeln!(out, "  filler: {}", packets.filler_packets);
    let _ = writeln!(out, "  pad: {}", packets.pad_packets);
    let _ = writeln!(out, "  inline literal bytes: {}", packets.inline_literal_bytes);

    let checks = &report.checks;
    let _ = writeln!(
        out,
        "checks: header {} padding {}",
        if checks.header_exact { "ok" } else { "MISMATCH" },
        if checks.unpadded_windows.is_empty() {
            "ok".to_string()
        } else {
            format!("{} windows unpadded", checks.unpadded_windows.len())
        }
    );
    out
}

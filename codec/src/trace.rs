//! Injectable trace sinks for encoder and decoder events.
//!
//! Every hook defaults to a no-op, so a sink only implements what it needs.
//! [`NoTrace`] discards everything, [`LogTrace`] forwards to the `log` facade
//! and [`TraceStats`] accumulates counters for inspection tools and tests.

use wire::{MatchShape, Packet, PacketBody};

/// Why the encoder emitted a filler packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillerReason {
    /// A literal packet would have followed another literal packet.
    AdjacentLiteral,
    /// A short literal run had no open inline slot to fold into.
    InlineHost,
    /// The first packet of a block was a literal packet.
    BlockJoin,
}

impl FillerReason {
    pub const ALL: [Self; 3] = [Self::AdjacentLiteral, Self::InlineHost, Self::BlockJoin];

    const fn index(self) -> usize {
        match self {
            Self::AdjacentLiteral => 0,
            Self::InlineHost => 1,
            Self::BlockJoin => 2,
        }
    }
}

/// Filler packet counts per reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillerCounts {
    counts: [usize; 3],
}

impl FillerCounts {
    /// Records one filler.
    pub fn record(&mut self, reason: FillerReason) {
        self.counts[reason.index()] += 1;
    }

    /// Returns the count for `reason`.
    #[must_use]
    pub const fn get(&self, reason: FillerReason) -> usize {
        self.counts[reason.index()]
    }

    /// Returns the count over all reasons.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Forwards every recorded filler to `trace`.
    pub fn replay<T: CodecTrace + ?Sized>(&self, trace: &mut T) {
        for reason in FillerReason::ALL {
            for _ in 0..self.get(reason) {
                trace.filler_inserted(reason);
            }
        }
    }
}

/// Receiver for codec events.
pub trait CodecTrace {
    /// Called for every packet read from a stream or a block's packets.
    fn packet_decoded(&mut self, _packet: &Packet<'_>) {}

    /// Called when the merger writes a pad packet at `position` followed by
    /// `fill` fill bytes.
    fn pad_inserted(&mut self, _position: usize, _fill: usize) {}

    /// Called once per filler packet the encoder emits.
    fn filler_inserted(&mut self, _reason: FillerReason) {}

    /// Called once per block after its worker has finished.
    fn block_compressed(&mut self, _block: usize, _input_len: usize, _output_len: usize) {}
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl CodecTrace for NoTrace {}

/// Sink that forwards events to the `log` facade.
///
/// Packets are logged at trace level, structural events at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl CodecTrace for LogTrace {
    fn packet_decoded(&mut self, packet: &Packet<'_>) {
        match packet.body {
            PacketBody::Literal(bytes) => {
                log::trace!("0x{:X}: literal {} bytes", packet.offset, bytes.len());
            }
            PacketBody::Match {
                shape,
                distance,
                length,
                inline,
            } => {
                log::trace!(
                    "0x{:X}: {shape:?} match length {length} distance {distance} inline {}",
                    packet.offset,
                    inline.len()
                );
            }
            PacketBody::Filler { inline } => {
                log::trace!("0x{:X}: filler inline {}", packet.offset, inline.len());
            }
            PacketBody::Pad { skipped } => {
                log::trace!("0x{:X}: pad skipping {skipped} bytes", packet.offset);
            }
        }
    }

    fn pad_inserted(&mut self, position: usize, fill: usize) {
        log::debug!("pad at 0x{position:X} with {fill} fill bytes");
    }

    fn filler_inserted(&mut self, reason: FillerReason) {
        log::debug!("filler inserted: {reason:?}");
    }

    fn block_compressed(&mut self, block: usize, input_len: usize, output_len: usize) {
        log::debug!("block {block}: {input_len} -> {output_len} bytes");
    }
}

/// Range statistics for one match shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeStats {
    pub count: usize,
    pub min_distance: usize,
    pub max_distance: usize,
    pub min_length: usize,
    pub max_length: usize,
}

impl ShapeStats {
    fn record(&mut self, distance: usize, length: usize) {
        if self.count == 0 {
            self.min_distance = distance;
            self.min_length = length;
        }
        self.count += 1;
        self.min_distance = self.min_distance.min(distance);
        self.max_distance = self.max_distance.max(distance);
        self.min_length = self.min_length.min(length);
        self.max_length = self.max_length.max(length);
    }
}

/// Sink that accumulates event counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub packets: usize,
    pub literal_packets: usize,
    pub literal_bytes: usize,
    pub max_literal_len: usize,
    pub inline_literal_bytes: usize,
    pub little: ShapeStats,
    pub big: ShapeStats,
    pub bigger: ShapeStats,
    pub far: ShapeStats,
    /// Filler packets seen while reading packets.
    pub filler_packets: usize,
    /// Pad packets seen while reading packets.
    pub pad_packets: usize,
    /// Pads written by the merger.
    pub pads_inserted: usize,
    pub pad_fill_bytes: usize,
    /// Fillers emitted by the encoder.
    pub fillers_inserted: FillerCounts,
    pub blocks: usize,
}

impl TraceStats {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the statistics for one match shape.
    #[must_use]
    pub const fn shape(&self, shape: MatchShape) -> &ShapeStats {
        match shape {
            MatchShape::Little => &self.little,
            MatchShape::Big => &self.big,
            MatchShape::Bigger => &self.bigger,
            MatchShape::Far => &self.far,
        }
    }

    /// Returns the number of match packets over all shapes.
    #[must_use]
    pub const fn match_packets(&self) -> usize {
        self.little.count + self.big.count + self.bigger.count + self.far.count
    }

    fn shape_mut(&mut self, shape: MatchShape) -> &mut ShapeStats {
        match shape {
            MatchShape::Little => &mut self.little,
            MatchShape::Big => &mut self.big,
            MatchShape::Bigger => &mut self.bigger,
            MatchShape::Far => &mut self.far,
        }
    }
}

impl CodecTrace for TraceStats {
    fn packet_decoded(&mut self, packet: &Packet<'_>) {
        self.packets += 1;
        self.inline_literal_bytes += packet.inline_literal().len();
        match packet.body {
            PacketBody::Literal(bytes) => {
                self.literal_packets += 1;
                self.literal_bytes += bytes.len();
                self.max_literal_len = self.max_literal_len.max(bytes.len());
            }
            PacketBody::Match {
                shape,
                distance,
                length,
                ..
            } => self.shape_mut(shape).record(distance, length),
            PacketBody::Filler { .. } => self.filler_packets += 1,
            PacketBody::Pad { .. } => self.pad_packets += 1,
        }
    }

    fn pad_inserted(&mut self, _position: usize, fill: usize) {
        self.pads_inserted += 1;
        self.pad_fill_bytes += fill;
    }

    fn filler_inserted(&mut self, reason: FillerReason) {
        self.fillers_inserted.record(reason);
    }

    fn block_compressed(&mut self, _block: usize, _input_len: usize, _output_len: usize) {
        self.blocks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(body: PacketBody<'_>) -> Packet<'_> {
        Packet {
            offset: 0,
            len: 0,
            body,
        }
    }

    #[test]
    fn filler_counts_by_reason() {
        let mut counts = FillerCounts::default();
        counts.record(FillerReason::InlineHost);
        counts.record(FillerReason::InlineHost);
        counts.record(FillerReason::BlockJoin);
        assert_eq!(counts.get(FillerReason::InlineHost), 2);
        assert_eq!(counts.get(FillerReason::AdjacentLiteral), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn filler_counts_replay() {
        let mut counts = FillerCounts::default();
        counts.record(FillerReason::AdjacentLiteral);
        counts.record(FillerReason::BlockJoin);
        let mut stats = TraceStats::new();
        counts.replay(&mut stats);
        assert_eq!(stats.fillers_inserted, counts);
    }

    #[test]
    fn stats_track_literals() {
        let mut stats = TraceStats::new();
        stats.packet_decoded(&packet(PacketBody::Literal(&[0; 5])));
        stats.packet_decoded(&packet(PacketBody::Literal(&[0; 20])));
        assert_eq!(stats.literal_packets, 2);
        assert_eq!(stats.literal_bytes, 25);
        assert_eq!(stats.max_literal_len, 20);
        assert_eq!(stats.packets, 2);
    }

    #[test]
    fn stats_track_match_ranges() {
        let mut stats = TraceStats::new();
        for (distance, length) in [(100, 5), (3, 8), (2048, 3)] {
            stats.packet_decoded(&packet(PacketBody::Match {
                shape: MatchShape::Little,
                distance,
                length,
                inline: &[1],
            }));
        }
        let little = stats.shape(MatchShape::Little);
        assert_eq!(little.count, 3);
        assert_eq!(little.min_distance, 3);
        assert_eq!(little.max_distance, 2048);
        assert_eq!(little.min_length, 3);
        assert_eq!(little.max_length, 8);
        assert_eq!(stats.inline_literal_bytes, 3);
        assert_eq!(stats.match_packets(), 3);
    }

    #[test]
    fn stats_track_pads_and_blocks() {
        let mut stats = TraceStats::new();
        stats.pad_inserted(0x1FF0, 0x1D);
        stats.block_compressed(0, 100, 80);
        stats.block_compressed(1, 100, 90);
        stats.packet_decoded(&packet(PacketBody::Pad { skipped: 4 }));
        assert_eq!(stats.pads_inserted, 1);
        assert_eq!(stats.pad_fill_bytes, 0x1D);
        assert_eq!(stats.pad_packets, 1);
        assert_eq!(stats.blocks, 2);
    }

    #[test]
    fn no_trace_accepts_everything() {
        let mut trace = NoTrace;
        trace.filler_inserted(FillerReason::BlockJoin);
        trace.pad_inserted(0, 0);
        trace.block_compressed(0, 0, 0);
    }
}

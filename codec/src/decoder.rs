//! Sequential stream decoder.

use wire::{PacketBody, PacketReader};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::trace::{CodecTrace, NoTrace};

/// Decoder configured with wire and codec limits.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    wire_limits: wire::Limits,
    limits: CodecLimits,
}

impl Decoder {
    /// Creates a decoder with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with explicit limits.
    #[must_use]
    pub const fn with_limits(wire_limits: wire::Limits, limits: CodecLimits) -> Self {
        Self {
            wire_limits,
            limits,
        }
    }

    /// Decodes `source`, stopping once `limit` bytes have been produced.
    pub fn decompress(&self, source: &[u8], limit: Option<usize>) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        self.decompress_into(source, limit, &mut out)?;
        Ok(out)
    }

    /// Decodes `source`, appending to `out`.
    ///
    /// Returns the number of bytes appended. On error `out` is restored to
    /// its original length.
    pub fn decompress_into(
        &self,
        source: &[u8],
        limit: Option<usize>,
        out: &mut Vec<u8>,
    ) -> CodecResult<usize> {
        self.decompress_traced(source, limit, out, &mut NoTrace)
    }

    /// Decodes `source` into `out`, reporting every packet to `trace`.
    pub fn decompress_traced<T: CodecTrace + ?Sized>(
        &self,
        source: &[u8],
        limit: Option<usize>,
        out: &mut Vec<u8>,
        trace: &mut T,
    ) -> CodecResult<usize> {
        let base = out.len();
        let result = self.decode_packets(source, limit.unwrap_or(usize::MAX), base, out, trace);
        if result.is_err() {
            out.truncate(base);
        }
        result
    }

    fn decode_packets<T: CodecTrace + ?Sized>(
        &self,
        source: &[u8],
        target: usize,
        base: usize,
        out: &mut Vec<u8>,
        trace: &mut T,
    ) -> CodecResult<usize> {
        let mut reader = PacketReader::new(source, &self.wire_limits)?;

        while out.len() - base < target {
            let Some(packet) = reader.next_packet()? else {
                break;
            };
            trace.packet_decoded(&packet);

            match packet.body {
                PacketBody::Literal(bytes) => out.extend_from_slice(bytes),
                PacketBody::Match {
                    distance,
                    length,
                    inline,
                    ..
                } => {
                    let available = out.len() - base;
                    if distance > available {
                        return Err(CodecError::LookbackOutOfRange {
                            offset: packet.offset,
                            distance,
                            available,
                        });
                    }
                    copy_lookback(out, distance, length);
                    out.extend_from_slice(inline);
                }
                PacketBody::Filler { inline } => out.extend_from_slice(inline),
                PacketBody::Pad { .. } => {}
            }

            let produced = (out.len() - base).min(target);
            if produced > self.limits.max_output_bytes {
                return Err(CodecError::LimitsExceeded {
                    kind: LimitKind::OutputBytes,
                    limit: self.limits.max_output_bytes,
                    actual: produced,
                });
            }
        }

        let produced = (out.len() - base).min(target);
        out.truncate(base + produced);
        Ok(produced)
    }
}

/// Copies `length` bytes starting `distance` bytes back, one byte at a time
/// so overlapping copies repeat the pattern.
fn copy_lookback(out: &mut Vec<u8>, distance: usize, length: usize) {
    let start = out.len() - distance;
    out.reserve(length);
    for i in 0..length {
        let byte = out[start + i];
        out.push(byte);
    }
}

/// Decodes `source` with default limits.
///
/// `limit`, when given, caps the number of bytes produced.
pub fn decompress(source: &[u8], limit: Option<usize>) -> CodecResult<Vec<u8>> {
    Decoder::new().decompress(source, limit)
}

/// Decodes `source` with default limits, appending to `out`.
pub fn decompress_into(source: &[u8], limit: Option<usize>, out: &mut Vec<u8>) -> CodecResult<usize> {
    Decoder::new().decompress_into(source, limit, out)
}

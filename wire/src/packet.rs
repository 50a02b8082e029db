//! Packet shapes, parsing and byte layouts.
//!
//! Every packet starts with a flag byte whose range selects the shape:
//!
//! | flags       | shape                      | trailing bytes            |
//! |-------------|----------------------------|---------------------------|
//! | `0x00-0x0F` | literal run                | `[len] bytes...`          |
//! | `0x10-0x1F` | far match / filler / pad   | `[len] b0 b1 [inline...]` |
//! | `0x20-0x3F` | big match                  | `[len] b1 b2 [inline...]` |
//! | `0x40-0xFF` | little match               | `b1 [inline...]`          |
//!
//! Match and filler packets carry an inline trailing literal of 0-3 bytes
//! whose count lives in the low two bits of the packet's second-to-last
//! header byte.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::header::{decode_header, HEADER_SIZE};
use crate::limits::Limits;

/// Shortest literal run with a flag-encoded length.
pub const MIN_FLAG_LITERAL_LEN: usize = 4;
/// Longest literal run with a flag-encoded length.
pub const MAX_FLAG_LITERAL_LEN: usize = 18;
/// Longest literal run a single packet can carry (`0xFF + 18`).
pub const MAX_LITERAL_LEN: usize = 273;
/// Longest inline trailing literal.
pub const MAX_INLINE_LITERAL_LEN: usize = 3;

/// Shortest match the encoder emits.
pub const MIN_MATCH_LEN: usize = 3;
/// Longest little match (`0b111 + 1`).
pub const MAX_LITTLE_MATCH_LEN: usize = 8;
/// Farthest little match (`0xFF * 8 + 0b111 + 1`).
pub const MAX_LITTLE_MATCH_DISTANCE: usize = 2048;
/// Longest big match with a flag-encoded length (`0x1F + 2`).
pub const MAX_BIG_MATCH_LEN: usize = 33;
/// Longest match of any shape (`0xFF + 33`).
pub const MAX_MATCH_LEN: usize = 288;
/// Farthest big match (`0x3F + 0xFF * 0x40 + 1`).
pub const MAX_MATCH_DISTANCE: usize = 16384;
/// Distance added to the raw lookback of a far match.
pub const FAR_MATCH_BASE_DISTANCE: usize = 0x4000;

/// Zero-effect packet that breaks literal adjacency and hosts an inline literal.
pub const FILLER_PACKET: [u8; 3] = [0x11, 0x00, 0x00];
/// Packet that makes the loader skip to the next realignment point.
pub const PAD_PACKET: [u8; 3] = [0x12, 0x00, 0x00];
/// Byte written between a pad packet and the realignment point.
pub const PAD_FILL_BYTE: u8 = 0xEE;

/// Size of the window that must contain a pad packet.
pub const ALIGNMENT_WINDOW: usize = 0x2000;
/// Decoders resume after a pad at the next position `≡ PAD_RESUME_REMAINDER`
/// modulo this value.
pub const PAD_RESUME_MODULUS: usize = 0x1000;
/// See [`PAD_RESUME_MODULUS`].
pub const PAD_RESUME_REMAINDER: usize = HEADER_SIZE;

/// Packet class selected by the flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagClass {
    Literal,
    Short,
    Big,
    Little,
}

impl FlagClass {
    /// Classifies a flag byte.
    #[must_use]
    pub const fn of(flag: u8) -> Self {
        match flag {
            0x00..=0x0F => Self::Literal,
            0x10..=0x1F => Self::Short,
            0x20..=0x3F => Self::Big,
            _ => Self::Little,
        }
    }
}

/// Encoding used by a match packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchShape {
    /// Flags `0x40-0xFF`: length 3-8, distance up to 2048.
    Little,
    /// Flags `0x21-0x3F`: length 3-33, distance up to 16384.
    Big,
    /// Flag `0x20` plus a length byte: length 33-288, distance up to 16384.
    Bigger,
    /// Flags `0x10-0x1F` with a non-zero lookback: distance beyond 16384.
    Far,
}

/// What a packet does to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketBody<'a> {
    /// Raw bytes copied to the output.
    Literal(&'a [u8]),
    /// Copy `length` bytes from `distance` bytes back, then append `inline`.
    Match {
        shape: MatchShape,
        distance: usize,
        length: usize,
        inline: &'a [u8],
    },
    /// No copy; only the inline trailing literal is appended.
    Filler { inline: &'a [u8] },
    /// Skip to the next realignment point; `skipped` fill bytes were passed.
    Pad { skipped: usize },
}

/// A parsed packet and its location in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    /// Offset of the flag byte.
    pub offset: usize,
    /// Packet length including inline bytes but excluding pad fill.
    pub len: usize,
    pub body: PacketBody<'a>,
}

impl<'a> Packet<'a> {
    /// Returns `true` for literal packets.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.body, PacketBody::Literal(_))
    }

    /// Returns the inline trailing literal (empty for literal and pad packets).
    #[must_use]
    pub const fn inline_literal(&self) -> &'a [u8] {
        match self.body {
            PacketBody::Match { inline, .. } | PacketBody::Filler { inline } => inline,
            PacketBody::Literal(_) | PacketBody::Pad { .. } => &[],
        }
    }

    /// Returns the number of output bytes this packet produces.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match self.body {
            PacketBody::Literal(bytes) => bytes.len(),
            PacketBody::Match { length, inline, .. } => length + inline.len(),
            PacketBody::Filler { inline } => inline.len(),
            PacketBody::Pad { .. } => 0,
        }
    }

    /// Returns the packet's encoded bytes within the buffer it was parsed from.
    #[must_use]
    pub fn raw<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        &buf[self.offset..self.offset + self.len]
    }
}

/// Sequential packet parser over a bounded region.
///
/// Rejects a literal packet that directly follows another literal packet
/// and any packet that runs past the region end.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    reader: ByteReader<'a>,
    last_was_literal: bool,
    failed: bool,
}

impl<'a> PacketReader<'a> {
    /// Validates the stream header and reads packets up to `total_size`.
    pub fn new(stream: &'a [u8], limits: &Limits) -> WireResult<Self> {
        let header = decode_header(stream)?;
        header.validate_len(stream.len())?;
        if header.stream_len() > limits.max_stream_bytes {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::StreamBytes,
                limit: limits.max_stream_bytes,
                actual: header.stream_len(),
            });
        }
        let reader = ByteReader::bounded(stream, HEADER_SIZE, header.stream_len())?;
        Ok(Self::from_reader(reader))
    }

    /// Reads a header-less packet sequence such as an encoder's
    /// per-block output.
    ///
    /// Offsets are relative to `packets`, so pad realignment is only
    /// meaningful for readers created with [`PacketReader::new`].
    #[must_use]
    pub const fn for_packets(packets: &'a [u8]) -> Self {
        Self::from_reader(ByteReader::new(packets))
    }

    const fn from_reader(reader: ByteReader<'a>) -> Self {
        Self {
            reader,
            last_was_literal: false,
            failed: false,
        }
    }

    /// Returns the offset of the next packet.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.reader.position()
    }

    /// Returns the end of the packet region.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.reader.end()
    }

    /// Returns `true` once every packet has been read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }

    /// Parses the next packet, or returns `None` at the region end.
    pub fn next_packet(&mut self) -> WireResult<Option<Packet<'a>>> {
        if self.reader.is_empty() {
            return Ok(None);
        }
        let offset = self.reader.position();
        let flag = self.reader.read_u8()?;
        let body = match FlagClass::of(flag) {
            FlagClass::Literal => {
                if self.last_was_literal {
                    return Err(DecodeError::AdjacentLiterals { offset });
                }
                let len = if flag != 0 {
                    usize::from(flag) + 3
                } else {
                    usize::from(self.reader.read_u8()?) + MAX_FLAG_LITERAL_LEN
                };
                PacketBody::Literal(self.reader.read_bytes(len)?)
            }
            FlagClass::Short => self.read_short(flag)?,
            FlagClass::Big => self.read_big(flag)?,
            FlagClass::Little => self.read_little(flag)?,
        };
        self.last_was_literal = matches!(body, PacketBody::Literal(_));
        let consumed = self.reader.position() - offset;
        let len = match body {
            PacketBody::Pad { skipped } => consumed - skipped,
            _ => consumed,
        };
        Ok(Some(Packet { offset, len, body }))
    }

    fn read_short(&mut self, flag: u8) -> WireResult<PacketBody<'a>> {
        let mut count = usize::from(flag & 0x07);
        if count == 0 {
            count = usize::from(self.reader.read_u8()?) + 7;
        }
        let b0 = self.reader.read_u8()?;
        let b1 = self.reader.read_u8()?;
        let raw = usize::from(flag & 0x08) * 0x800 + usize::from(b0 >> 2) + usize::from(b1) * 0x40;
        if raw != 0 {
            let inline = self.read_inline(b0)?;
            Ok(PacketBody::Match {
                shape: MatchShape::Far,
                distance: raw + FAR_MATCH_BASE_DISTANCE,
                length: count + 2,
                inline,
            })
        } else if count == 1 {
            Ok(PacketBody::Filler {
                inline: self.read_inline(b0)?,
            })
        } else {
            let skipped = self
                .reader
                .skip_to_alignment(PAD_RESUME_MODULUS, PAD_RESUME_REMAINDER);
            Ok(PacketBody::Pad { skipped })
        }
    }

    fn read_big(&mut self, flag: u8) -> WireResult<PacketBody<'a>> {
        let mut count = usize::from(flag & 0x1F);
        let shape = if count == 0 {
            count = usize::from(self.reader.read_u8()?) + 0x1F;
            MatchShape::Bigger
        } else {
            MatchShape::Big
        };
        let b1 = self.reader.read_u8()?;
        let b2 = self.reader.read_u8()?;
        let distance = usize::from(b1 >> 2) + usize::from(b2) * 0x40 + 1;
        let inline = self.read_inline(b1)?;
        Ok(PacketBody::Match {
            shape,
            distance,
            length: count + 2,
            inline,
        })
    }

    fn read_little(&mut self, flag: u8) -> WireResult<PacketBody<'a>> {
        let b1 = self.reader.read_u8()?;
        let distance = usize::from(b1) * 8 + usize::from((flag >> 2) & 0x07) + 1;
        let inline = self.read_inline(flag)?;
        Ok(PacketBody::Match {
            shape: MatchShape::Little,
            distance,
            length: usize::from(flag >> 5) + 1,
            inline,
        })
    }

    fn read_inline(&mut self, slot: u8) -> WireResult<&'a [u8]> {
        Ok(self.reader.read_bytes(usize::from(slot & 0x03))?)
    }
}

impl<'a> Iterator for PacketReader<'a> {
    type Item = WireResult<Packet<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_packet() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Writes a literal packet carrying `bytes` (4-273 bytes).
pub fn write_literal_packet(out: &mut ByteWriter, bytes: &[u8]) -> Result<(), EncodeError> {
    let length = bytes.len();
    let out_of_range = || EncodeError::LiteralOutOfRange { length };
    if (MIN_FLAG_LITERAL_LEN..=MAX_FLAG_LITERAL_LEN).contains(&length) {
        out.write_u8(u8::try_from(length - 3).map_err(|_| out_of_range())?);
    } else if length > MAX_FLAG_LITERAL_LEN && length <= MAX_LITERAL_LEN {
        out.write_u8(0);
        out.write_u8(u8::try_from(length - MAX_FLAG_LITERAL_LEN).map_err(|_| out_of_range())?);
    } else {
        return Err(out_of_range());
    }
    out.write_bytes(bytes);
    Ok(())
}

/// Writes the narrowest match packet for `(distance, length)`.
///
/// Returns the shape used. The inline literal slot is left empty.
pub fn write_match_packet(
    out: &mut ByteWriter,
    distance: usize,
    length: usize,
) -> Result<MatchShape, EncodeError> {
    let out_of_range = || EncodeError::MatchOutOfRange { distance, length };
    if !(MIN_MATCH_LEN..=MAX_MATCH_LEN).contains(&length)
        || distance == 0
        || distance > MAX_MATCH_DISTANCE
    {
        return Err(out_of_range());
    }
    let byte = |value: usize| u8::try_from(value).map_err(|_| out_of_range());
    let delta = distance - 1;

    if length <= MAX_LITTLE_MATCH_LEN && distance <= MAX_LITTLE_MATCH_DISTANCE {
        out.write_u8(byte(((length - 1) << 5) | ((delta % 8) << 2))?);
        out.write_u8(byte(delta / 8)?);
        return Ok(MatchShape::Little);
    }

    let shape = if length > MAX_BIG_MATCH_LEN {
        out.write_u8(0x20);
        out.write_u8(byte(length - MAX_BIG_MATCH_LEN)?);
        MatchShape::Bigger
    } else {
        out.write_u8(byte(0x20 | (length - 2))?);
        MatchShape::Big
    };
    out.write_u8(byte((delta % 0x40) << 2)?);
    out.write_u8(byte(delta / 0x40)?);
    Ok(shape)
}

/// Stores `bytes` as the inline trailing literal of the packet that ends
/// the writer.
///
/// The caller guarantees the last packet written is a match or filler
/// packet whose slot is still empty.
pub fn write_inline_literal(out: &mut ByteWriter, bytes: &[u8]) -> Result<(), EncodeError> {
    let length = bytes.len();
    if length > MAX_INLINE_LITERAL_LEN {
        return Err(EncodeError::LiteralOutOfRange { length });
    }
    let slot = out.len().checked_sub(2).ok_or(EncodeError::MissingField {
        offset: 0,
        len: out.len(),
    })?;
    let count = u8::try_from(length).map_err(|_| EncodeError::LiteralOutOfRange { length })?;
    out.or_byte(slot, count)?;
    out.write_bytes(bytes);
    Ok(())
}

/// Offset of `position` within its alignment window.
#[must_use]
pub const fn window_offset(position: usize) -> usize {
    (position + ALIGNMENT_WINDOW - HEADER_SIZE) % ALIGNMENT_WINDOW
}

/// Returns `true` if appending `upcoming` bytes at `position` must be
/// preceded by a pad packet.
///
/// Room for the pad packet itself is always kept free at the end of a window.
#[must_use]
pub const fn needs_pad(position: usize, upcoming: usize) -> bool {
    window_offset(position) + upcoming > ALIGNMENT_WINDOW - PAD_PACKET.len()
}

/// Writes a pad packet and fill bytes up to the start of the next window.
///
/// Decoders resume at the next `PAD_RESUME_MODULUS` boundary, so a pad must
/// sit in the second half of its window, which [`needs_pad`] guarantees for
/// packets up to the longest literal.
///
/// Returns the number of fill bytes written.
pub fn write_pad(out: &mut ByteWriter) -> usize {
    out.write_bytes(&PAD_PACKET);
    out.fill_to_alignment(ALIGNMENT_WINDOW, HEADER_SIZE, PAD_FILL_BYTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(bytes: &[u8]) -> Packet<'_> {
        let mut reader = PacketReader::for_packets(bytes);
        let packet = reader.next_packet().unwrap().unwrap();
        assert!(reader.is_empty(), "packet should consume the whole buffer");
        packet
    }

    #[test]
    fn flag_classes() {
        assert_eq!(FlagClass::of(0x00), FlagClass::Literal);
        assert_eq!(FlagClass::of(0x0F), FlagClass::Literal);
        assert_eq!(FlagClass::of(0x10), FlagClass::Short);
        assert_eq!(FlagClass::of(0x1F), FlagClass::Short);
        assert_eq!(FlagClass::of(0x20), FlagClass::Big);
        assert_eq!(FlagClass::of(0x3F), FlagClass::Big);
        assert_eq!(FlagClass::of(0x40), FlagClass::Little);
        assert_eq!(FlagClass::of(0xFF), FlagClass::Little);
    }

    #[test]
    fn parse_flag_literal() {
        let packet = parse_one(&[0x01, 1, 2, 3, 4]);
        assert_eq!(packet.body, PacketBody::Literal(&[1, 2, 3, 4]));
        assert_eq!(packet.len, 5);
        assert!(packet.is_literal());
    }

    #[test]
    fn parse_extended_literal() {
        let mut bytes = vec![0x00, 0x01];
        bytes.extend(std::iter::repeat(0xAB).take(19));
        let packet = parse_one(&bytes);
        assert_eq!(packet.output_len(), 19);
        assert_eq!(packet.len, 21);
    }

    #[test]
    fn parse_filler_with_inline() {
        let packet = parse_one(&[0x11, 0x02, 0x00, 0xAA, 0xBB]);
        assert_eq!(packet.body, PacketBody::Filler { inline: &[0xAA, 0xBB] });
        assert_eq!(packet.output_len(), 2);
    }

    #[test]
    fn parse_little_match() {
        // length 3, delta 9 -> pos_minor 1, pos_major 1
        let packet = parse_one(&[(2 << 5) | (1 << 2), 0x01]);
        assert_eq!(
            packet.body,
            PacketBody::Match {
                shape: MatchShape::Little,
                distance: 10,
                length: 3,
                inline: &[],
            }
        );
    }

    #[test]
    fn parse_little_match_inline_from_flag() {
        let packet = parse_one(&[0x41, 0x00, 0x7F]);
        assert_eq!(packet.inline_literal(), &[0x7F]);
        assert_eq!(packet.output_len(), 4);
    }

    #[test]
    fn parse_big_and_bigger_match() {
        let big = parse_one(&[0x29, 0x80, 0x04]);
        assert_eq!(
            big.body,
            PacketBody::Match {
                shape: MatchShape::Big,
                distance: 289,
                length: 11,
                inline: &[],
            }
        );

        let bigger = parse_one(&[0x20, 0xFF, 0x00, 0x00]);
        assert_eq!(
            bigger.body,
            PacketBody::Match {
                shape: MatchShape::Bigger,
                distance: 1,
                length: 288,
                inline: &[],
            }
        );
    }

    #[test]
    fn parse_far_match() {
        let packet = parse_one(&[0x19, 0x04, 0x00]);
        assert_eq!(
            packet.body,
            PacketBody::Match {
                shape: MatchShape::Far,
                distance: 0x4000 + 0x4000 + 1,
                length: 3,
                inline: &[],
            }
        );
    }

    #[test]
    fn parse_pad_skips_to_realignment() {
        let mut stream = vec![0u8; 0x1010 + 1];
        stream[..3].copy_from_slice(b"WAD");
        let total = u32::try_from(stream.len()).unwrap();
        stream[3..7].copy_from_slice(&total.to_le_bytes());
        stream[0x10..0x13].copy_from_slice(&PAD_PACKET);
        for byte in &mut stream[0x13..0x1010] {
            *byte = PAD_FILL_BYTE;
        }
        stream[0x1010] = 0x40;
        stream.push(0x00);
        let total = u32::try_from(stream.len()).unwrap();
        stream[3..7].copy_from_slice(&total.to_le_bytes());

        let mut reader = PacketReader::new(&stream, &Limits::default()).unwrap();
        let pad = reader.next_packet().unwrap().unwrap();
        assert_eq!(pad.offset, 0x10);
        assert_eq!(pad.len, 3);
        assert_eq!(pad.body, PacketBody::Pad { skipped: 0x1010 - 0x13 });
        let next = reader.next_packet().unwrap().unwrap();
        assert_eq!(next.offset, 0x1010);
        assert!(reader.next_packet().unwrap().is_none());
    }

    #[test]
    fn adjacent_literals_rejected() {
        let bytes = [0x01, 1, 2, 3, 4, 0x01, 5, 6, 7, 8];
        let mut reader = PacketReader::for_packets(&bytes);
        assert!(reader.next_packet().unwrap().is_some());
        assert_eq!(
            reader.next_packet().unwrap_err(),
            DecodeError::AdjacentLiterals { offset: 5 }
        );
    }

    #[test]
    fn literal_after_filler_allowed() {
        let bytes = [0x01, 1, 2, 3, 4, 0x11, 0x00, 0x00, 0x01, 5, 6, 7, 8];
        let packets: Vec<_> = PacketReader::for_packets(&bytes)
            .collect::<WireResult<_>>()
            .unwrap();
        assert_eq!(packets.len(), 3);
    }

    #[test]
    fn truncated_literal_rejected() {
        let bytes = [0x05, 1, 2];
        let err = PacketReader::for_packets(&bytes).next_packet().unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { offset: 1, .. }));
    }

    #[test]
    fn truncated_inline_rejected() {
        let bytes = [0x11, 0x03, 0x00, 0xAA];
        let err = PacketReader::for_packets(&bytes).next_packet().unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn iterator_stops_after_error() {
        let bytes = [0x05, 1, 2];
        let mut reader = PacketReader::for_packets(&bytes);
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_rejects_oversized_stream() {
        let mut stream = vec![0u8; 32];
        stream[..3].copy_from_slice(b"WAD");
        stream[3] = 32;
        let limits = Limits { max_stream_bytes: 16 };
        assert!(matches!(
            PacketReader::new(&stream, &limits),
            Err(DecodeError::LimitsExceeded {
                kind: LimitKind::StreamBytes,
                ..
            })
        ));
    }

    #[test]
    fn write_literal_layouts() {
        let mut out = ByteWriter::new();
        write_literal_packet(&mut out, &[7; 4]).unwrap();
        assert_eq!(out.as_slice()[0], 0x01);

        let mut out = ByteWriter::new();
        write_literal_packet(&mut out, &[7; 18]).unwrap();
        assert_eq!(out.as_slice()[0], 0x0F);

        let mut out = ByteWriter::new();
        write_literal_packet(&mut out, &[7; 273]).unwrap();
        assert_eq!(&out.as_slice()[..2], &[0x00, 0xFF]);
        assert_eq!(out.len(), 275);
    }

    #[test]
    fn write_literal_out_of_range() {
        let mut out = ByteWriter::new();
        assert!(write_literal_packet(&mut out, &[0; 3]).is_err());
        assert!(write_literal_packet(&mut out, &[0; 274]).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn write_match_picks_narrowest_shape() {
        let mut out = ByteWriter::new();
        assert_eq!(write_match_packet(&mut out, 2048, 8).unwrap(), MatchShape::Little);
        assert_eq!(out.len(), 2);

        let mut out = ByteWriter::new();
        assert_eq!(write_match_packet(&mut out, 2049, 8).unwrap(), MatchShape::Big);
        assert_eq!(out.len(), 3);

        let mut out = ByteWriter::new();
        assert_eq!(write_match_packet(&mut out, 1, 9).unwrap(), MatchShape::Big);

        let mut out = ByteWriter::new();
        assert_eq!(write_match_packet(&mut out, 1, 34).unwrap(), MatchShape::Bigger);
        assert_eq!(out.as_slice(), &[0x20, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn write_match_out_of_range() {
        let mut out = ByteWriter::new();
        assert!(write_match_packet(&mut out, 0, 3).is_err());
        assert!(write_match_packet(&mut out, 16385, 3).is_err());
        assert!(write_match_packet(&mut out, 1, 2).is_err());
        assert!(write_match_packet(&mut out, 1, 289).is_err());
    }

    #[test]
    fn inline_literal_sets_slot_bits() {
        let mut out = ByteWriter::new();
        out.write_bytes(&FILLER_PACKET);
        write_inline_literal(&mut out, &[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(out.as_slice(), &[0x11, 0x03, 0x00, 0xAA, 0xBB, 0xCC]);

        let packet = parse_one(out.as_slice());
        assert_eq!(packet.inline_literal(), &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn inline_literal_needs_a_packet() {
        let mut out = ByteWriter::new();
        assert!(write_inline_literal(&mut out, &[1]).is_err());
        out.write_bytes(&FILLER_PACKET);
        assert!(write_inline_literal(&mut out, &[1, 2, 3, 4]).is_err());
    }

    #[test]
    fn window_offsets() {
        assert_eq!(window_offset(HEADER_SIZE), 0);
        assert_eq!(window_offset(0x2010), 0);
        assert_eq!(window_offset(0x200F), 0x1FFF);
        assert!(!needs_pad(0x10, 0x1FFD));
        assert!(needs_pad(0x10, 0x1FFE));
        assert!(needs_pad(0x200C, 4));
    }

    #[test]
    fn write_pad_reaches_next_window() {
        let mut out = ByteWriter::new();
        out.write_bytes(&vec![0u8; 0x1F00]);
        let fill = write_pad(&mut out);
        assert_eq!(out.len(), 0x2010);
        assert_eq!(fill, 0x2010 - 0x1F03);
        assert_eq!(&out.as_slice()[0x1F00..0x1F03], &PAD_PACKET);
    }
}

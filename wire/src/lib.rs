//! Stream framing and packet layout for the wadlz codec.
//!
//! This crate handles the binary format: the 16-byte stream header, the four
//! packet shapes, inline trailing literals and pad alignment. It does not
//! search for matches or reconstruct output, only the structure of packets.
//!
//! # Design Principles
//!
//! - **Loader-compatible format** - Layouts match what the target loader reads.
//! - **Bounded decoding** - Packets are validated against the declared stream end.
//! - **No compression policy** - Match finding and block scheduling live in `codec`.

mod error;
mod header;
mod limits;
mod packet;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use header::{
    decode_header, encode_header, is_wad_stream, patch_total_size, StreamHeader, HEADER_SIZE,
    MAGIC, TOTAL_SIZE_OFFSET, VERSION_TRAILER,
};
pub use limits::Limits;
pub use packet::{
    needs_pad, window_offset, write_inline_literal, write_literal_packet, write_match_packet,
    write_pad, FlagClass, MatchShape, Packet, PacketBody, PacketReader, ALIGNMENT_WINDOW,
    FAR_MATCH_BASE_DISTANCE, FILLER_PACKET, MAX_BIG_MATCH_LEN, MAX_FLAG_LITERAL_LEN,
    MAX_INLINE_LITERAL_LEN, MAX_LITERAL_LEN, MAX_LITTLE_MATCH_DISTANCE, MAX_LITTLE_MATCH_LEN,
    MAX_MATCH_DISTANCE, MAX_MATCH_LEN, MIN_FLAG_LITERAL_LEN, MIN_MATCH_LEN, PAD_FILL_BYTE,
    PAD_PACKET, PAD_RESUME_MODULUS, PAD_RESUME_REMAINDER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = MAGIC;
        let _ = HEADER_SIZE;
        let _ = StreamHeader::placeholder();
        let _ = Limits::default();
        let _ = FlagClass::of(0x11);
        let _ = MatchShape::Little;

        let _: WireResult<()> = Ok(());
    }

    #[test]
    fn pad_and_filler_share_short_class() {
        assert_eq!(FlagClass::of(FILLER_PACKET[0]), FlagClass::Short);
        assert_eq!(FlagClass::of(PAD_PACKET[0]), FlagClass::Short);
    }

    #[test]
    fn length_bounds_consistent() {
        assert_eq!(MAX_LITERAL_LEN, 0xFF + MAX_FLAG_LITERAL_LEN);
        assert_eq!(MAX_MATCH_LEN, 0xFF + MAX_BIG_MATCH_LEN);
        assert_eq!(MAX_MATCH_DISTANCE, 0x3F + 0xFF * 0x40 + 1);
        assert_eq!(MAX_LITTLE_MATCH_DISTANCE, 0xFF * 8 + 7 + 1);
    }

    #[test]
    fn resume_point_follows_header() {
        assert_eq!(PAD_RESUME_REMAINDER, HEADER_SIZE);
        assert_eq!(ALIGNMENT_WINDOW % PAD_RESUME_MODULUS, 0);
    }
}

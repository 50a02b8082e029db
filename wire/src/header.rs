//! Stream header types and constants.

use bytestream::ByteWriter;

use crate::error::{DecodeError, EncodeError, WireResult};

/// Magic tag identifying compressed streams.
///
/// This value is fixed by the target hardware loader and must never change.
pub const MAGIC: [u8; 3] = *b"WAD";

/// Byte offset of the little-endian `total_size` field.
pub const TOTAL_SIZE_OFFSET: usize = 3;

/// Format-version trailer written by encoders. Decoders do not check it.
pub const VERSION_TRAILER: [u8; 9] = *b"WRENCH010";

/// Header size in bytes (16 total).
pub const HEADER_SIZE: usize = 3 + 4 + 9;

/// Decoded stream header.
///
/// The magic tag is validated during decoding and is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamHeader {
    /// Exact byte length of the stream, header included.
    pub total_size: u32,
}

impl StreamHeader {
    /// Creates a header declaring `total_size` bytes.
    #[must_use]
    pub const fn new(total_size: u32) -> Self {
        Self { total_size }
    }

    /// Header written before the stream length is known.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self { total_size: 0 }
    }

    /// Returns the declared stream length.
    #[must_use]
    pub const fn stream_len(self) -> usize {
        self.total_size as usize
    }

    /// Checks that the declared length covers the header and fits a buffer
    /// of `available` bytes.
    pub fn validate_len(self, available: usize) -> WireResult<()> {
        let declared = self.stream_len();
        if declared < HEADER_SIZE || declared > available {
            return Err(DecodeError::DeclaredSizeMismatch {
                declared: self.total_size,
                actual: available,
            });
        }
        Ok(())
    }
}

/// Returns `true` if `buf` starts with the stream magic tag.
#[must_use]
pub fn is_wad_stream(buf: &[u8]) -> bool {
    buf.len() >= MAGIC.len() && buf[..MAGIC.len()] == MAGIC
}

/// Decodes the stream header.
///
/// Only the header itself is checked; use [`StreamHeader::validate_len`] to
/// check the declared size against the buffer.
pub fn decode_header(buf: &[u8]) -> WireResult<StreamHeader> {
    if buf.len() < HEADER_SIZE {
        return Err(DecodeError::StreamTooSmall {
            actual: buf.len(),
            required: HEADER_SIZE,
        });
    }
    let mut found = [0u8; 3];
    found.copy_from_slice(&buf[..3]);
    if found != MAGIC {
        return Err(DecodeError::InvalidMagic { found });
    }
    let mut size = [0u8; 4];
    size.copy_from_slice(&buf[TOTAL_SIZE_OFFSET..TOTAL_SIZE_OFFSET + 4]);
    Ok(StreamHeader {
        total_size: u32::from_le_bytes(size),
    })
}

/// Encodes a stream header at the current writer position.
pub fn encode_header(header: StreamHeader, out: &mut ByteWriter) {
    out.write_bytes(&MAGIC);
    out.write_u32_le(header.total_size);
    out.write_bytes(&VERSION_TRAILER);
}

/// Patches `total_size` of a header written at offset 0 to the writer length.
pub fn patch_total_size(out: &mut ByteWriter) -> Result<u32, EncodeError> {
    let length = out.len();
    let total_size = u32::try_from(length).map_err(|_| EncodeError::StreamTooLarge { length })?;
    out.patch_u32_le(TOTAL_SIZE_OFFSET, total_size)?;
    Ok(total_size)
}

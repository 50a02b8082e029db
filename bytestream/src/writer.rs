//! Byte writer for building packet streams.

use crate::error::{ByteError, ByteResult};

/// An append-only byte writer backed by a growable buffer.
///
/// Besides appending, the writer supports the two in-place edits a packet
/// stream needs: patching a fixed-width field that was reserved earlier, and
/// OR-ing bits into a byte that has already been written.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes a byte slice.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32_le(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Overwrites four already-written bytes at `offset` with a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::OffsetOutOfRange`] if the field does not lie
    /// entirely inside the written bytes.
    pub fn patch_u32_le(&mut self, offset: usize, value: u32) -> ByteResult<()> {
        let end = offset.checked_add(4).ok_or(ByteError::OffsetOutOfRange {
            offset,
            len: self.bytes.len(),
        })?;
        if end > self.bytes.len() {
            return Err(ByteError::OffsetOutOfRange {
                offset,
                len: self.bytes.len(),
            });
        }
        self.bytes[offset..end].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// ORs `bits` into the already-written byte at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::OffsetOutOfRange`] if `offset` has not been written.
    pub fn or_byte(&mut self, offset: usize, bits: u8) -> ByteResult<()> {
        let len = self.bytes.len();
        let byte = self
            .bytes
            .get_mut(offset)
            .ok_or(ByteError::OffsetOutOfRange { offset, len })?;
        *byte |= bits;
        Ok(())
    }

    /// Appends `fill` until `len() % modulus == remainder`.
    ///
    /// Returns the number of fill bytes written.
    pub fn fill_to_alignment(&mut self, modulus: usize, remainder: usize, fill: u8) -> usize {
        debug_assert!(modulus > 0 && remainder < modulus);
        let mut written = 0;
        while self.bytes.len() % modulus != remainder {
            self.bytes.push(fill);
            written += 1;
        }
        written
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert_eq!(writer.len(), 0);
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_bytes_in_order() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xAB);
        writer.write_bytes(&[1, 2, 3]);
        writer.write_u32_le(0x1234_5678);
        assert_eq!(writer.len(), 8);
        assert_eq!(
            writer.finish(),
            vec![0xAB, 1, 2, 3, 0x78, 0x56, 0x34, 0x12]
        );
    }

    #[test]
    fn patch_u32_overwrites_reserved_field() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(b"WAD");
        writer.write_u32_le(0);
        writer.write_u8(0xFF);
        writer.patch_u32_le(3, 0x0000_0010).unwrap();
        assert_eq!(writer.as_slice(), &[b'W', b'A', b'D', 0x10, 0, 0, 0, 0xFF]);
    }

    #[test]
    fn patch_u32_out_of_range() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[0; 5]);
        let err = writer.patch_u32_le(2, 1).unwrap_err();
        assert!(matches!(
            err,
            ByteError::OffsetOutOfRange { offset: 2, len: 5 }
        ));
        assert!(writer.patch_u32_le(usize::MAX, 1).is_err());
    }

    #[test]
    fn or_byte_sets_low_bits() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[0x11, 0x00, 0x00]);
        writer.or_byte(1, 0b11).unwrap();
        assert_eq!(writer.as_slice(), &[0x11, 0x03, 0x00]);
    }

    #[test]
    fn or_byte_out_of_range() {
        let mut writer = ByteWriter::new();
        assert!(matches!(
            writer.or_byte(0, 1),
            Err(ByteError::OffsetOutOfRange { offset: 0, len: 0 })
        ));
    }

    #[test]
    fn fill_to_alignment_pads() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[0; 0x1FFD]);
        let written = writer.fill_to_alignment(0x2000, 0x10, 0xEE);
        assert_eq!(written, 0x13);
        assert_eq!(writer.len(), 0x2010);
        assert!(writer.as_slice()[0x1FFD..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn fill_to_alignment_noop_when_aligned() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[0; 0x10]);
        assert_eq!(writer.fill_to_alignment(0x2000, 0x10, 0xEE), 0);
        assert_eq!(writer.len(), 0x10);
    }

    #[test]
    fn finish_into_appends() {
        let mut writer = ByteWriter::with_capacity(4);
        writer.write_u8(0xAB);
        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xAB]);
    }

    #[test]
    fn writer_default() {
        let writer = ByteWriter::default();
        assert_eq!(writer.len(), 0);
    }
}

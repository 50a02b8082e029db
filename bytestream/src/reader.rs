//! Byte reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A byte reader over a bounded region of a buffer.
///
/// Positions are absolute offsets into the underlying buffer, so a reader
/// that starts past a header still reports offsets the way a hex dump of
/// the whole buffer would. All reads are bounds-checked against the region
/// end and return errors on failure; the reader never panics on malformed
/// input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over the whole slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
        }
    }

    /// Creates a reader over `data[start..end]` that reports absolute offsets.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::OffsetOutOfRange`] if `end` exceeds the buffer or
    /// `start` exceeds `end`.
    pub fn bounded(data: &'a [u8], start: usize, end: usize) -> ByteResult<Self> {
        if end > data.len() {
            return Err(ByteError::OffsetOutOfRange {
                offset: end,
                len: data.len(),
            });
        }
        if start > end {
            return Err(ByteError::OffsetOutOfRange { offset: start, len: end });
        }
        Ok(Self {
            data,
            pos: start,
            end,
        })
    }

    /// Returns the current absolute position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the absolute end of the readable region.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of bytes remaining in the region.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next byte without consuming it.
    #[must_use]
    pub fn peek_u8(&self) -> Option<u8> {
        if self.pos < self.end {
            Some(self.data[self.pos])
        } else {
            None
        }
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        self.ensure_bytes(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads `len` bytes as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> ByteResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        self.ensure_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Advances to the next absolute position `p >= position()` with
    /// `p % modulus == remainder`, clamped to the region end.
    ///
    /// Returns the number of bytes skipped.
    pub fn skip_to_alignment(&mut self, modulus: usize, remainder: usize) -> usize {
        debug_assert!(modulus > 0 && remainder < modulus);
        let start = self.pos;
        let misalign = (self.pos + modulus - remainder) % modulus;
        if misalign != 0 {
            self.pos += modulus - misalign;
        }
        self.pos = self.pos.min(self.end);
        self.pos - start
    }

    fn ensure_bytes(&self, len: usize) -> ByteResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(ByteError::UnexpectedEof {
                offset: self.pos,
                requested: len,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.peek_u8(), None);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(
            result,
            Err(ByteError::UnexpectedEof {
                offset: 0,
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn read_u32_little_endian() {
        let mut reader = ByteReader::new(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_bytes_borrows() {
        let data = [1, 2, 3, 4, 5];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_bytes(3).unwrap(), &[2, 3, 4]);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn read_bytes_past_end_fails_without_consuming() {
        let mut reader = ByteReader::new(&[1, 2]);
        let err = reader.read_bytes(3).unwrap_err();
        assert!(matches!(
            err,
            ByteError::UnexpectedEof {
                requested: 3,
                available: 2,
                ..
            }
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn bounded_reader_reports_absolute_offsets() {
        let data = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let mut reader = ByteReader::bounded(&data, 2, 5).unwrap();
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.read_u8().unwrap(), 2);
        assert_eq!(reader.read_bytes(2).unwrap(), &[3, 4]);
        let err = reader.read_u8().unwrap_err();
        assert!(matches!(err, ByteError::UnexpectedEof { offset: 5, .. }));
    }

    #[test]
    fn bounded_reader_rejects_bad_bounds() {
        let data = [0u8; 4];
        assert!(matches!(
            ByteReader::bounded(&data, 0, 5),
            Err(ByteError::OffsetOutOfRange { offset: 5, len: 4 })
        ));
        assert!(matches!(
            ByteReader::bounded(&data, 3, 2),
            Err(ByteError::OffsetOutOfRange { offset: 3, len: 2 })
        ));
    }

    #[test]
    fn skip_to_alignment_moves_forward() {
        let data = vec![0u8; 0x3000];
        let mut reader = ByteReader::bounded(&data, 0x20, data.len()).unwrap();
        let skipped = reader.skip_to_alignment(0x1000, 0x10);
        assert_eq!(reader.position(), 0x1010);
        assert_eq!(skipped, 0x1010 - 0x20);
    }

    #[test]
    fn skip_to_alignment_already_aligned() {
        let data = vec![0u8; 0x2000];
        let mut reader = ByteReader::bounded(&data, 0x1010, data.len()).unwrap();
        assert_eq!(reader.skip_to_alignment(0x1000, 0x10), 0);
        assert_eq!(reader.position(), 0x1010);
    }

    #[test]
    fn skip_to_alignment_clamps_to_end() {
        let data = vec![0u8; 0x100];
        let mut reader = ByteReader::bounded(&data, 0x13, data.len()).unwrap();
        reader.skip_to_alignment(0x1000, 0x10);
        assert_eq!(reader.position(), 0x100);
        assert!(reader.is_empty());
    }
}

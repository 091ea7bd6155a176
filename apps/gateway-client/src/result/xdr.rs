//! Bounds-checked reader for the gateway's binary result encoding.
//!
//! The format is fixed by the network and bit-exact: 4-byte big-endian
//! discriminants, 64-bit integers as two big-endian halves, variable-length
//! opaques length-prefixed and padded to 4-byte alignment. Every failure
//! names the field being read; nothing is ever defaulted.

use super::DecodeError;

pub(crate) struct XdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    pub(crate) const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                field: field.to_string(),
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn read_u32(&mut self, field: &str) -> Result<u32, DecodeError> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_i32(&mut self, field: &str) -> Result<i32, DecodeError> {
        self.read_u32(field).map(|v| v as i32)
    }

    pub(crate) fn read_u64(&mut self, field: &str) -> Result<u64, DecodeError> {
        let high = u64::from(self.read_u32(field)?);
        let low = u64::from(self.read_u32(field)?);
        Ok((high << 32) | low)
    }

    pub(crate) fn read_i64(&mut self, field: &str) -> Result<i64, DecodeError> {
        self.read_u64(field).map(|v| v as i64)
    }

    /// Read a fixed-width opaque value.
    pub(crate) fn read_fixed<const N: usize>(
        &mut self,
        field: &str,
    ) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read an array length and sanity-check it against the bytes left.
    ///
    /// A hostile or corrupted length prefix must not drive allocation, so the
    /// declared count is bounded by the smallest possible element size.
    pub(crate) fn read_array_len(
        &mut self,
        min_element_size: usize,
        field: &str,
    ) -> Result<usize, DecodeError> {
        let count = self.read_u32(field)? as usize;
        let needed = count.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(DecodeError::Truncated {
                field: field.to_string(),
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(count)
    }

    /// Reject buffers that continue past a structurally complete value.
    pub(crate) fn finish(self) -> Result<(), DecodeError> {
        if self.remaining() != 0 {
            return Err(DecodeError::TrailingBytes {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let buf = [0x00, 0x00, 0x00, 0x2A, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = XdrReader::new(&buf);
        assert_eq!(reader.read_u32("a").unwrap(), 42);
        assert_eq!(reader.read_i32("b").unwrap(), -1);
        reader.finish().unwrap();
    }

    #[test]
    fn reads_hyper_as_two_halves() {
        let buf = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
        let mut reader = XdrReader::new(&buf);
        assert_eq!(reader.read_u64("v").unwrap(), (1u64 << 32) | 2);
    }

    #[test]
    fn truncated_read_names_the_field() {
        let buf = [0x00, 0x00];
        let mut reader = XdrReader::new(&buf);
        let err = reader.read_u32("feeCharged").unwrap_err();
        match err {
            DecodeError::Truncated { field, .. } => assert_eq!(field, "feeCharged"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn array_len_rejects_counts_beyond_buffer() {
        // Declares 1000 elements with only 4 bytes left.
        let buf = [0x00, 0x00, 0x03, 0xE8, 0x00, 0x00, 0x00, 0x00];
        let mut reader = XdrReader::new(&buf);
        assert!(reader.read_array_len(4, "results").is_err());
    }

    #[test]
    fn finish_rejects_trailing_bytes() {
        let buf = [0x00, 0x00, 0x00, 0x00, 0xAA];
        let mut reader = XdrReader::new(&buf);
        reader.read_u32("v").unwrap();
        assert!(matches!(
            reader.finish(),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        ));
    }
}

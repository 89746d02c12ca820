use bytes::{Buf, Bytes};

use crate::error::TwkbError;

/// Forward-only reader over a [`Buf`] that keeps track of the absolute byte offset for error reporting.
#[derive(Debug)]
pub(crate) struct InputBuffer<B> {
    inner: B,
    base: usize,
    len: usize,
}

impl<B: Buf> InputBuffer<B> {
    pub fn new(inner: B) -> Self {
        Self::with_base(inner, 0)
    }

    fn with_base(inner: B, base: usize) -> Self {
        let len = inner.remaining();
        Self { inner, base, len }
    }

    /// Absolute offset of the next byte.
    pub fn offset(&self) -> usize {
        self.base + self.consumed()
    }

    /// Bytes read from this buffer so far.
    pub fn consumed(&self) -> usize {
        self.len - self.inner.remaining()
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn has_remaining(&self) -> bool {
        self.inner.has_remaining()
    }

    pub fn read_u8(&mut self) -> Result<u8, TwkbError> {
        if !self.inner.has_remaining() {
            return Err(TwkbError::UnexpectedEnd {
                offset: self.offset(),
            });
        }

        Ok(self.inner.get_u8())
    }

    /// Reads an unsigned LEB128 integer.
    pub fn read_var_uint(&mut self) -> Result<u64, TwkbError> {
        let start = self.offset();
        let mut value = 0u64;
        let mut shift = 0u32;

        loop {
            let byte = self.read_u8()?;
            let bits = u64::from(byte & 0x7f);
            if shift == 63 && bits > 1 || shift > 63 {
                return Err(TwkbError::VarIntOverflow { offset: start });
            }

            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }

            shift += 7;
        }
    }

    /// Reads a zigzag encoded signed LEB128 integer.
    pub fn read_var_int(&mut self) -> Result<i64, TwkbError> {
        self.read_var_uint().map(zigzag_decode)
    }

    /// Reads a count of elements, each of which takes at least `min_element_size` bytes.
    pub fn read_count(&mut self, min_element_size: usize) -> Result<usize, TwkbError> {
        let count = self.read_var_uint()?;
        let remaining = self.remaining();
        let fits = usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(min_element_size))
            .is_some_and(|needed| needed <= remaining);

        if !fits {
            return Err(TwkbError::TooManyElements { count, remaining });
        }

        // `fits` guarantees the conversion succeeds.
        Ok(count as usize)
    }

    /// Takes the next `size` bytes as a separate buffer.
    pub fn split_to(&mut self, size: u64) -> Result<InputBuffer<Bytes>, TwkbError> {
        let remaining = self.remaining();
        let size = match usize::try_from(size) {
            Ok(size) if size <= remaining => size,
            _ => {
                return Err(TwkbError::UnexpectedEnd {
                    offset: self.offset() + remaining,
                })
            }
        };

        let base = self.offset();
        Ok(InputBuffer::with_base(self.inner.copy_to_bytes(size), base))
    }
}

/// Maps an unsigned integer back to the signed one it was zigzag-encoded from.
pub(crate) fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn buffer(bytes: &'static [u8]) -> InputBuffer<&'static [u8]> {
        InputBuffer::new(bytes)
    }

    #[test]
    fn zigzag() {
        assert_eq!(zigzag_decode(0), 0);
        assert_eq!(zigzag_decode(1), -1);
        assert_eq!(zigzag_decode(2), 1);
        assert_eq!(zigzag_decode(3), -2);
        assert_eq!(zigzag_decode(4000), 2000);
        assert_eq!(zigzag_decode(u64::MAX), i64::MIN);
        assert_eq!(zigzag_decode(u64::MAX - 1), i64::MAX);
    }

    #[test]
    fn var_uint() {
        let mut buf = buffer(&[0x00, 0x7f, 0x80, 0x01, 0xac, 0x02]);
        assert_eq!(buf.read_var_uint(), Ok(0));
        assert_eq!(buf.read_var_uint(), Ok(127));
        assert_eq!(buf.read_var_uint(), Ok(128));
        assert_eq!(buf.read_var_uint(), Ok(300));
        assert!(!buf.has_remaining());
        assert_eq!(buf.offset(), 6);
    }

    #[test]
    fn var_int() {
        let mut buf = buffer(&[0xbf, 0xef, 0xe2, 0x43, 0xfc, 0x8b, 0xaa, 0x28]);
        assert_eq!(buf.read_var_int(), Ok(-71064544));
        assert_eq!(buf.read_var_int(), Ok(42287870));
    }

    #[test]
    fn max_var_uint() {
        let mut buf = buffer(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]);
        assert_eq!(buf.read_var_uint(), Ok(u64::MAX));
    }

    #[test]
    fn var_uint_overflow() {
        let mut buf = buffer(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02]);
        assert_matches!(
            buf.read_var_uint(),
            Err(TwkbError::VarIntOverflow { offset: 0 })
        );

        let mut buf = buffer(&[0x80; 11]);
        assert_matches!(
            buf.read_var_uint(),
            Err(TwkbError::VarIntOverflow { offset: 0 })
        );
    }

    #[test]
    fn truncated_var_int() {
        let mut buf = buffer(&[0x01, 0x80, 0x80]);
        assert_eq!(buf.read_var_int(), Ok(-1));
        assert_matches!(
            buf.read_var_int(),
            Err(TwkbError::UnexpectedEnd { offset: 3 })
        );
    }

    #[test]
    fn count_must_fit() {
        let mut buf = buffer(&[0x02, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(buf.read_count(2), Ok(2));

        let mut buf = buffer(&[0x03, 0x00, 0x00, 0x00, 0x00]);
        assert_matches!(
            buf.read_count(2),
            Err(TwkbError::TooManyElements {
                count: 3,
                remaining: 4
            })
        );

        let mut buf = buffer(&[0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert_matches!(buf.read_count(1), Err(TwkbError::TooManyElements { .. }));
    }

    #[test]
    fn split_keeps_offsets() {
        let mut buf = buffer(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(buf.read_u8(), Ok(1));

        let mut sub = buf.split_to(2).unwrap();
        assert_eq!(buf.offset(), 3);
        assert_eq!(sub.offset(), 1);
        assert_eq!(sub.read_u8(), Ok(2));
        assert_eq!(sub.read_u8(), Ok(3));
        assert_matches!(sub.read_u8(), Err(TwkbError::UnexpectedEnd { offset: 3 }));
        assert_eq!(sub.consumed(), 2);

        assert_matches!(buf.split_to(2), Err(TwkbError::UnexpectedEnd { offset: 4 }));
    }
}

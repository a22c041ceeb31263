//! BitReader: reads a packed hufvault body one bit at a time.
//!
//! Works on a fully materialized slice. Bits come out most significant first.
//!

use crate::error::CorruptError;

const BIT_MASK: u8 = 0xff;

/// Reads bits from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Bits not yet read.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() - self.cursor) * 8 - self.bit_index
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.cursor >= self.buffer.len() {
            return None;
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<usize> of the next n bits, or None if fewer than n bits are left.
    /// Nothing is consumed when the read fails.
    pub fn bint(&mut self, n: usize) -> Option<usize> {
        if n > self.remaining() || n > usize::BITS as usize {
            return None;
        }
        // Take whole bytes when we are aligned, single bits otherwise.
        let mut result = 0_usize;
        let mut left = n;
        while left > 0 {
            if self.bit_index == 0 && left >= 8 {
                result = result << 8 | self.buffer[self.cursor] as usize;
                self.cursor += 1;
                left -= 8;
            } else {
                result = result << 1 | self.bit()?;
                left -= 1;
            }
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Reads the padding count that starts every non-empty body and returns how many payload
    /// bits follow it once the trailing padding is excluded.
    ///
    /// A padding count of zero removes nothing.
    pub fn strip_padding(&mut self) -> Result<usize, CorruptError> {
        let padding = self.byte().ok_or(CorruptError::PaddingOverrun {
            padding: 0,
            available: self.remaining(),
        })?;
        if padding > 7 {
            return Err(CorruptError::InvalidPadding(padding));
        }
        let available = self.remaining();
        if padding as usize > available {
            return Err(CorruptError::PaddingOverrun { padding, available });
        }
        Ok(available - padding as usize)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

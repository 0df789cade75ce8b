//! Forward-only byte reader.

use crate::error::{CodecError, CodecResult};

/// A forward-only cursor over an immutable byte slice.
///
/// Reads return borrowed views into the underlying slice; nothing is copied.
/// There is no backward seek. Cloning a reader yields an independent cursor
/// at the same position.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `buf`.
    #[inline]
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read the next byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Exhausted`] if no bytes remain.
    #[inline]
    pub fn read_byte(&mut self) -> CodecResult<u8> {
        match self.buf.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(self.exhausted(1)),
        }
    }

    /// Read the next `n` bytes as a borrowed slice.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Exhausted`] if fewer than `n` bytes remain. The
    /// reader does not advance in that case.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if self.remaining_len() < n {
            return Err(self.exhausted(n));
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read exactly `N` bytes into an array.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Exhausted`] if fewer than `N` bytes remain.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Return the next byte without consuming it.
    #[inline]
    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Number of unread bytes.
    #[inline]
    #[must_use]
    pub const fn remaining_len(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns `true` if every byte has been read.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining_len() == 0
    }

    /// Offset of the next byte to be read.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the input.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn exhausted(&self, needed: usize) -> CodecError {
        CodecError::Exhausted { position: self.pos, needed, remaining: self.remaining_len() }
    }
}

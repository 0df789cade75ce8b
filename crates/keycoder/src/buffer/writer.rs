//! Append-only byte writer.

use tracing::trace;

use crate::error::{CodecError, CodecResult};

/// A growable, append-only byte buffer.
///
/// Single bytes are appended with amortized O(1) cost by doubling the capacity
/// when the buffer is full; runs of bytes grow the buffer to fit in a single
/// reservation. Allocation failures are reported as
/// [`CodecError::OutOfMemory`] rather than aborting.
///
/// There is no way to undo an append. If an encode fails part-way, drop the
/// writer instead of finalizing it.
///
/// # Example
///
/// ```
/// use keycoder::buffer::Writer;
///
/// let mut writer = Writer::with_capacity(0).unwrap();
/// writer.append_byte(21).unwrap();
/// writer.append_bytes(&[1, 42]).unwrap();
/// assert_eq!(&*writer.finalize(), &[21, 1, 42]);
/// ```
#[derive(Debug)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Smallest capacity a new writer is created with.
    pub const MIN_CAPACITY: usize = 20;

    /// Create a writer able to hold at least `capacity_hint` bytes.
    ///
    /// Hints below [`Writer::MIN_CAPACITY`] are raised to it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfMemory`] if the allocation fails.
    pub fn with_capacity(capacity_hint: usize) -> CodecResult<Self> {
        let capacity = capacity_hint.max(Self::MIN_CAPACITY);
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| CodecError::OutOfMemory { requested: capacity })?;
        Ok(Self { buf })
    }

    /// Append a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfMemory`] if the buffer cannot grow.
    #[inline]
    pub fn append_byte(&mut self, byte: u8) -> CodecResult<()> {
        if self.buf.len() == self.buf.capacity() {
            self.grow(self.buf.capacity().max(Self::MIN_CAPACITY))?;
        }
        self.buf.push(byte);
        Ok(())
    }

    /// Append a run of bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OutOfMemory`] if the buffer cannot grow.
    pub fn append_bytes(&mut self, data: &[u8]) -> CodecResult<()> {
        if self.buf.capacity() - self.buf.len() < data.len() {
            self.grow(data.len())?;
        }
        self.buf.extend_from_slice(data);
        Ok(())
    }

    /// Number of bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current allocated capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The bytes written so far.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Truncate the buffer to its logical length and return it.
    ///
    /// The writer is consumed.
    #[must_use]
    pub fn finalize(self) -> Box<[u8]> {
        self.buf.into_boxed_slice()
    }

    /// Reserve room for `additional` more bytes past the current length.
    fn grow(&mut self, additional: usize) -> CodecResult<()> {
        let before = self.buf.capacity();
        self.buf
            .try_reserve_exact(additional)
            .map_err(|_| CodecError::OutOfMemory { requested: additional })?;
        trace!(from = before, to = self.buf.capacity(), "grew writer buffer");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn small_hint_is_raised_to_minimum() {
        let writer = Writer::with_capacity(1).unwrap();
        assert!(writer.capacity() >= Writer::MIN_CAPACITY);
        assert!(writer.is_empty());
    }

    #[test]
    fn append_byte_doubles_capacity() {
        let mut writer = Writer::with_capacity(0).unwrap();
        let initial = writer.capacity();
        for i in 0..initial {
            writer.append_byte(i as u8).unwrap();
        }
        assert_eq!(writer.capacity(), initial);

        writer.append_byte(0xff).unwrap();
        assert!(writer.capacity() >= initial * 2);
        assert_eq!(writer.len(), initial + 1);
    }

    #[test]
    fn append_bytes_grows_in_one_step() {
        let mut writer = Writer::with_capacity(0).unwrap();
        let data = vec![7u8; 1000];
        writer.append_bytes(&data).unwrap();
        assert_eq!(writer.len(), 1000);
        assert!(writer.capacity() >= 1000);
        assert_eq!(writer.as_slice(), data.as_slice());
    }

    #[test]
    fn finalize_truncates_to_length() {
        let mut writer = Writer::with_capacity(256).unwrap();
        writer.append_bytes(b"abc").unwrap();
        writer.append_byte(b'd').unwrap();
        let bytes = writer.finalize();
        assert_eq!(&*bytes, b"abcd");
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn empty_writer_finalizes_to_empty() {
        let writer = Writer::with_capacity(0).unwrap();
        assert!(writer.finalize().is_empty());
    }
}

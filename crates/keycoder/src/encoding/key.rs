//! Encoding of [`Key`]s.
//!
//! A key is the concatenation of its elements, each followed by a
//! [`Tag::Separator`] byte:
//!
//! ```text
//! element 1 | 0x66 | element 2 | 0x66 | ... | element N | 0x66
//! ```
//!
//! Encoding `(a)` is therefore a byte prefix of encoding `(a, b)` and sorts
//! first. A top-level key ends where its buffer ends. A nested key is closed by
//! [`NESTED_KEY_END`] instead, which is below every tag, so the same prefix
//! rule holds inside nested keys.
//!
//! # Example
//!
//! ```
//! use keycoder::encoding::{pack_key, unpack_key};
//! use keycoder::Key;
//!
//! let short = Key::new().with(1);
//! let long = Key::new().with(1).with(0);
//!
//! let a = pack_key(&short).unwrap();
//! let b = pack_key(&long).unwrap();
//! assert!(b.starts_with(&a));
//! assert!(a < b);
//! assert_eq!(unpack_key(&b).unwrap(), long);
//! ```

use std::iter::FusedIterator;

use tracing::debug;

use super::element::{read_element, write_element};
use super::NESTED_KEY_END;
use crate::buffer::{Reader, Writer};
use crate::config::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_DEPTH};
use crate::encoding::Tag;
use crate::error::{CodecError, CodecResult, Corruption};
use crate::types::{Element, Key};

/// Append the encoding of the element sequence to `writer`.
///
/// # Errors
///
/// - [`CodecError::OutOfMemory`] if the writer cannot grow.
/// - [`CodecError::UnsupportedType`] if nested keys are too deep.
///
/// On error the writer holds a partial encoding and should be discarded.
pub fn encode_key(writer: &mut Writer, elements: &[Element]) -> CodecResult<()> {
    write_elements(writer, elements, 0, DEFAULT_MAX_DEPTH)
}

/// Decode the elements remaining in `reader` lazily.
///
/// The returned decoder reads one element per step and can be restarted with
/// [`KeyDecoder::rewind`].
#[must_use]
pub fn decode_key(reader: Reader<'_>) -> KeyDecoder<'_> {
    KeyDecoder::new(reader)
}

/// Encode `key` into a new byte vector.
///
/// # Errors
///
/// Same as [`encode_key`].
pub fn pack_key(key: &Key) -> CodecResult<Vec<u8>> {
    encode_key_with_prefix(&[], key)
}

/// Decode a buffer holding exactly one key.
///
/// # Errors
///
/// - [`CodecError::Exhausted`] if the input ends inside an element.
/// - [`CodecError::CorruptEncoding`] if the bytes are not a valid key.
pub fn unpack_key(bytes: &[u8]) -> CodecResult<Key> {
    decode_key(Reader::new(bytes)).collect()
}

/// Encode `key` after a raw byte `prefix`, such as a collection identifier.
///
/// # Errors
///
/// Same as [`encode_key`].
pub fn encode_key_with_prefix(prefix: &[u8], key: &Key) -> CodecResult<Vec<u8>> {
    let mut writer = Writer::with_capacity(prefix.len() + DEFAULT_INITIAL_CAPACITY)?;
    writer.append_bytes(prefix)?;
    encode_key(&mut writer, key.as_slice())?;
    Ok(writer.finalize().into_vec())
}

/// Decode a key written by [`encode_key_with_prefix`].
///
/// Returns `Ok(None)` if `bytes` does not start with `prefix`. Error positions
/// count from the start of `bytes`, prefix included.
///
/// # Errors
///
/// Same as [`unpack_key`].
pub fn decode_key_with_prefix(prefix: &[u8], bytes: &[u8]) -> CodecResult<Option<Key>> {
    if !bytes.starts_with(prefix) {
        return Ok(None);
    }
    let mut reader = Reader::new(bytes);
    reader.read_bytes(prefix.len())?;
    decode_key(reader).collect::<CodecResult<Key>>().map(Some)
}

/// Smallest byte string greater than every string starting with `prefix`.
///
/// Returns `None` when no such bound exists, i.e. when `prefix` is empty or
/// consists only of `0xFF` bytes.
///
/// # Example
///
/// ```
/// use keycoder::encoding::increment_prefix;
///
/// assert_eq!(increment_prefix(&[0x01, 0x02]), Some(vec![0x01, 0x03]));
/// assert_eq!(increment_prefix(&[0x01, 0xFF]), Some(vec![0x02]));
/// assert_eq!(increment_prefix(&[0xFF]), None);
/// ```
#[must_use]
pub fn increment_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
    let last = prefix.iter().rposition(|&b| b != 0xff)?;
    let mut end = prefix[..=last].to_vec();
    end[last] += 1;
    Some(end)
}

/// Write each element followed by a separator, inside a key nested `depth`
/// levels deep.
pub(crate) fn write_elements(
    writer: &mut Writer,
    elements: &[Element],
    depth: usize,
    max_depth: usize,
) -> CodecResult<()> {
    for element in elements {
        write_element(writer, element, depth, max_depth)?;
        writer.append_byte(Tag::Separator.as_u8())?;
    }
    Ok(())
}

/// Read the elements of a nested key up to and including its terminator.
pub(crate) fn read_nested(
    reader: &mut Reader<'_>,
    depth: usize,
    max_depth: usize,
) -> CodecResult<Key> {
    let mut key = Key::new();
    loop {
        if reader.peek_byte() == Some(NESTED_KEY_END) {
            reader.read_byte()?;
            return Ok(key);
        }
        key.push(read_element(reader, depth, max_depth)?);
        expect_separator(reader)?;
    }
}

fn expect_separator(reader: &mut Reader<'_>) -> CodecResult<()> {
    let position = reader.position();
    match reader.read_byte()? {
        byte if byte == Tag::Separator.as_u8() => Ok(()),
        other => Err(CodecError::corrupt(position, Corruption::MissingSeparator(other))),
    }
}

/// Lazy decoder over the elements of an encoded key.
///
/// Yields one `Ok(element)` per element until the input is exhausted. After the
/// first `Err` the decoder is finished and yields `None`. Cloning a decoder, or
/// calling [`rewind`](Self::rewind), restarts decoding independently of the
/// original.
///
/// # Example
///
/// ```
/// use keycoder::buffer::Reader;
/// use keycoder::encoding::{decode_key, pack_key};
/// use keycoder::{Element, Key};
///
/// let bytes = pack_key(&Key::new().with("a").with(2)).unwrap();
/// let mut decoder = decode_key(Reader::new(&bytes));
///
/// assert_eq!(decoder.next().unwrap().unwrap(), Element::from("a"));
/// decoder.rewind();
/// let all: Vec<Element> = decoder.collect::<Result<_, _>>().unwrap();
/// assert_eq!(all.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct KeyDecoder<'a> {
    start: Reader<'a>,
    reader: Reader<'a>,
    max_depth: usize,
    failed: bool,
}

impl<'a> KeyDecoder<'a> {
    /// Decode from the current position of `reader` with the default depth
    /// limit.
    #[must_use]
    pub fn new(reader: Reader<'a>) -> Self {
        Self::with_max_depth(reader, DEFAULT_MAX_DEPTH)
    }

    /// Decode from the current position of `reader`, rejecting nested keys
    /// deeper than `max_depth`.
    #[must_use]
    pub fn with_max_depth(reader: Reader<'a>, max_depth: usize) -> Self {
        Self { start: reader.clone(), reader, max_depth, failed: false }
    }

    /// Restart decoding from the first element.
    pub fn rewind(&mut self) {
        self.reader = self.start.clone();
        self.failed = false;
    }

    /// Current position in the underlying buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Bytes not yet decoded.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.reader.remaining()
    }

    fn next_element(&mut self) -> CodecResult<Element> {
        let element = read_element(&mut self.reader, 0, self.max_depth)?;
        expect_separator(&mut self.reader)?;
        Ok(element)
    }
}

impl Iterator for KeyDecoder<'_> {
    type Item = CodecResult<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        match self.next_element() {
            Ok(element) => Some(Ok(element)),
            Err(error) => {
                self.failed = true;
                debug!(position = self.reader.position(), %error, "key decoding stopped");
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for KeyDecoder<'_> {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn pack(key: &Key) -> Vec<u8> {
        pack_key(key).unwrap()
    }

    // ========================================================================
    // Layout and round-trips
    // ========================================================================

    #[test]
    fn empty_key_is_empty_bytes() {
        assert!(pack(&Key::new()).is_empty());
        assert_eq!(unpack_key(&[]).unwrap(), Key::new());
    }

    #[test]
    fn single_null_layout() {
        let key = Key::new().with(Element::Null);
        assert_eq!(pack(&key), vec![15, 102]);
        assert_eq!(unpack_key(&[15, 102]).unwrap(), key);
    }

    #[test]
    fn blob_containing_separator_byte() {
        let key = Key::new().with(vec![102u8, 102, 0]).with("tail").with(vec![102u8]);
        assert_eq!(unpack_key(&pack(&key)).unwrap(), key);
    }

    #[test]
    fn nested_three_levels() {
        let innermost = Key::new().with(-1).with(Uuid::nil());
        let middle = Key::new().with(innermost).with(Key::new()).with("m");
        let outer = Key::new().with(middle).with(false);
        let key = Key::new().with(outer).with(Element::Null);
        assert_eq!(key.depth(), 3);
        assert_eq!(unpack_key(&pack(&key)).unwrap(), key);
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    #[test]
    fn scenario_ordering() {
        let ordered = vec![
            Key::new().with(-6).with("zz"),
            Key::new().with(-5).with("ab"),
            Key::new().with(-5).with("ac"),
            Key::new().with(1),
            Key::new().with(1).with(0),
            Key::new().with(false),
            Key::new().with(true),
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pack(&pair[0]) < pack(&pair[1]), "{} should encode below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn nested_prefix_sorts_first() {
        let short = Key::new().with(Key::new().with(1)).with(9);
        let long = Key::new().with(Key::new().with(1).with(Element::Null)).with(0);
        assert!(short < long);
        assert!(pack(&short) < pack(&long));
    }

    #[test]
    fn prefix_law() {
        let base = Key::new().with("a").with(7);
        for extra in [Element::Null, Element::from(-1), Element::from(Key::new())] {
            let extended = base.clone().with(extra);
            let (a, b) = (pack(&base), pack(&extended));
            assert!(b.starts_with(&a));
            assert!(a < b);
        }
    }

    // ========================================================================
    // Corruption
    // ========================================================================

    #[test]
    fn missing_separator() {
        let err = unpack_key(&[15, 15]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::CorruptEncoding { position: 1, reason: Corruption::MissingSeparator(15) }
        ));
    }

    #[test]
    fn truncation_never_yields_wrong_data() {
        let key = Key::new().with(300).with("hello").with(Key::new().with(true)).with(Element::Null);
        let bytes = pack(&key);
        for cut in 0..bytes.len() {
            match unpack_key(&bytes[..cut]) {
                Ok(decoded) => {
                    assert!(decoded.len() < key.len(), "cut at {cut}");
                    assert!(decoded.is_prefix_of(&key), "cut at {cut}");
                    assert!(cut == 0 || bytes[cut - 1] == Tag::Separator.as_u8());
                }
                Err(err) => assert!(err.is_decode_error(), "cut at {cut}: {err}"),
            }
        }
    }

    #[test]
    fn unknown_tag_inside_nested_key_is_wrapped() {
        let err = unpack_key(&[95, 7, 102, 0, 102]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::CorruptEncoding { position: 0, reason: Corruption::Nested(_) }
        ));
    }

    // ========================================================================
    // KeyDecoder
    // ========================================================================

    #[test]
    fn decoder_is_lazy_and_fuses_after_error() {
        let mut bytes = pack(&Key::new().with(1).with(2));
        bytes.push(0x01);
        let mut decoder = decode_key(Reader::new(&bytes));
        assert_eq!(decoder.next().unwrap().unwrap(), Element::from(1));
        assert_eq!(decoder.next().unwrap().unwrap(), Element::from(2));
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn decoder_rewinds_and_clones() {
        let bytes = pack(&Key::new().with("x").with("y"));
        let mut decoder = decode_key(Reader::new(&bytes));
        decoder.next();
        let snapshot = decoder.clone();
        assert_eq!(decoder.by_ref().count(), 1);
        assert_eq!(snapshot.count(), 1);

        decoder.rewind();
        assert_eq!(decoder.position(), 0);
        let key: Key = decoder.collect::<CodecResult<_>>().unwrap();
        assert_eq!(key, Key::new().with("x").with("y"));
    }

    #[test]
    fn decoder_starts_at_reader_position() {
        let bytes = pack(&Key::new().with(5).with(6));
        let mut reader = Reader::new(&bytes);
        reader.read_bytes(4).unwrap();
        let mut decoder = decode_key(reader);
        assert_eq!(decoder.next().unwrap().unwrap(), Element::from(6));
        decoder.rewind();
        assert_eq!(decoder.position(), 4);
        assert_eq!(decoder.remaining().len(), 4);
    }

    // ========================================================================
    // Prefixes
    // ========================================================================

    #[test]
    fn prefixed_roundtrip() {
        let key = Key::new().with("k").with(1);
        let bytes = encode_key_with_prefix(b"\x01\x02", &key).unwrap();
        assert!(bytes.starts_with(b"\x01\x02"));
        assert_eq!(decode_key_with_prefix(b"\x01\x02", &bytes).unwrap(), Some(key));
        assert_eq!(decode_key_with_prefix(b"\x01\x03", &bytes).unwrap(), None);
    }

    #[test]
    fn prefixed_error_positions_include_prefix() {
        let err = decode_key_with_prefix(b"pp", b"pp\x0f\x0f").unwrap_err();
        assert!(matches!(err, CodecError::CorruptEncoding { position: 3, .. }));
    }

    #[test]
    fn increment_prefix_bounds() {
        assert_eq!(increment_prefix(&[0x00]), Some(vec![0x01]));
        assert_eq!(increment_prefix(&[0x01, 0xFF, 0xFF]), Some(vec![0x02]));
        assert_eq!(increment_prefix(&[0xFF, 0xFF]), None);
        assert_eq!(increment_prefix(&[]), None);

        let bytes = pack(&Key::new().with("a"));
        let end = increment_prefix(&bytes).unwrap();
        let extended = pack(&Key::new().with("a").with(u64::MAX));
        assert!(bytes < extended && extended < end);
    }
}

//! The codec as a table of entry points.
//!
//! Components that need to build or read keys (index maintenance, storage
//! adapters, language bindings) receive a [`CodecApi`] implementation when they
//! are constructed and drive the codec through it, sharing buffers with it
//! instead of going through intermediate copies.
//!
//! [`KeyCoder`] is the implementation provided by this crate.

use tracing::debug;

use crate::buffer::{Reader, Writer};
use crate::config::CodecConfig;
use crate::encoding::element::{read_element, write_element};
use crate::encoding::key::write_elements;
use crate::encoding::KeyDecoder;
use crate::error::CodecResult;
use crate::types::{Element, Key};

/// Entry points of a key codec.
///
/// The writer and reader entry points expose the same buffer types the codec
/// uses internally, so a caller can interleave its own bytes with encoded
/// elements and keys.
pub trait CodecApi {
    /// Create a writer with room for at least `capacity_hint` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation fails.
    fn writer_init(&self, capacity_hint: usize) -> CodecResult<Writer>;

    /// Append one raw byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer cannot grow.
    fn writer_append_byte(&self, writer: &mut Writer, byte: u8) -> CodecResult<()>;

    /// Append a run of raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer cannot grow.
    fn writer_append_bytes(&self, writer: &mut Writer, bytes: &[u8]) -> CodecResult<()>;

    /// Finish a writer, returning its contents.
    fn writer_finalize(&self, writer: Writer) -> Box<[u8]>;

    /// Create a reader over `bytes`.
    fn reader_init<'a>(&self, bytes: &'a [u8]) -> Reader<'a>;

    /// Append the encoding of one element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be encoded or the writer cannot
    /// grow.
    fn encode_value(&self, writer: &mut Writer, element: &Element) -> CodecResult<()>;

    /// Append the encoding of a key made of `elements`.
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be encoded or the writer cannot
    /// grow.
    fn encode_key(&self, writer: &mut Writer, elements: &[Element]) -> CodecResult<()>;

    /// Nesting limit applied by the provided decode entry points.
    fn max_depth(&self) -> usize;

    /// Decode one element from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or corrupt.
    fn decode_value(&self, reader: &mut Reader<'_>) -> CodecResult<Element> {
        read_element(reader, 0, self.max_depth())
    }

    /// Decode the remaining elements of `reader` lazily.
    fn decode_key<'a>(&self, reader: Reader<'a>) -> KeyDecoder<'a> {
        KeyDecoder::with_max_depth(reader, self.max_depth())
    }

    /// Encode `key` into a new byte vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be encoded.
    fn pack(&self, key: &Key) -> CodecResult<Vec<u8>> {
        let mut writer = self.writer_init(0)?;
        self.encode_key(&mut writer, key.as_slice())?;
        Ok(self.writer_finalize(writer).into_vec())
    }

    /// Decode a buffer holding exactly one key.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or corrupt.
    fn unpack(&self, bytes: &[u8]) -> CodecResult<Key> {
        self.decode_key(self.reader_init(bytes)).collect()
    }
}

/// The standard [`CodecApi`] implementation.
///
/// A `KeyCoder` is a small `Copy` value holding its [`CodecConfig`]; create one
/// per component and pass it by value.
///
/// # Example
///
/// ```
/// use keycoder::{CodecApi, CodecConfig, Key, KeyCoder};
///
/// let coder = KeyCoder::new(CodecConfig::new().max_depth(2));
///
/// let key = Key::new().with("orders").with(Key::new().with(7).with(1));
/// let bytes = coder.pack(&key).unwrap();
/// assert_eq!(coder.unpack(&bytes).unwrap(), key);
///
/// let too_deep = Key::new().with(Key::new().with(Key::new().with(Key::new())));
/// assert!(coder.pack(&too_deep).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyCoder {
    config: CodecConfig,
}

impl KeyCoder {
    /// Create a coder with the given configuration.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        debug!(
            initial_capacity = config.initial_capacity,
            max_depth = config.max_depth,
            "key coder configured"
        );
        Self { config }
    }

    /// The configuration this coder was created with.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl CodecApi for KeyCoder {
    fn writer_init(&self, capacity_hint: usize) -> CodecResult<Writer> {
        Writer::with_capacity(capacity_hint.max(self.config.initial_capacity))
    }

    fn writer_append_byte(&self, writer: &mut Writer, byte: u8) -> CodecResult<()> {
        writer.append_byte(byte)
    }

    fn writer_append_bytes(&self, writer: &mut Writer, bytes: &[u8]) -> CodecResult<()> {
        writer.append_bytes(bytes)
    }

    fn writer_finalize(&self, writer: Writer) -> Box<[u8]> {
        writer.finalize()
    }

    fn reader_init<'a>(&self, bytes: &'a [u8]) -> Reader<'a> {
        Reader::new(bytes)
    }

    fn encode_value(&self, writer: &mut Writer, element: &Element) -> CodecResult<()> {
        write_element(writer, element, 0, self.config.max_depth)
    }

    fn encode_key(&self, writer: &mut Writer, elements: &[Element]) -> CodecResult<()> {
        write_elements(writer, elements, 0, self.config.max_depth)
    }

    fn max_depth(&self) -> usize {
        self.config.max_depth
    }
}

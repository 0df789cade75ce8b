//! Encoding and decoding traits for key values.

use super::{decode_element, encode_element, encode_key, encode_value, pack_key, unpack_key};
use crate::buffer::Writer;
use crate::error::CodecResult;
use crate::types::{Element, Key};

/// A value that can be written in the order-preserving format.
pub trait Encoder {
    /// Encode this value to a new byte vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded, e.g. because nested
    /// keys are too deep.
    fn encode(&self) -> CodecResult<Vec<u8>>;

    /// Append the encoding of this value to an existing writer.
    ///
    /// This is the cheaper choice when several values share one buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails. The writer then holds a partial
    /// encoding.
    fn encode_to(&self, writer: &mut Writer) -> CodecResult<()>;
}

/// A value that can be read back from the order-preserving format.
pub trait Decoder: Sized {
    /// Decode a value from a buffer holding exactly its encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or corrupt.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl Encoder for Element {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        encode_element(self)
    }

    fn encode_to(&self, writer: &mut Writer) -> CodecResult<()> {
        encode_value(writer, self)
    }
}

impl Decoder for Element {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        decode_element(bytes)
    }
}

impl Encoder for Key {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        pack_key(self)
    }

    fn encode_to(&self, writer: &mut Writer) -> CodecResult<()> {
        encode_key(writer, self.as_slice())
    }
}

impl Decoder for Key {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        unpack_key(bytes)
    }
}

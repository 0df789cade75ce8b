//! Encoding of single [`Element`]s.
//!
//! Every element starts with its [`Tag`], followed by a kind-specific payload:
//!
//! | Kind | Payload |
//! |------|---------|
//! | Null | none |
//! | Integer | see [`integer`](super::integer) |
//! | Bool | `0x00` or `0x01` |
//! | Blob / Text | see [`packed`](super::packed) |
//! | Uuid | 16 raw bytes |
//! | Key | each inner element and a separator, then [`NESTED_KEY_END`] |
//!
//! Each encoding determines its own end, so elements can be concatenated
//! without a length table.

use tracing::trace;
use uuid::Uuid;

use super::{integer, key, packed, NESTED_KEY_END};
use crate::buffer::{Reader, Writer};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::encoding::Tag;
use crate::error::{CodecError, CodecResult, Corruption};
use crate::types::Element;

/// Append the encoding of `element` to `writer`.
///
/// Nested keys may be at most [`DEFAULT_MAX_DEPTH`] levels deep; use
/// [`KeyCoder`](crate::KeyCoder) for a different limit.
///
/// # Errors
///
/// - [`CodecError::OutOfMemory`] if the writer cannot grow.
/// - [`CodecError::UnsupportedType`] if nested keys are too deep.
///
/// On error the writer holds a partial encoding and should be discarded.
pub fn encode_value(writer: &mut Writer, element: &Element) -> CodecResult<()> {
    write_element(writer, element, 0, DEFAULT_MAX_DEPTH)
}

/// Decode one element from `reader`, leaving it just past the element.
///
/// # Errors
///
/// - [`CodecError::Exhausted`] if the input ends inside the element.
/// - [`CodecError::CorruptEncoding`] if the bytes are not a valid element.
pub fn decode_value(reader: &mut Reader<'_>) -> CodecResult<Element> {
    read_element(reader, 0, DEFAULT_MAX_DEPTH)
}

/// Encode a single element into a new byte vector.
///
/// # Errors
///
/// Same as [`encode_value`].
pub fn encode_element(element: &Element) -> CodecResult<Vec<u8>> {
    let mut writer = Writer::with_capacity(0)?;
    encode_value(&mut writer, element)?;
    Ok(writer.finalize().into_vec())
}

/// Decode a buffer holding exactly one element.
///
/// # Errors
///
/// Same as [`decode_value`], and [`CodecError::CorruptEncoding`] if bytes
/// remain after the element.
pub fn decode_element(bytes: &[u8]) -> CodecResult<Element> {
    let (element, consumed) = decode_element_with_len(bytes)?;
    if consumed != bytes.len() {
        return Err(CodecError::corrupt(
            consumed,
            Corruption::TrailingBytes(bytes.len() - consumed),
        ));
    }
    Ok(element)
}

/// Decode the element at the start of `bytes`, returning it and the number of
/// bytes it occupied.
///
/// # Errors
///
/// Same as [`decode_value`].
pub fn decode_element_with_len(bytes: &[u8]) -> CodecResult<(Element, usize)> {
    let mut reader = Reader::new(bytes);
    let element = decode_value(&mut reader)?;
    Ok((element, reader.position()))
}

/// Write `element`, which sits inside a key nested `depth` levels deep.
pub(crate) fn write_element(
    writer: &mut Writer,
    element: &Element,
    depth: usize,
    max_depth: usize,
) -> CodecResult<()> {
    match element {
        Element::Null => writer.append_byte(Tag::Null.as_u8()),
        Element::Integer(value) => integer::write_integer(writer, value),
        Element::Bool(value) => {
            writer.append_byte(Tag::Bool.as_u8())?;
            writer.append_byte(u8::from(*value))
        }
        Element::Blob(bytes) => {
            writer.append_byte(Tag::Blob.as_u8())?;
            packed::write_packed(writer, bytes)
        }
        Element::Text(text) => {
            writer.append_byte(Tag::Text.as_u8())?;
            packed::write_packed(writer, text.as_bytes())
        }
        Element::Uuid(uuid) => {
            writer.append_byte(Tag::Uuid.as_u8())?;
            writer.append_bytes(uuid.as_bytes())
        }
        Element::Key(inner) => {
            if depth >= max_depth {
                return Err(CodecError::unsupported(
                    "key",
                    format!("nested keys exceed maximum depth of {max_depth}"),
                ));
            }
            writer.append_byte(Tag::Key.as_u8())?;
            key::write_elements(writer, inner.as_slice(), depth + 1, max_depth)?;
            writer.append_byte(NESTED_KEY_END)
        }
    }
}

/// Read one element inside a key nested `depth` levels deep.
pub(crate) fn read_element(
    reader: &mut Reader<'_>,
    depth: usize,
    max_depth: usize,
) -> CodecResult<Element> {
    let position = reader.position();
    let byte = reader.read_byte()?;
    let tag = Tag::try_from(byte)
        .map_err(|unknown| CodecError::corrupt(position, Corruption::UnknownTag(unknown)))?;

    match tag {
        Tag::Null => Ok(Element::Null),
        Tag::NegativeInteger | Tag::Integer => {
            integer::read_integer(reader, tag).map(Element::Integer)
        }
        Tag::Bool => {
            let value_position = reader.position();
            match reader.read_byte()? {
                0 => Ok(Element::Bool(false)),
                1 => Ok(Element::Bool(true)),
                other => Err(CodecError::corrupt(value_position, Corruption::InvalidBool(other))),
            }
        }
        Tag::Blob => packed::read_packed(reader).map(Element::Blob),
        Tag::Text => {
            let bytes = packed::read_packed(reader)?;
            String::from_utf8(bytes)
                .map(Element::Text)
                .map_err(|e| CodecError::corrupt(position, Corruption::InvalidUtf8(e)))
        }
        Tag::Uuid => Ok(Element::Uuid(Uuid::from_bytes(reader.read_array()?))),
        Tag::Key => {
            if depth >= max_depth {
                return Err(CodecError::corrupt(position, Corruption::TooDeep(max_depth)));
            }
            key::read_nested(reader, depth + 1, max_depth)
                .map(Element::Key)
                .map_err(|inner| {
                    trace!(position, depth, "nested key failed to decode");
                    CodecError::corrupt(position, Corruption::Nested(Box::new(inner)))
                })
        }
        Tag::Separator => Err(CodecError::corrupt(position, Corruption::UnexpectedSeparator)),
    }
}

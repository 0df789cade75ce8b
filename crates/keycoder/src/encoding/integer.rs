//! Wire form of [`Integer`] elements.
//!
//! ```text
//! tag | length marker | magnitude
//! ```
//!
//! The magnitude is the absolute value in big-endian bytes with no leading
//! zero byte; zero has an empty magnitude. The length marker is a single byte
//! for magnitudes up to 254 bytes, and `0xFF` followed by the length as an
//! 8-byte big-endian integer beyond that. Longer magnitudes therefore sort
//! after shorter ones, and equal lengths compare by magnitude.
//!
//! Negative values use [`Tag::NegativeInteger`] and complement every byte of
//! the marker and magnitude, which reverses their order.

use crate::buffer::{Reader, Writer};
use crate::encoding::Tag;
use crate::error::{CodecError, CodecResult, Corruption};
use crate::types::Integer;

/// Largest magnitude length written as a single marker byte.
const MAX_SHORT_LENGTH: usize = 0xfe;

/// Marker byte introducing an 8-byte length.
const EXTENDED_LENGTH: u8 = 0xff;

/// Write `value` including its tag.
///
/// # Errors
///
/// Returns [`CodecError::OutOfMemory`] if the writer cannot grow.
pub fn write_integer(writer: &mut Writer, value: &Integer) -> CodecResult<()> {
    let negative = value.is_negative();
    let (tag, mask) = if negative {
        (Tag::NegativeInteger, 0xff)
    } else {
        (Tag::Integer, 0x00)
    };
    writer.append_byte(tag.as_u8())?;

    let magnitude = value.magnitude();
    let magnitude = magnitude.as_slice();
    let len = magnitude.len();
    if len <= MAX_SHORT_LENGTH {
        writer.append_byte(len as u8 ^ mask)?;
    } else {
        writer.append_byte(EXTENDED_LENGTH ^ mask)?;
        for byte in (len as u64).to_be_bytes() {
            writer.append_byte(byte ^ mask)?;
        }
    }

    if negative {
        for &byte in magnitude {
            writer.append_byte(!byte)?;
        }
        Ok(())
    } else {
        writer.append_bytes(magnitude)
    }
}

/// Read the marker and magnitude following an integer `tag`.
///
/// The tag itself must already have been consumed.
///
/// # Errors
///
/// - [`CodecError::Exhausted`] if the input ends inside the integer.
/// - [`CodecError::CorruptEncoding`] for anything the encoder cannot produce:
///   an extended marker for a short length, a length beyond `usize`, a
///   magnitude with a leading zero byte, or a negative zero.
pub fn read_integer(reader: &mut Reader<'_>, tag: Tag) -> CodecResult<Integer> {
    let negative = tag == Tag::NegativeInteger;
    let mask = if negative { 0xff } else { 0x00 };

    let marker_position = reader.position();
    let marker = reader.read_byte()? ^ mask;
    let len = if marker == EXTENDED_LENGTH {
        let raw = u64::from_be_bytes(reader.read_array::<8>()?.map(|b| b ^ mask));
        if raw <= MAX_SHORT_LENGTH as u64 {
            return Err(CodecError::corrupt(
                marker_position,
                Corruption::LengthMarker(format!("extended marker for length {raw}")),
            ));
        }
        usize::try_from(raw).map_err(|_| {
            CodecError::corrupt(
                marker_position,
                Corruption::LengthMarker(format!("length {raw} exceeds address space")),
            )
        })?
    } else {
        usize::from(marker)
    };

    let magnitude_position = reader.position();
    let raw = reader.read_bytes(len)?;
    match raw.first().map(|b| b ^ mask) {
        None if negative => {
            return Err(CodecError::corrupt(
                marker_position,
                Corruption::NonCanonicalInteger("negative zero"),
            ));
        }
        Some(0) => {
            return Err(CodecError::corrupt(
                magnitude_position,
                Corruption::NonCanonicalInteger("leading zero byte in magnitude"),
            ));
        }
        _ => {}
    }

    if !negative {
        return Ok(Integer::from_sign_magnitude(false, raw));
    }
    if raw.len() <= 8 {
        let mut word = [0u8; 8];
        for (dst, src) in word[8 - raw.len()..].iter_mut().zip(raw) {
            *dst = !src;
        }
        return Ok(Integer::from_sign_magnitude(true, &word));
    }
    let magnitude: Vec<u8> = raw.iter().map(|b| !b).collect();
    Ok(Integer::from_sign_magnitude(true, &magnitude))
}

//! Variable-length payloads for blobs and text.
//!
//! The payload is treated as a bit string and cut into 7-bit groups, the last
//! one zero-padded. Each group is written as `0x80 | group`, so every payload
//! byte is at least `0x80` and the payload is closed by a single
//! [`Tag::Separator`] byte, which can never appear inside it.
//!
//! Comparing two packed payloads byte-wise gives the same answer as comparing
//! the raw payloads:
//!
//! - Up to the first differing bit the groups are identical, and the group
//!   holding the 0 bit is the smaller byte.
//! - If one payload is a prefix of the other, its padding bits are zero and
//!   therefore not greater than the longer payload's bits, and its terminator
//!   is below every packed byte.
//!
//! Eight raw bytes become nine packed bytes.

use crate::buffer::{Reader, Writer};
use crate::encoding::Tag;
use crate::error::{CodecError, CodecResult, Corruption};

const HIGH_BIT: u8 = 0x80;
const GROUP_MASK: u8 = 0x7f;

/// Number of bytes [`write_packed`] emits for a payload of `len` bytes,
/// including the terminator.
#[inline]
#[must_use]
pub const fn packed_len(len: usize) -> usize {
    (len * 8).div_ceil(7) + 1
}

/// Write `data` as a packed payload followed by the terminator.
///
/// # Errors
///
/// Returns [`CodecError::OutOfMemory`] if the writer cannot grow.
pub fn write_packed(writer: &mut Writer, data: &[u8]) -> CodecResult<()> {
    let mut shift = 1u32;
    let mut trailer = 0u8;

    for &byte in data {
        writer.append_byte(HIGH_BIT | trailer | (byte >> shift))?;
        if shift < 7 {
            trailer = (byte << (7 - shift)) & GROUP_MASK;
            shift += 1;
        } else {
            writer.append_byte(HIGH_BIT | (byte & GROUP_MASK))?;
            shift = 1;
            trailer = 0;
        }
    }

    if shift > 1 {
        writer.append_byte(HIGH_BIT | trailer)?;
    }
    writer.append_byte(Tag::Separator.as_u8())
}

/// Read a packed payload and its terminator, returning the raw bytes.
///
/// # Errors
///
/// - [`CodecError::Exhausted`] if the input ends before the terminator.
/// - [`CodecError::CorruptEncoding`] if the terminator is not
///   [`Tag::Separator`], if the number of groups cannot come from a whole
///   number of bytes, or if the padding bits are not zero.
pub fn read_packed(reader: &mut Reader<'_>) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    loop {
        let position = reader.position();
        let byte = reader.read_byte()?;

        if byte & HIGH_BIT == 0 {
            if byte != Tag::Separator.as_u8() {
                return Err(CodecError::corrupt(
                    position,
                    Corruption::Packing("payload not closed by separator"),
                ));
            }
            // A full group of leftover bits means the encoder would have
            // emitted one group fewer.
            if bits >= 7 {
                return Err(CodecError::corrupt(
                    position,
                    Corruption::Packing("superfluous padding group"),
                ));
            }
            if acc & ((1 << bits) - 1) != 0 {
                return Err(CodecError::corrupt(
                    position,
                    Corruption::Packing("non-zero padding bits"),
                ));
            }
            return Ok(out);
        }

        acc = (acc << 7) | u32::from(byte & GROUP_MASK);
        bits += 7;
        if bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
            acc &= (1 << bits) - 1;
        }
    }
}

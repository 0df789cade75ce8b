//! Order-preserving variable-length unsigned integers.
//!
//! Small values take a single byte, which makes these a good fit for
//! collection and index identifiers placed in front of encoded keys. The
//! encoded forms compare byte-wise in numeric order.
//!
//! | First byte | Total length | Value |
//! |------------|--------------|-------|
//! | 0..=240 | 1 | the byte itself |
//! | 241..=248 | 2 | 240 + 256 * (b0 - 241) + b1 |
//! | 249 | 3 | 2288 + 256 * b1 + b2 |
//! | 250..=255 | 4..=9 | the next (b0 - 247) bytes, big-endian |
//!
//! # Example
//!
//! ```
//! use keycoder::encoding::varint::{pack_u64, unpack_u64};
//!
//! assert_eq!(pack_u64(240), vec![240]);
//! assert_eq!(pack_u64(241), vec![241, 1]);
//! assert!(pack_u64(2287) < pack_u64(2288));
//! assert_eq!(unpack_u64(&pack_u64(1 << 40)).unwrap(), 1 << 40);
//! ```

use crate::buffer::{Reader, Writer};
use crate::error::{CodecError, CodecResult, Corruption};

const ONE_BYTE_MAX: u64 = 240;
const TWO_BYTE_MAX: u64 = 2287;
const THREE_BYTE_MAX: u64 = 67823;
const THREE_BYTE_MARKER: u8 = 249;

/// Longest possible encoding.
pub const MAX_VARINT_LEN: usize = 9;

/// Encode `value` into a fixed buffer, returning it and the used length.
fn encode(value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut out = [0u8; MAX_VARINT_LEN];
    let len = if value <= ONE_BYTE_MAX {
        out[0] = value as u8;
        1
    } else if value <= TWO_BYTE_MAX {
        let rest = value - ONE_BYTE_MAX;
        out[0] = (rest / 256 + 241) as u8;
        out[1] = (rest % 256) as u8;
        2
    } else if value <= THREE_BYTE_MAX {
        let rest = value - (TWO_BYTE_MAX + 1);
        out[0] = THREE_BYTE_MARKER;
        out[1] = (rest / 256) as u8;
        out[2] = (rest % 256) as u8;
        3
    } else {
        let be = value.to_be_bytes();
        let width = (8 - value.leading_zeros() as usize / 8).max(3);
        out[0] = 247 + width as u8;
        out[1..=width].copy_from_slice(&be[8 - width..]);
        width + 1
    };
    (out, len)
}

/// Encode `value` as a standalone byte vector.
#[must_use]
pub fn pack_u64(value: u64) -> Vec<u8> {
    let (buf, len) = encode(value);
    buf[..len].to_vec()
}

/// Append the encoding of `value` to `writer`.
///
/// # Errors
///
/// Returns [`CodecError::OutOfMemory`] if the writer cannot grow.
pub fn write_u64(writer: &mut Writer, value: u64) -> CodecResult<()> {
    let (buf, len) = encode(value);
    writer.append_bytes(&buf[..len])
}

/// Read one encoded value from `reader`.
///
/// # Errors
///
/// Returns [`CodecError::Exhausted`] if the input ends inside the value.
pub fn read_u64(reader: &mut Reader<'_>) -> CodecResult<u64> {
    let first = reader.read_byte()?;
    Ok(match first {
        0..=240 => u64::from(first),
        241..=248 => {
            let low = reader.read_byte()?;
            ONE_BYTE_MAX + 256 * u64::from(first - 241) + u64::from(low)
        }
        THREE_BYTE_MARKER => {
            let [high, low] = reader.read_array::<2>()?;
            TWO_BYTE_MAX + 1 + 256 * u64::from(high) + u64::from(low)
        }
        _ => {
            let width = usize::from(first - 247);
            let mut be = [0u8; 8];
            be[8 - width..].copy_from_slice(reader.read_bytes(width)?);
            u64::from_be_bytes(be)
        }
    })
}

/// Decode a buffer holding exactly one encoded value.
///
/// # Errors
///
/// Returns [`CodecError::Exhausted`] for truncated input and
/// [`CodecError::CorruptEncoding`] if bytes follow the value.
pub fn unpack_u64(bytes: &[u8]) -> CodecResult<u64> {
    let mut reader = Reader::new(bytes);
    let value = read_u64(&mut reader)?;
    if !reader.is_empty() {
        return Err(CodecError::corrupt(
            reader.position(),
            Corruption::TrailingBytes(reader.remaining_len()),
        ));
    }
    Ok(value)
}

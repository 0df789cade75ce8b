//! The order-preserving wire format.
//!
//! Encoded keys compare byte-wise (`memcmp`) in the same order as the values
//! they were made from compare with [`Ord`]. Storage engines can therefore
//! sort and range-scan encoded keys without decoding them.
//!
//! # Layout
//!
//! - [`tag`] - the kind byte in front of every element, and cross-kind order
//! - [`integer`] - sign-aware length marker and big-endian magnitude
//! - [`packed`] - 7-bit packing for blob and text payloads
//! - [`element`] - one element of any kind
//! - [`key`] - sequences of elements and nested keys
//! - [`varint`] - compact ordered integers for key prefixes
//!
//! # Encoding Traits
//!
//! - [`Encoder`] - encode [`Element`](crate::Element)s and [`Key`](crate::Key)s
//! - [`Decoder`] - decode them back
//!
//! # Example
//!
//! ```
//! use keycoder::encoding::{Decoder, Encoder};
//! use keycoder::Key;
//!
//! let older = Key::new().with("events").with(-5).with("ab");
//! let newer = Key::new().with("events").with(-5).with("ac");
//!
//! let a = older.encode().unwrap();
//! let b = newer.encode().unwrap();
//! assert!(a < b);
//! assert_eq!(Key::decode(&a).unwrap(), older);
//! ```

pub mod element;
pub mod integer;
pub mod key;
pub mod packed;
pub mod tag;
mod traits;
pub mod varint;


pub use element::{decode_element, decode_element_with_len, decode_value, encode_element, encode_value};
pub use key::{
    decode_key, decode_key_with_prefix, encode_key, encode_key_with_prefix, increment_prefix,
    pack_key, unpack_key, KeyDecoder,
};
pub use tag::{Tag, NESTED_KEY_END};
pub use traits::{Decoder, Encoder};

/// Complement every byte, reversing the byte-wise order of encodings.
///
/// Useful for a descending component stored on its own. A byte prefix stays a
/// prefix after inversion, so an inverted key still sorts before the inverted
/// keys that extend it.
///
/// # Example
///
/// ```
/// use keycoder::encoding::{invert, pack_key};
/// use keycoder::Key;
///
/// let a = pack_key(&Key::new().with(1)).unwrap();
/// let b = pack_key(&Key::new().with(2)).unwrap();
/// assert!(invert(&a) > invert(&b));
/// assert_eq!(invert(&invert(&a)), a);
/// ```
#[must_use]
pub fn invert(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| !b).collect()
}

/// Complement every byte of `bytes` in place.
pub fn invert_in_place(bytes: &mut [u8]) {
    for byte in bytes {
        *byte = !*byte;
    }
}

//! `keycoder`
//!
//! Order-preserving binary encoding of typed tuples, for use as keys in
//! sorted key-value stores.
//!
//! # Overview
//!
//! An encoded key compares byte-wise in exactly the order its tuple compares
//! element by element, so a storage engine can sort, seek and range-scan
//! encoded keys without understanding them:
//!
//! - **Values**: [`Element`] covers null, arbitrary-precision [`Integer`]s,
//!   booleans, blobs, text, UUIDs and nested [`Key`]s
//! - **Mixed types**: elements of different kinds order by kind, in the order
//!   listed above
//! - **Prefixes**: a key sorts directly before every key that extends it
//! - **Self-delimiting**: no length table; a key decodes from its bytes alone
//!
//! # Example
//!
//! ```
//! use keycoder::{key, EncodedKey, Key};
//!
//! let a = EncodedKey::encode(&key!(-6, "zz")).unwrap();
//! let b = EncodedKey::encode(&key!(-5, "ab")).unwrap();
//! let c = EncodedKey::encode(&key!(-5, "ac")).unwrap();
//! assert!(a < b && b < c);
//!
//! let parent = EncodedKey::encode(&key!(1)).unwrap();
//! let child = EncodedKey::encode(&key!(1, 0)).unwrap();
//! assert!(parent < child);
//! assert!(child.starts_with(&parent));
//!
//! assert_eq!(b.decode().unwrap(), Key::new().with(-5).with("ab"));
//! ```
//!
//! # Modules
//!
//! - [`types`] - value types ([`Element`], [`Key`], [`Integer`])
//! - [`encoding`] - the wire format, free encode/decode functions and traits
//! - [`buffer`] - [`Writer`](buffer::Writer) and [`Reader`](buffer::Reader)
//! - [`api`] - the [`CodecApi`] entry-point table and [`KeyCoder`]
//! - [`encoded`] - the [`EncodedKey`] handle
//! - [`index`] - secondary index keys built on the codec
//! - [`config`] - [`CodecConfig`]
//! - [`error`] - error types ([`CodecError`])
//!
//! Values arriving at runtime as `serde_json::Value` convert into elements and
//! keys with `TryFrom`.

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod api;
pub mod buffer;
pub mod config;
mod convert;
pub mod encoded;
pub mod encoding;
pub mod error;
pub mod index;
pub mod types;

// Re-export commonly used types
pub use api::{CodecApi, KeyCoder};
pub use config::CodecConfig;
pub use encoded::EncodedKey;
pub use encoding::{
    decode_key, decode_value, encode_key, encode_value, pack_key, unpack_key, Decoder, Encoder,
    Tag,
};
pub use error::{CodecError, CodecResult, Corruption};
pub use types::{Element, Integer, Key};

/// Build a [`Key`] from a list of values convertible into [`Element`]s.
///
/// ```
/// use keycoder::{key, Element, Key};
///
/// let k = key!["users", 42, true, Option::<i64>::None];
/// assert_eq!(k.len(), 4);
/// assert_eq!(k.get(3), Some(&Element::Null));
/// assert_eq!(key![], Key::new());
/// ```
#[macro_export]
macro_rules! key {
    () => {
        $crate::Key::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::Key::from(::std::vec![$($crate::Element::from($element)),+])
    };
}

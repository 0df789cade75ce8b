//! Typed key elements.
//!
//! # Example
//!
//! ```
//! use keycoder::{Element, Key};
//!
//! let id: Element = 42i64.into();
//! let name: Element = "alice".into();
//! let missing: Element = Option::<i64>::None.into();
//!
//! assert_eq!(id.as_i64(), Some(42));
//! assert_eq!(name.as_text(), Some("alice"));
//! assert!(missing.is_null());
//!
//! // Elements order the same way their encodings do.
//! assert!(Element::Null < id);
//! assert!(id < Element::Bool(false));
//! assert!(Element::Bool(true) < Element::Blob(vec![]));
//! assert!(name < Element::Key(Key::new()));
//! ```

use std::fmt;

use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Integer, Key};
use crate::encoding::Tag;

/// One value of the closed set of encodable kinds.
///
/// The variant order matches the tag order, so the derived [`Ord`] is the
/// order of the encoded bytes: null, integers (numerically), booleans
/// (`false` first), blobs and text (byte-wise), UUIDs (byte-wise), nested keys
/// (element-wise, prefixes first).
///
/// | Variant | Rust Type | Tag |
/// |---------|-----------|-----|
/// | `Null` | - | 15 |
/// | `Integer` | [`Integer`] | 20 (negative) / 21 |
/// | `Bool` | `bool` | 30 |
/// | `Blob` | `Vec<u8>` | 40 |
/// | `Text` | `String` | 50 |
/// | `Uuid` | [`Uuid`] | 90 |
/// | `Key` | [`Key`] | 95 |
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Null/missing value
    Null,
    /// Signed integer of any size
    Integer(Integer),
    /// Boolean value
    Bool(bool),
    /// Raw bytes
    Blob(Vec<u8>),
    /// Unicode text
    Text(String),
    /// 128-bit identifier
    Uuid(Uuid),
    /// Nested key
    Key(Key),
}

impl Element {
    /// The tag this element is written with.
    #[must_use]
    pub fn tag(&self) -> Tag {
        match self {
            Self::Null => Tag::Null,
            Self::Integer(i) if i.is_negative() => Tag::NegativeInteger,
            Self::Integer(_) => Tag::Integer,
            Self::Bool(_) => Tag::Bool,
            Self::Blob(_) => Tag::Blob,
            Self::Text(_) => Tag::Text,
            Self::Uuid(_) => Tag::Uuid,
            Self::Key(_) => Tag::Key,
        }
    }

    /// Returns `true` if the element is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the element as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the element as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the element as an `i64` if it is an integer in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(Integer::to_i64)
    }

    /// Returns the element as raw bytes if it is a blob.
    #[inline]
    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the element as a string slice if it is text.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the element as a UUID if it is one.
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Returns the nested key if the element is one.
    #[inline]
    #[must_use]
    pub const fn as_key(&self) -> Option<&Key> {
        match self {
            Self::Key(k) => Some(k),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Blob(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Key(k) => write!(f, "{k}"),
        }
    }
}

impl From<bool> for Element {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Integer> for Element {
    #[inline]
    fn from(i: Integer) -> Self {
        Self::Integer(i)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Element {
                #[inline]
                fn from(i: $t) -> Self {
                    Self::Integer(Integer::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt, BigUint);

impl From<String> for Element {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Element {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Element {
    #[inline]
    fn from(b: Vec<u8>) -> Self {
        Self::Blob(b)
    }
}

impl From<&[u8]> for Element {
    #[inline]
    fn from(b: &[u8]) -> Self {
        Self::Blob(b.to_vec())
    }
}

impl From<Uuid> for Element {
    #[inline]
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<Key> for Element {
    #[inline]
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}

impl<T: Into<Element>> From<Option<T>> for Element {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

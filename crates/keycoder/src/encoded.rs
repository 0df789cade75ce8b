//! Owned handle for encoded keys.
//!
//! [`EncodedKey`] holds the bytes of a valid key encoding. It compares,
//! hashes and borrows as those bytes, so it can be used directly as the key of
//! a `BTreeMap` or passed to a storage engine, while still displaying as the
//! tuple it encodes.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Bound;

use crate::buffer::Reader;
use crate::encoding::{decode_key, increment_prefix, pack_key, unpack_key, KeyDecoder};
use crate::error::{CodecError, CodecResult, Corruption};
use crate::types::Key;

/// The encoding of a [`Key`].
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use keycoder::{EncodedKey, Key};
///
/// let mut rows = BTreeMap::new();
/// for (user, post) in [(2, 1), (1, 9), (1, 3)] {
///     let key = EncodedKey::encode(&Key::new().with("posts").with(user).with(post)).unwrap();
///     rows.insert(key, ());
/// }
///
/// let user_one = EncodedKey::encode(&Key::new().with("posts").with(1)).unwrap();
/// let posts: Vec<String> = rows.range(user_one.prefix_range()).map(|(k, _)| k.to_string()).collect();
/// assert_eq!(posts, vec!["(\"posts\", 1, 3)", "(\"posts\", 1, 9)"]);
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedKey(Box<[u8]>);

impl EncodedKey {
    /// Encode `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be encoded.
    pub fn encode(key: &Key) -> CodecResult<Self> {
        pack_key(key).map(|bytes| Self(bytes.into_boxed_slice()))
    }

    /// Decode the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid key encoding.
    pub fn decode(&self) -> CodecResult<Key> {
        unpack_key(&self.0)
    }

    /// Iterate over the elements without decoding the whole key.
    #[must_use]
    pub fn elements(&self) -> KeyDecoder<'_> {
        decode_key(Reader::new(&self.0))
    }

    /// Wrap bytes that hold a key encoding, after checking them.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid key encoding.
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> CodecResult<Self> {
        let bytes = bytes.into();
        unpack_key(&bytes)?;
        Ok(Self(bytes))
    }

    /// Strip `prefix` from a physical storage key and wrap the rest.
    ///
    /// Returns `Ok(None)` if `raw` does not start with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes after the prefix are not a valid key
    /// encoding.
    pub fn from_raw(prefix: &[u8], raw: &[u8]) -> CodecResult<Option<Self>> {
        match raw.strip_prefix(prefix) {
            Some(rest) => Self::from_bytes(rest).map(Some),
            None => Ok(None),
        }
    }

    /// The physical storage key: `prefix` followed by the encoding.
    #[must_use]
    pub fn to_raw(&self, prefix: &[u8]) -> Vec<u8> {
        let mut raw = Vec::with_capacity(prefix.len() + self.0.len());
        raw.extend_from_slice(prefix);
        raw.extend_from_slice(&self.0);
        raw
    }

    /// Lowercase hex form of the encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse the hex form produced by [`to_hex`](Self::to_hex).
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not valid hex or does not hold a valid key
    /// encoding.
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        let bytes = hex::decode(s).map_err(|e| CodecError::corrupt(0, Corruption::InvalidHex(e)))?;
        Self::from_bytes(bytes)
    }

    /// The encoded bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the encoding in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the encoding of the empty key.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the key encoded by `prefix` is a prefix of this key.
    ///
    /// Keys are self-delimiting element by element, so this is a plain byte
    /// comparison.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Bounds covering this key and every key that extends it.
    ///
    /// The end is unbounded only for the empty key.
    #[must_use]
    pub fn prefix_range(&self) -> (Bound<Self>, Bound<Self>) {
        let end = match increment_prefix(&self.0) {
            Some(end) => Bound::Excluded(Self(end.into_boxed_slice())),
            None => Bound::Unbounded,
        };
        (Bound::Included(self.clone()), end)
    }
}

impl fmt::Display for EncodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(key) => write!(f, "{key}"),
            Err(_) => write!(f, "<undecodable {}>", self.to_hex()),
        }
    }
}

impl fmt::Debug for EncodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedKey").field(&format_args!("{}", self.to_hex())).finish()
    }
}

impl AsRef<[u8]> for EncodedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for EncodedKey {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&Key> for EncodedKey {
    type Error = CodecError;

    fn try_from(key: &Key) -> Result<Self, Self::Error> {
        Self::encode(key)
    }
}

impl TryFrom<Vec<u8>> for EncodedKey {
    type Error = CodecError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<EncodedKey> for Vec<u8> {
    fn from(key: EncodedKey) -> Self {
        key.0.into_vec()
    }
}

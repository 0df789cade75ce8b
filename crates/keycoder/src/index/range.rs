//! Half-open byte ranges for scans.

use std::ops::{Bound, RangeBounds};

use crate::encoding::increment_prefix;

/// A range of encoded keys: `start` inclusive, `end` exclusive.
///
/// `end` is `None` when the range extends to the end of the keyspace.
/// Implements [`RangeBounds<[u8]>`], so it can be passed straight to
/// `BTreeMap<Vec<u8>, _>::range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    /// First key in the range.
    pub start: Vec<u8>,
    /// First key after the range, if any.
    pub end: Option<Vec<u8>>,
}

impl KeyRange {
    /// Range of `[start, end)`.
    #[must_use]
    pub const fn new(start: Vec<u8>, end: Option<Vec<u8>>) -> Self {
        Self { start, end }
    }

    /// Range of every key starting with `prefix`.
    #[must_use]
    pub fn prefix(prefix: Vec<u8>) -> Self {
        let end = increment_prefix(&prefix);
        Self { start: prefix, end }
    }

    /// Returns `true` if `key` lies within the range.
    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && self.end.as_deref().map_or(true, |end| key < end)
    }
}

impl RangeBounds<[u8]> for KeyRange {
    fn start_bound(&self) -> Bound<&[u8]> {
        Bound::Included(self.start.as_slice())
    }

    fn end_bound(&self) -> Bound<&[u8]> {
        self.end.as_deref().map_or(Bound::Unbounded, Bound::Excluded)
    }
}

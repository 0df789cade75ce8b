//! Secondary index entries and scans.

use crate::api::{CodecApi, KeyCoder};
use crate::buffer::Writer;
use crate::encoding::{varint, Tag, NESTED_KEY_END};
use crate::error::{CodecError, CodecResult, Corruption};
use crate::types::{Element, Key};

use super::KeyRange;

/// An entry in a secondary index.
///
/// Each entry maps the indexed values of one record to that record's primary
/// key. Several records may share the same values; their entries are ordered
/// by primary key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexEntry {
    /// The indexed values.
    pub values: Key,
    /// Primary key of the record holding those values.
    pub primary: Key,
}

impl IndexEntry {
    /// Create a new index entry.
    #[inline]
    #[must_use]
    pub const fn new(values: Key, primary: Key) -> Self {
        Self { values, primary }
    }
}

/// Builds and parses the storage keys of one secondary index.
///
/// An index key is laid out as
///
/// ```text
/// varint(index id) | nested key (values) | 0x66 | nested key (primary key) | 0x66
/// ```
///
/// so all entries of an index share one prefix, entries sort by values and
/// then by primary key, and all entries for one set of values form a
/// contiguous range.
///
/// # Example
///
/// ```
/// use keycoder::index::{IndexEntry, IndexKeyBuilder};
/// use keycoder::{Key, KeyCoder};
///
/// let by_age = IndexKeyBuilder::new(KeyCoder::default(), 3);
/// let raw = by_age.encode(&Key::new().with(30), &Key::new().with("user-17")).unwrap();
///
/// let entry = by_age.decode(&raw).unwrap().unwrap();
/// assert_eq!(entry, IndexEntry::new(Key::new().with(30), Key::new().with("user-17")));
///
/// let thirty = by_age.exact_range(&Key::new().with(30)).unwrap();
/// assert!(thirty.contains_key(&raw));
/// assert!(by_age.full_range().contains_key(&raw));
/// ```
#[derive(Debug, Clone)]
pub struct IndexKeyBuilder<C = KeyCoder> {
    codec: C,
    index_id: u64,
    prefix: Vec<u8>,
}

impl<C: CodecApi> IndexKeyBuilder<C> {
    /// Create a builder for the index identified by `index_id`.
    #[must_use]
    pub fn new(codec: C, index_id: u64) -> Self {
        Self { codec, index_id, prefix: varint::pack_u64(index_id) }
    }

    /// The index identifier.
    #[inline]
    #[must_use]
    pub const fn index_id(&self) -> u64 {
        self.index_id
    }

    /// Prefix shared by every key of this index.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Build the storage key for `values` held by the record `primary`.
    ///
    /// # Errors
    ///
    /// Returns an error if either key cannot be encoded.
    pub fn encode(&self, values: &Key, primary: &Key) -> CodecResult<Vec<u8>> {
        let mut writer = self.start_writer()?;
        self.write_component(&mut writer, values)?;
        self.write_component(&mut writer, primary)?;
        Ok(self.codec.writer_finalize(writer).into_vec())
    }

    /// Build the storage key for `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be encoded.
    pub fn encode_entry(&self, entry: &IndexEntry) -> CodecResult<Vec<u8>> {
        self.encode(&entry.values, &entry.primary)
    }

    /// Parse a storage key built by this builder.
    ///
    /// Returns `Ok(None)` if `raw` belongs to a different index.
    ///
    /// # Errors
    ///
    /// Returns an error if the key carries this index's prefix but is not a
    /// valid index key.
    pub fn decode(&self, raw: &[u8]) -> CodecResult<Option<IndexEntry>> {
        if !raw.starts_with(&self.prefix) {
            return Ok(None);
        }
        let mut reader = self.codec.reader_init(raw);
        reader.read_bytes(self.prefix.len())?;

        let mut elements = self.codec.decode_key(reader);
        let position = elements.position();
        let values = take_component(elements.next(), position, "indexed values")?;
        let position = elements.position();
        let primary = take_component(elements.next(), position, "primary key")?;
        let position = elements.position();
        if let Some(extra) = elements.next() {
            let extra = extra?;
            return Err(CodecError::corrupt(
                position,
                Corruption::Shape(format!("unexpected {} after primary key", extra.tag())),
            ));
        }
        Ok(Some(IndexEntry { values, primary }))
    }

    /// Range covering every entry of the index.
    #[must_use]
    pub fn full_range(&self) -> KeyRange {
        KeyRange::prefix(self.prefix.clone())
    }

    /// Range covering the entries whose values equal `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` cannot be encoded.
    pub fn exact_range(&self, values: &Key) -> CodecResult<KeyRange> {
        self.values_prefix(values).map(KeyRange::prefix)
    }

    /// Range covering the entries whose values are at least `min`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` cannot be encoded.
    pub fn range_from(&self, min: &Key) -> CodecResult<KeyRange> {
        let start = self.values_prefix(min)?;
        Ok(KeyRange::new(start, self.full_range().end))
    }

    /// Range covering the entries whose values are below `max`.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` cannot be encoded.
    pub fn range_to(&self, max: &Key) -> CodecResult<KeyRange> {
        let end = self.values_prefix(max)?;
        Ok(KeyRange::new(self.prefix.clone(), Some(end)))
    }

    /// Range covering the entries whose values lie in `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound cannot be encoded.
    pub fn range_between(&self, min: &Key, max: &Key) -> CodecResult<KeyRange> {
        Ok(KeyRange::new(self.values_prefix(min)?, Some(self.values_prefix(max)?)))
    }

    /// Index prefix followed by the framed `values`; every entry for exactly
    /// these values starts with it.
    fn values_prefix(&self, values: &Key) -> CodecResult<Vec<u8>> {
        let mut writer = self.start_writer()?;
        self.write_component(&mut writer, values)?;
        Ok(self.codec.writer_finalize(writer).into_vec())
    }

    fn start_writer(&self) -> CodecResult<Writer> {
        let mut writer = self.codec.writer_init(self.prefix.len())?;
        self.codec.writer_append_bytes(&mut writer, &self.prefix)?;
        Ok(writer)
    }

    /// Write `key` as a nested key element of the top-level key.
    fn write_component(&self, writer: &mut Writer, key: &Key) -> CodecResult<()> {
        let max_depth = self.codec.max_depth();
        if key.depth() >= max_depth {
            return Err(CodecError::unsupported(
                "key",
                format!("nested keys exceed maximum depth of {max_depth}"),
            ));
        }
        self.codec.writer_append_byte(writer, Tag::Key.as_u8())?;
        self.codec.encode_key(writer, key.as_slice())?;
        self.codec.writer_append_byte(writer, NESTED_KEY_END)?;
        self.codec.writer_append_byte(writer, Tag::Separator.as_u8())
    }
}

fn take_component(
    next: Option<CodecResult<Element>>,
    position: usize,
    what: &str,
) -> CodecResult<Key> {
    match next.transpose()? {
        Some(Element::Key(key)) => Ok(key),
        Some(other) => Err(CodecError::corrupt(
            position,
            Corruption::Shape(format!("expected nested key for {what}, found {}", other.tag())),
        )),
        None => Err(CodecError::corrupt(position, Corruption::Shape(format!("missing {what}")))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::CodecConfig;
    use crate::encoding::pack_key;

    fn builder() -> IndexKeyBuilder {
        IndexKeyBuilder::new(KeyCoder::default(), 7)
    }

    fn values(v: i64) -> Key {
        Key::new().with(v)
    }

    fn primary(id: &str) -> Key {
        Key::new().with(id)
    }

    #[test]
    fn layout_is_prefix_and_nested_components() {
        let b = builder();
        let raw = b.encode(&values(1), &primary("a")).unwrap();
        let expected_tail =
            pack_key(&Key::new().with(values(1)).with(primary("a"))).unwrap();
        assert_eq!(raw[0], 7);
        assert_eq!(&raw[1..], &expected_tail[..]);
    }

    #[test]
    fn entry_roundtrip() {
        let b = builder();
        let entry = IndexEntry::new(
            Key::new().with("x").with(Key::new().with(1)),
            Key::new().with(42).with(Element::Null),
        );
        let raw = b.encode_entry(&entry).unwrap();
        assert_eq!(b.decode(&raw).unwrap(), Some(entry));
    }

    #[test]
    fn foreign_index_is_none() {
        let raw = builder().encode(&values(1), &primary("a")).unwrap();
        let other = IndexKeyBuilder::new(KeyCoder::default(), 8);
        assert_eq!(other.decode(&raw).unwrap(), None);
    }

    #[test]
    fn malformed_entries_are_rejected() {
        let b = builder();
        let mut raw = b.prefix().to_vec();
        raw.extend(pack_key(&Key::new().with(values(1))).unwrap());
        assert!(matches!(
            b.decode(&raw),
            Err(CodecError::CorruptEncoding { reason: Corruption::Shape(_), .. })
        ));

        let mut raw = b.prefix().to_vec();
        raw.extend(pack_key(&Key::new().with(1).with(primary("a"))).unwrap());
        assert!(b.decode(&raw).is_err());

        let mut raw = b.encode(&values(1), &primary("a")).unwrap();
        raw.extend(pack_key(&Key::new().with(true)).unwrap());
        assert!(b.decode(&raw).is_err());
    }

    #[test]
    fn entries_sort_by_values_then_primary() {
        let b = builder();
        let ordered = [
            b.encode(&values(-1), &primary("z")).unwrap(),
            b.encode(&values(1), &primary("a")).unwrap(),
            b.encode(&values(1), &primary("b")).unwrap(),
            b.encode(&Key::new().with(1).with(0), &primary("a")).unwrap(),
            b.encode(&values(2), &primary("a")).unwrap(),
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn scan_ranges_select_the_right_entries() {
        let b = builder();
        let other = IndexKeyBuilder::new(KeyCoder::default(), 6);
        let mut store = BTreeMap::new();
        for (v, id) in [(1, "a"), (2, "b"), (2, "c"), (3, "d"), (5, "e")] {
            store.insert(b.encode(&values(v), &primary(id)).unwrap(), id);
            store.insert(other.encode(&values(v), &primary(id)).unwrap(), "other");
        }
        store.insert(b.encode(&Key::new().with(2).with(0), &primary("f")).unwrap(), "f");

        let scan = |range: KeyRange| -> Vec<&str> {
            store.range::<[u8], _>(range).map(|(_, id)| *id).collect()
        };
        assert_eq!(scan(b.full_range()), vec!["a", "b", "c", "f", "d", "e"]);
        assert_eq!(scan(b.exact_range(&values(2)).unwrap()), vec!["b", "c"]);
        assert_eq!(scan(b.range_from(&values(3)).unwrap()), vec!["d", "e"]);
        assert_eq!(scan(b.range_to(&values(2)).unwrap()), vec!["a"]);
        assert_eq!(scan(b.range_between(&values(2), &values(5)).unwrap()), vec!["b", "c", "f", "d"]);
    }

    #[test]
    fn component_depth_counts_the_framing_level() {
        let b = IndexKeyBuilder::new(KeyCoder::new(CodecConfig::new().max_depth(2)), 1);
        let one_level = Key::new().with(Key::new().with(1));
        let two_levels = Key::new().with(one_level.clone());
        assert!(b.encode(&one_level, &primary("a")).is_ok());
        assert!(matches!(
            b.encode(&two_levels, &primary("a")),
            Err(CodecError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn large_index_ids_use_longer_prefixes() {
        let b = IndexKeyBuilder::new(KeyCoder::default(), u64::MAX);
        assert_eq!(b.prefix().len(), 9);
        assert_eq!(b.index_id(), u64::MAX);
        assert_eq!(b.full_range().end, None);
        let raw = b.encode(&values(1), &primary("a")).unwrap();
        assert!(b.full_range().contains_key(&raw));
        assert!(b.decode(&raw).unwrap().is_some());
    }
}

//! Ordered sequences of elements.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Element;

/// An ordered sequence of [`Element`]s.
///
/// Keys compare element by element, and a key sorts before every key it is a
/// strict prefix of. Encoded keys compare byte-wise in the same order.
///
/// # Example
///
/// ```
/// use keycoder::Key;
///
/// let user = Key::new().with("users").with(42);
/// let post = user.clone().with("posts").with(7);
///
/// assert!(user.is_prefix_of(&post));
/// assert!(user < post);
/// assert_eq!(user.to_string(), "(\"users\", 42)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Vec<Element>);

impl Key {
    /// Create an empty key.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty key with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append an element, returning the key.
    #[must_use]
    pub fn with(mut self, element: impl Into<Element>) -> Self {
        self.0.push(element.into());
        self
    }

    /// Append an element.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.0.push(element.into());
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.0.get(index)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.0.iter()
    }

    /// The elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    /// Consume the key, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.0
    }

    /// Returns `true` if `self` equals the first `self.len()` elements of `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    /// How many levels of nested keys this key contains.
    ///
    /// A key without nested keys has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0
            .iter()
            .filter_map(Element::as_key)
            .map(|inner| 1 + inner.depth())
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str(")")
    }
}

impl AsRef<[Element]> for Key {
    fn as_ref(&self) -> &[Element] {
        &self.0
    }
}

impl From<Vec<Element>> for Key {
    #[inline]
    fn from(elements: Vec<Element>) -> Self {
        Self(elements)
    }
}

impl From<&[Element]> for Key {
    fn from(elements: &[Element]) -> Self {
        Self(elements.to_vec())
    }
}

impl From<Key> for Vec<Element> {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl FromIterator<Element> for Key {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Element> for Key {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Key {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Key {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_appends_in_order() {
        let key = Key::new().with(1).with("a").with(Element::Null);
        assert_eq!(key.len(), 3);
        assert_eq!(key.get(0), Some(&Element::from(1)));
        assert_eq!(key.get(2), Some(&Element::Null));
        assert_eq!(key.get(3), None);
    }

    #[test]
    fn prefix_sorts_first() {
        let short = Key::new().with(1);
        let long = Key::new().with(1).with(0);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(Key::new().is_prefix_of(&short));
        assert!(short < long);
    }

    #[test]
    fn depth_counts_nesting() {
        assert_eq!(Key::new().depth(), 0);
        let inner = Key::new().with(1);
        let middle = Key::new().with(inner.clone()).with(2);
        let outer = Key::new().with("x").with(middle).with(inner);
        assert_eq!(outer.depth(), 2);
    }

    #[test]
    fn collects_from_iterator() {
        let key: Key = (0i64..3).map(Element::from).collect();
        assert_eq!(key.to_string(), "(0, 1, 2)");
        let elements: Vec<Element> = key.into();
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn display_nested() {
        let key = Key::new().with(Key::new().with(true)).with(Key::new());
        assert_eq!(key.to_string(), "((true), ())");
    }
}

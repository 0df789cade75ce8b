//! Value types accepted by the codec.
//!
//! - [`Element`] - one typed value (null, integer, bool, blob, text, UUID, nested key)
//! - [`Key`] - an ordered sequence of elements
//! - [`Integer`] - arbitrary-precision signed integer with a native fast path

mod element;
mod integer;
mod key;

pub use element::Element;
pub(crate) use integer::Magnitude;
pub use integer::Integer;
pub use key::Key;

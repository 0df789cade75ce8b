//! Secondary index keys.
//!
//! A secondary index maps the values of one or more fields to the primary keys
//! of the records holding them. This module provides:
//!
//! - [`IndexKeyBuilder`] - builds and parses index keys, and produces scan
//!   ranges, on top of any [`CodecApi`](crate::CodecApi) implementation
//! - [`IndexEntry`] - a decoded (values, primary key) pair
//! - [`KeyRange`] - a half-open range of encoded keys
//!
//! # Key Format
//!
//! ```text
//! varint(index id) | nested key (values) | 0x66 | nested key (primary key) | 0x66
//! ```
//!
//! Because the indexed values are framed as a nested key, entries for one set
//! of values are contiguous even when the values have several components.

mod range;
mod secondary;

pub use range::KeyRange;
pub use secondary::{IndexEntry, IndexKeyBuilder};

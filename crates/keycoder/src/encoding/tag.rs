//! Element kind tags.
//!
//! The numeric value of each tag defines how elements of different kinds sort
//! against each other. [`Tag::Separator`] is larger than every other tag and
//! follows each element of a key.

use std::fmt;

/// Terminator written after the elements of a nested key.
///
/// It is smaller than every tag, so a nested key sorts before any nested key
/// that extends it.
pub const NESTED_KEY_END: u8 = 0x00;

/// The kind tag written before every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Null; no payload.
    Null = 15,
    /// Integer below zero; complemented length marker and magnitude.
    NegativeInteger = 20,
    /// Integer at or above zero; length marker and magnitude.
    Integer = 21,
    /// Boolean; one byte, 0 or 1.
    Bool = 30,
    /// Raw bytes; packed payload and separator.
    Blob = 40,
    /// UTF-8 text; packed payload and separator.
    Text = 50,
    /// 16-byte identifier such as a UUID.
    Uuid = 90,
    /// Nested key; its elements followed by [`NESTED_KEY_END`].
    Key = 95,
    /// Element terminator.
    Separator = 102,
}

impl Tag {
    /// Every tag, in sort order.
    pub const ALL: [Self; 9] = [
        Self::Null,
        Self::NegativeInteger,
        Self::Integer,
        Self::Bool,
        Self::Blob,
        Self::Text,
        Self::Uuid,
        Self::Key,
        Self::Separator,
    ];

    /// The tag's byte value.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::NegativeInteger => "negative integer",
            Self::Integer => "integer",
            Self::Bool => "bool",
            Self::Blob => "blob",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::Key => "key",
            Self::Separator => "separator",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            15 => Self::Null,
            20 => Self::NegativeInteger,
            21 => Self::Integer,
            30 => Self::Bool,
            40 => Self::Blob,
            50 => Self::Text,
            90 => Self::Uuid,
            95 => Self::Key,
            102 => Self::Separator,
            other => return Err(other),
        })
    }
}

impl From<Tag> for u8 {
    #[inline]
    fn from(tag: Tag) -> Self {
        tag.as_u8()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Error types for the key codec.

use thiserror::Error;

/// Maximum length for value display in error messages.
const MAX_VALUE_DISPLAY_LEN: usize = 100;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding keys.
///
/// A [`Writer`](crate::buffer::Writer) that saw an error part-way through an
/// encode holds a partial result and must be discarded.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Growing a writer's buffer failed.
    #[error("out of memory growing buffer by {requested} bytes")]
    OutOfMemory {
        /// Number of additional bytes that could not be reserved.
        requested: usize,
    },

    /// A value outside the closed set of encodable kinds was supplied.
    #[error("unsupported type {type_name}: {reason}")]
    UnsupportedType {
        /// Name of the rejected kind.
        type_name: String,
        /// Why the value cannot be encoded (truncated for display).
        reason: String,
    },

    /// The reader ran out of bytes in the middle of an element.
    #[error("expected {needed} bytes at position {position}, but only {remaining} remain")]
    Exhausted {
        /// Reader position at which the read was attempted.
        position: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the input.
        remaining: usize,
    },

    /// The input is not a valid encoding.
    #[error("corrupt encoding at position {position}: {reason}")]
    CorruptEncoding {
        /// Position of the offending byte.
        position: usize,
        /// What was wrong with it.
        reason: Corruption,
    },
}

/// The specific defect found in a corrupt encoding.
#[derive(Debug, Error)]
pub enum Corruption {
    /// A tag byte outside the known set.
    #[error("bad kind {0}; key corrupt?")]
    UnknownTag(u8),

    /// An element was not followed by the separator byte.
    #[error("expected separator, found {0:#04x}")]
    MissingSeparator(u8),

    /// A separator byte where an element tag was expected.
    #[error("unexpected separator in place of an element")]
    UnexpectedSeparator,

    /// A decoded key does not have the shape the caller expects.
    #[error("unexpected key shape: {0}")]
    Shape(String),

    /// An integer length marker that cannot have been produced by the encoder.
    #[error("malformed integer length marker: {0}")]
    LengthMarker(String),

    /// An integer magnitude that is not in minimal form.
    #[error("non-canonical integer: {0}")]
    NonCanonicalInteger(&'static str),

    /// A bool payload other than 0 or 1.
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    /// A blob or text payload that violates the packing rules.
    #[error("malformed payload: {0}")]
    Packing(&'static str),

    /// A text payload that is not UTF-8.
    #[error("invalid UTF-8 in text: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Nested keys exceed the configured depth.
    #[error("nested keys exceed maximum depth of {0}")]
    TooDeep(usize),

    /// Bytes were left after a complete element.
    #[error("{0} trailing bytes after element")]
    TrailingBytes(usize),

    /// A hex-encoded key could not be parsed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Decoding an enclosed nested key failed.
    #[error("in nested key: {0}")]
    Nested(#[source] Box<CodecError>),
}

impl CodecError {
    /// Creates a corrupt-encoding error at `position`.
    #[must_use]
    pub const fn corrupt(position: usize, reason: Corruption) -> Self {
        Self::CorruptEncoding { position, reason }
    }

    /// Creates an unsupported-type error.
    ///
    /// The reason is truncated to 100 characters for display.
    #[must_use]
    pub fn unsupported(type_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let reason = reason.to_string();
        let reason = if reason.len() > MAX_VALUE_DISPLAY_LEN {
            let mut end = MAX_VALUE_DISPLAY_LEN;
            while !reason.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &reason[..end])
        } else {
            reason
        };
        Self::UnsupportedType { type_name: type_name.into(), reason }
    }

    /// Returns `true` if the error indicates truncated or malformed input,
    /// as opposed to a problem with the value being encoded.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(self, Self::Exhausted { .. } | Self::CorruptEncoding { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_names_position() {
        let err = CodecError::Exhausted { position: 3, needed: 4, remaining: 1 };
        assert_eq!(err.to_string(), "expected 4 bytes at position 3, but only 1 remain");
        assert!(err.is_decode_error());
    }

    #[test]
    fn unsupported_reason_is_truncated() {
        let err = CodecError::unsupported("object", "x".repeat(500));
        match &err {
            CodecError::UnsupportedType { reason, .. } => {
                assert_eq!(reason.len(), MAX_VALUE_DISPLAY_LEN + 3);
                assert!(reason.ends_with("..."));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!err.is_decode_error());
    }

    #[test]
    fn unsupported_truncation_respects_char_boundaries() {
        let err = CodecError::unsupported("text", "é".repeat(200));
        assert!(err.to_string().ends_with("..."));
    }

    #[test]
    fn nested_corruption_keeps_source() {
        use std::error::Error as _;

        let inner = CodecError::corrupt(7, Corruption::UnknownTag(1));
        let outer = CodecError::corrupt(2, Corruption::Nested(Box::new(inner)));
        assert_eq!(
            outer.to_string(),
            "corrupt encoding at position 2: in nested key: corrupt encoding at position 7: bad kind 1; key corrupt?"
        );
        let CodecError::CorruptEncoding { reason, .. } = &outer else {
            panic!("expected corrupt encoding");
        };
        assert!(reason.source().is_some());
    }
}

//! Codec configuration.

use serde::{Deserialize, Serialize};

/// Default writer capacity hint used by [`KeyCoder`](crate::KeyCoder).
pub const DEFAULT_INITIAL_CAPACITY: usize = 32;

/// Default maximum nesting depth for nested keys.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for a [`KeyCoder`](crate::KeyCoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Capacity hint for new writers.
    /// Default: 32
    pub initial_capacity: usize,

    /// Maximum depth of nested keys accepted when encoding or decoding.
    /// A key with no nested keys has depth 0.
    /// Default: 64
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_INITIAL_CAPACITY, max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl CodecConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the writer capacity hint.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the maximum nested-key depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = CodecConfig::new().initial_capacity(128).max_depth(4);
        assert_eq!(config.initial_capacity, 128);
        assert_eq!(config.max_depth, 4);
        assert_eq!(CodecConfig::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: CodecConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }
}

//! Error types for the example-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The demo user has a blank username.
    #[error("demo user username must not be empty")]
    EmptyUsername,

    /// The registry defines no tags.
    #[error("registry contains no tags")]
    EmptyTags,

    /// A tag colour is not a `#RRGGBB` hex value.
    #[error("invalid tag colour at index {index}: {value}")]
    InvalidTagColor {
        /// Index of the tag in the array.
        index: usize,
        /// The rejected colour string.
        value: String,
    },

    /// Two tags share a name.
    #[error("duplicate tag name '{name}'")]
    DuplicateTagName {
        /// Repeated name.
        name: String,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during network generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested contact count exceeds what a demo network supports.
    #[error("contact count {count} exceeds the maximum of {max}")]
    ContactCountTooLarge {
        /// Requested count.
        count: usize,
        /// Largest accepted count.
        max: usize,
    },
}

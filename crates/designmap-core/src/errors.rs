//! Error types shared across the workspace.

use thiserror::Error;

/// Result type alias using [`DesignMapError`].
pub type Result<T> = std::result::Result<T, DesignMapError>;

/// A catalog entry that could not be indexed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Entry has no usable name.
    #[error("Catalog entry {index} has no name")]
    MissingName { index: usize },

    /// Entry JSON could not be decoded.
    #[error("Catalog entry {index} is malformed: {message}")]
    Malformed { index: usize, message: String },

    /// Entry id is already taken by an earlier entry.
    #[error("Catalog entry {index} repeats component id '{id}'")]
    DuplicateId { index: usize, id: String },
}

impl CatalogError {
    /// Position of the offending entry in the input.
    pub fn index(&self) -> usize {
        match self {
            Self::MissingName { index }
            | Self::Malformed { index, .. }
            | Self::DuplicateId { index, .. } => *index,
        }
    }
}

/// Invalid caller-supplied configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Confidence floor outside `0..=100`.
    #[error("Confidence floor '{field}' must be within 0..=100, got {value}")]
    ConfidenceOutOfRange { field: &'static str, value: f64 },

    /// A limit that must be positive was zero.
    #[error("'{0}' must be greater than zero")]
    ZeroLimit(&'static str),

    /// Any other invalid value.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Check that a confidence floor lies within `0..=100`.
    pub fn check_confidence(field: &'static str, value: f64) -> std::result::Result<(), Self> {
        if (0.0..=100.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::ConfidenceOutOfRange { field, value })
        }
    }
}

/// Top-level error for engine entry points.
#[derive(Error, Debug)]
pub enum DesignMapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Code generation failed.
    #[error("Code generation failed: {0}")]
    Generation(String),
}

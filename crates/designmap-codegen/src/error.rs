//! Error types for matching and code generation.

use designmap_core::{ConfigError, DesignMapError};
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during matching or code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Invalid caller configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Mapping refers to a component missing from the catalog.
    #[error("Component '{0}' is not in the catalog")]
    UnknownComponent(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CodegenError> for DesignMapError {
    fn from(error: CodegenError) -> Self {
        match error {
            CodegenError::Config(config) => DesignMapError::Config(config),
            CodegenError::Json(json) => DesignMapError::Json(json),
            other => DesignMapError::Generation(other.to_string()),
        }
    }
}

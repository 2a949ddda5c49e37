//! Caller-supplied options for indexing, matching and generation.

use designmap_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Matching thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    /// Minimum score for an element to be mapped.
    pub min_confidence: f64,
    /// Suggestions must score strictly above this.
    pub suggestion_floor: f64,
    /// Maximum suggestions per unmapped element.
    pub max_suggestions: usize,
    /// Score elements on the rayon pool when the `parallel` feature is on.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_confidence: 60.0,
            suggestion_floor: 30.0,
            max_suggestions: 3,
            parallel: false,
        }
    }
}

impl MatchConfig {
    /// Set the confidence floor.
    pub fn with_min_confidence(mut self, floor: f64) -> Self {
        self.min_confidence = floor;
        self
    }

    /// Enable or disable parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_confidence("min_confidence", self.min_confidence)?;
        ConfigError::check_confidence("suggestion_floor", self.suggestion_floor)?;
        if self.max_suggestions == 0 {
            return Err(ConfigError::ZeroLimit("max_suggestions"));
        }
        Ok(())
    }
}

/// Catalog indexing options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Package that resolved import paths are rooted at.
    pub import_base: Option<String>,
}

impl CatalogConfig {
    pub fn with_import_base(mut self, base: impl Into<String>) -> Self {
        self.import_base = Some(base.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.import_base {
            Some(base) if base.trim().is_empty() => Err(ConfigError::InvalidValue {
                field: "import_base",
                message: "must not be blank".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// React output options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    pub include_imports: bool,
    pub include_type_interfaces: bool,
    /// Name of the composed scaffold component, rendered in PascalCase.
    pub component_name: String,
    /// Element wrapping every usage in the scaffold.
    pub wrapper: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_imports: true,
            include_type_interfaces: true,
            component_name: "GeneratedComponent".to_string(),
            wrapper: "div".to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.component_name) {
            return Err(ConfigError::InvalidValue {
                field: "component_name",
                message: format!("'{}' is not a valid identifier", self.component_name),
            });
        }
        if self.wrapper.is_empty() || !self.wrapper.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
            return Err(ConfigError::InvalidValue {
                field: "wrapper",
                message: format!("'{}' is not a valid element name", self.wrapper),
            });
        }
        Ok(())
    }
}

/// JavaScript identifier check, ASCII only.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_config_validation() {
        assert!(MatchConfig::default().validate().is_ok());
        assert!(MatchConfig::default().with_min_confidence(-5.0).validate().is_err());
        assert!(MatchConfig::default().with_min_confidence(101.0).validate().is_err());

        let zero = MatchConfig { max_suggestions: 0, ..MatchConfig::default() };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroLimit("max_suggestions")));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: MatchConfig = serde_json::from_str(r#"{"minConfidence": 75}"#).unwrap();
        assert_eq!(config.min_confidence, 75.0);
        assert_eq!(config.max_suggestions, 3);
    }

    #[test]
    fn test_generate_options_validation() {
        assert!(GenerateOptions::default().validate().is_ok());
        let bad = GenerateOptions { component_name: "1st".into(), ..GenerateOptions::default() };
        assert!(bad.validate().is_err());
        let bad = GenerateOptions { wrapper: "div onClick".into(), ..GenerateOptions::default() };
        assert!(bad.validate().is_err());
        let fragment = GenerateOptions { wrapper: "React.Fragment".into(), ..GenerateOptions::default() };
        assert!(fragment.validate().is_ok());
    }

    #[test]
    fn test_catalog_config_validation() {
        assert!(CatalogConfig::default().validate().is_ok());
        assert!(CatalogConfig::default().with_import_base("  ").validate().is_err());
    }
}

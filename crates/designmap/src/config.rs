//! Engine configuration.

use designmap_codegen::{CatalogConfig, GenerateOptions, MatchConfig};
use designmap_core::ConfigError;
use serde::{Deserialize, Serialize};

/// What [`analyze_document`](crate::analyze_document) includes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    pub include_components: bool,
    pub include_text_styles: bool,
    pub include_color_styles: bool,
    /// Deepest level expanded in the structure view.
    pub max_depth: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_components: true,
            include_text_styles: true,
            include_color_styles: true,
            max_depth: 5,
        }
    }
}

impl AnalysisOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Settings for [`map_document`](crate::map_document).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub analysis: AnalysisOptions,
    pub matching: MatchConfig,
    pub catalog: CatalogConfig,
    /// Generate code when set.
    pub generate: Option<GenerateOptions>,
}

impl EngineConfig {
    pub fn with_matching(mut self, matching: MatchConfig) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_generate(mut self, options: GenerateOptions) -> Self {
        self.generate = Some(options);
        self
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()?;
        self.catalog.validate()?;
        if let Some(generate) = &self.generate {
            generate.validate()?;
        }
        Ok(())
    }
}

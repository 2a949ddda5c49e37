//! Design layout analysis and component catalog mapping.
//!
//! `designmap` takes an already fetched design-tool layout tree and a
//! catalog of UI components and produces:
//!
//! - a structural and style digest of the layout ([`analyze_document`])
//! - a scored mapping from layout elements to catalog components, with
//!   React scaffold code ([`map_document`])
//!
//! The lower-level stages live in [`designmap_analyze`] and
//! [`designmap_codegen`] and are re-exported here.
//!
//! # Features
//!
//! - `parallel` - score elements on the rayon pool
//!
//! # Example
//!
//! ```ignore
//! use designmap::{map_document, EngineConfig, GenerateOptions, LayoutNode};
//!
//! let layout: LayoutNode = serde_json::from_str(&layout_json)?;
//! let config = EngineConfig::default().with_generate(GenerateOptions::default());
//! let outcome = map_document(&layout, &catalog_entries, &config)?;
//! println!("{}", serde_json::to_string_pretty(&outcome.report)?);
//! ```

pub mod config;
pub mod pipeline;

pub use config::{AnalysisOptions, EngineConfig};
pub use pipeline::{
    analyze_document, map_components, map_design_system, map_document, CatalogSummary,
    LayoutReport, LayoutStatistics, LayoutSummary, MappingOutcome, RejectedEntry,
};

pub use designmap_analyze as analyze;
pub use designmap_codegen as codegen;
pub use designmap_codegen::{
    CatalogConfig, GenerateOptions, GeneratedCode, Mapping, MappingReport, MatchConfig,
    UnmappedElement,
};
pub use designmap_core::{CatalogComponent, DesignMapError, LayoutNode, Result};

//! Catalog matching and React code generation for designmap.
//!
//! Flattened layout elements are scored against an indexed component
//! catalog; accepted matches carry inferred prop bindings and feed the
//! code generators.
//!
//! # Features
//!
//! - `parallel` - score elements on the rayon pool
//!
//! # Example
//!
//! ```ignore
//! use designmap_codegen::{build_index, generate, map, CatalogConfig, GenerateOptions, MatchConfig};
//!
//! let catalog = build_index(components, &CatalogConfig::default());
//! let report = map(&elements, &catalog, &MatchConfig::default())?;
//! let code = generate(&report, &catalog, &GenerateOptions::default())?;
//! println!("{}", code.scaffold.unwrap_or_default());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generators;
pub mod matcher;
pub mod model;

pub use catalog::{
    build_index, build_index_from_json, catalog_from_document, component_identifier, decode_entry,
    Capability, Catalog, ImportResolver, IndexedComponent,
};
pub use config::{CatalogConfig, GenerateOptions, MatchConfig};
pub use error::{CodegenError, Result};
pub use generators::{
    generate, CodeGenerator, ComponentUsage, GeneratedCode, PropsBinding, ReactGenerator,
    TemplateEngine,
};
pub use matcher::{map, score, Category, Mapper, MappingStatistics, Recommendation, ScoreBreakdown};
pub use model::{ComponentRef, Mapping, MappingReport, Suggestion, UnmappedElement};

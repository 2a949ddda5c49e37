//! Code generation from accepted mappings.

pub mod bindings;
mod react;
mod scaffold;
mod templates;
mod typescript;

pub use bindings::{bind_props, mapping_notes, MappingNotes, PropsBinding};
pub use react::{import_statements, render_usage, ReactGenerator};
pub use scaffold::ScaffoldGenerator;
pub use templates::TemplateEngine;
pub use typescript::render_interface;

use crate::catalog::Catalog;
use crate::config::GenerateOptions;
use crate::error::Result;
use crate::model::{Mapping, MappingReport};
use serde::Serialize;

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Generate code for every mapping in a report.
    fn generate(&self, report: &MappingReport, catalog: &Catalog) -> Result<GeneratedCode>;
}

/// One mapped element rendered as a component usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentUsage {
    pub element_id: String,
    pub element_name: String,
    /// Local JSX name the component is imported under.
    pub component: String,
    pub code: String,
    pub props: PropsBinding,
}

impl ComponentUsage {
    /// `local` is the name the component is imported under.
    fn from_mapping(mapping: &Mapping, local: &str) -> Self {
        let code = if local == mapping.component().identifier {
            mapping.example_code().to_string()
        } else {
            render_usage(local, mapping.props_binding())
        };
        Self {
            element_id: mapping.element().id.clone(),
            element_name: mapping.element().name.clone(),
            component: local.to_string(),
            code,
            props: mapping.props_binding().clone(),
        }
    }
}

/// Generated source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedCode {
    pub imports: Vec<String>,
    /// Usages grouped by component, in first-seen order.
    pub usages: Vec<ComponentUsage>,
    pub interfaces: Vec<String>,
    /// `None` when nothing was mapped.
    pub scaffold: Option<String>,
    pub total_components: usize,
    pub total_usages: usize,
}

/// Generate React code for a mapping report.
pub fn generate(report: &MappingReport, catalog: &Catalog, options: &GenerateOptions) -> Result<GeneratedCode> {
    ReactGenerator::new(options.clone())?.generate(report, catalog)
}

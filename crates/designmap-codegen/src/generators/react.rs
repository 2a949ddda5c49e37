//! React output: JSX usages, import statements and the composed scaffold.

use super::bindings::PropsBinding;
use super::scaffold::ScaffoldGenerator;
use super::typescript::render_interface;
use super::{CodeGenerator, ComponentUsage, GeneratedCode};
use crate::catalog::Catalog;
use crate::config::GenerateOptions;
use crate::error::{CodegenError, Result};
use crate::model::{Mapping, MappingReport};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// React code generator.
pub struct ReactGenerator<'a> {
    scaffold: ScaffoldGenerator<'a>,
    options: GenerateOptions,
}

impl<'a> ReactGenerator<'a> {
    /// Create a generator; the options are validated first.
    pub fn new(options: GenerateOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            scaffold: ScaffoldGenerator::new()?,
            options,
        })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }
}

impl<'a> CodeGenerator for ReactGenerator<'a> {
    fn framework_name(&self) -> &'static str {
        "React"
    }

    fn generate(&self, report: &MappingReport, catalog: &Catalog) -> Result<GeneratedCode> {
        let groups = report.component_groups();
        let locals = local_names(&report.mappings);

        let imports = if self.options.include_imports {
            import_statements(&report.mappings)
        } else {
            Vec::new()
        };

        let usages: Vec<ComponentUsage> = groups
            .values()
            .flatten()
            .map(|mapping| ComponentUsage::from_mapping(mapping, local_name(&locals, mapping)))
            .collect();

        let mut interfaces = Vec::new();
        if self.options.include_type_interfaces {
            for (id, mappings) in &groups {
                let indexed = catalog
                    .get_by_id(id)
                    .ok_or_else(|| CodegenError::UnknownComponent((*id).to_string()))?;
                let identifier = mappings
                    .first()
                    .map(|m| local_name(&locals, m))
                    .unwrap_or_default();
                interfaces.push(render_interface(&indexed.component, identifier));
            }
        }

        let scaffold = if usages.is_empty() {
            None
        } else {
            let lines: Vec<&str> = usages.iter().map(|u| u.code.as_str()).collect();
            Some(self.scaffold.render(
                &self.options.component_name,
                &self.options.wrapper,
                &imports,
                &lines.join("\n"),
            )?)
        };

        debug!(
            components = groups.len(),
            usages = usages.len(),
            imports = imports.len(),
            "react code generated"
        );

        Ok(GeneratedCode {
            total_components: groups.len(),
            total_usages: usages.len(),
            imports,
            usages,
            interfaces,
            scaffold,
        })
    }
}

/// One import statement per distinct path, sorted by path.
///
/// An identifier already bound by another path is imported under a
/// numbered alias, e.g. `import { Button as Button2 } from ...`.
pub fn import_statements(mappings: &[Mapping]) -> Vec<String> {
    let mut by_path: IndexMap<&str, Vec<String>> = IndexMap::new();
    for ((path, identifier), local) in local_names(mappings) {
        let specifier = if local == identifier {
            local
        } else {
            format!("{} as {}", identifier, local)
        };
        by_path.entry(path).or_default().push(specifier);
    }

    let mut paths: Vec<(&str, Vec<String>)> = by_path.into_iter().collect();
    paths.sort_by(|a, b| a.0.cmp(b.0));
    paths
        .into_iter()
        .map(|(path, names)| format!("import {{ {} }} from '{}';", names.join(", "), path))
        .collect()
}

type LocalNames<'m> = IndexMap<(&'m str, &'m str), String>;

/// Local JSX name per import path and identifier, in first-seen order.
/// The first path keeps the identifier; later paths get `Name2`, `Name3`...
fn local_names(mappings: &[Mapping]) -> LocalNames<'_> {
    let mut names = LocalNames::new();
    for mapping in mappings {
        let component = mapping.component();
        let key = (component.import_path.as_str(), component.identifier.as_str());
        if names.contains_key(&key) {
            continue;
        }
        let mut local = component.identifier.clone();
        let mut suffix = 2;
        while names.values().any(|taken| *taken == local) {
            local = format!("{}{}", component.identifier, suffix);
            suffix += 1;
        }
        names.insert(key, local);
    }
    names
}

fn local_name<'a>(locals: &'a LocalNames<'_>, mapping: &'a Mapping) -> &'a str {
    let component = mapping.component();
    locals
        .get(&(component.import_path.as_str(), component.identifier.as_str()))
        .map_or(component.identifier.as_str(), String::as_str)
}

/// Self-closing JSX element for a component with bound props.
pub fn render_usage(identifier: &str, binding: &PropsBinding) -> String {
    if binding.is_empty() {
        return format!("<{} />", identifier);
    }
    let attributes: Vec<String> = binding
        .iter()
        .map(|(name, value)| jsx_attribute(name, value))
        .collect();
    format!("<{} {} />", identifier, attributes.join(" "))
}

fn jsx_attribute(name: &str, value: &Value) -> String {
    match value {
        Value::String(s) if !s.contains('"') => format!("{}=\"{}\"", name, s),
        other => format!("{}={{{}}}", name, other),
    }
}

//! Mapping results.

use crate::catalog::{component_identifier, IndexedComponent};
use crate::generators::{bind_props, mapping_notes, render_usage, PropsBinding};
use crate::matcher::stats::{MappingStatistics, Recommendation};
use designmap_analyze::FlatElement;
use designmap_core::ComponentKind;
use indexmap::IndexMap;
use serde::Serialize;

/// The catalog component a mapping points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRef {
    pub id: String,
    pub name: String,
    /// JSX identifier used in generated code.
    pub identifier: String,
    pub kind: ComponentKind,
    pub description: String,
    pub import_path: String,
    pub props_count: usize,
    pub has_variants: bool,
}

impl From<&IndexedComponent> for ComponentRef {
    fn from(indexed: &IndexedComponent) -> Self {
        let component = &indexed.component;
        Self {
            id: component.id.clone(),
            name: component.name.clone(),
            identifier: component_identifier(&component.name),
            kind: component.kind,
            description: component.description.clone(),
            import_path: indexed.import_path.clone(),
            props_count: component.props.len(),
            has_variants: component.has_variants(),
        }
    }
}

/// An element matched to a catalog component.
///
/// Bindings, example code and notes are derived once at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapping {
    element: FlatElement,
    component: ComponentRef,
    confidence: f64,
    props_binding: PropsBinding,
    example_code: String,
    notes: Vec<String>,
    missing_required: Vec<String>,
}

impl Mapping {
    pub(crate) fn new(element: FlatElement, indexed: &IndexedComponent, confidence: f64) -> Self {
        let props_binding = bind_props(&element, &indexed.component);
        let notes = mapping_notes(&element, &indexed.component, &props_binding);
        let component = ComponentRef::from(indexed);
        let example_code = render_usage(&component.identifier, &props_binding);
        Self {
            element,
            component,
            confidence,
            example_code,
            missing_required: notes.missing_required,
            notes: notes.messages,
            props_binding,
        }
    }

    pub fn element(&self) -> &FlatElement {
        &self.element
    }

    pub fn component(&self) -> &ComponentRef {
        &self.component
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn props_binding(&self) -> &PropsBinding {
        &self.props_binding
    }

    /// Single-line JSX usage, e.g. `<Button variant="primary" />`.
    pub fn example_code(&self) -> &str {
        &self.example_code
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Required component props the binding leaves unset.
    pub fn missing_required(&self) -> &[String] {
        &self.missing_required
    }
}

/// A candidate component for an unmapped element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub component_id: String,
    pub component_name: String,
    pub confidence: f64,
    pub reason: String,
    pub example: String,
}

/// A mappable element no component scored high enough for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmappedElement {
    pub element: FlatElement,
    pub best_score: f64,
    pub reason: String,
    pub suggestions: Vec<Suggestion>,
}

/// Result of mapping a flattened layout against a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingReport {
    pub mappings: Vec<Mapping>,
    pub unmapped: Vec<UnmappedElement>,
    pub statistics: MappingStatistics,
    pub recommendations: Vec<Recommendation>,
}

impl MappingReport {
    /// Mappings grouped by component id, in first-seen order.
    pub fn component_groups(&self) -> IndexMap<&str, Vec<&Mapping>> {
        let mut groups: IndexMap<&str, Vec<&Mapping>> = IndexMap::new();
        for mapping in &self.mappings {
            groups
                .entry(mapping.component.id.as_str())
                .or_default()
                .push(mapping);
        }
        groups
    }

    /// Mapped plus unmapped element count.
    pub fn mappable_count(&self) -> usize {
        self.mappings.len() + self.unmapped.len()
    }
}

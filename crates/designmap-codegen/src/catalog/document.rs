//! Catalog extraction from a design-system document.

use designmap_core::{
    CatalogComponent, ComponentKind, ComponentPropertyDefinition, ComponentPropertyType,
    LayoutNode, NodeKind, PropDef, PropType, Token, TokenKind, VariantDef,
};
use indexmap::IndexSet;
use tracing::debug;

/// Build catalog entries from the component sets and standalone
/// components of a design-system document.
pub fn catalog_from_document(root: &LayoutNode) -> Vec<CatalogComponent> {
    let mut components = Vec::new();
    collect(root, &mut components);
    debug!(components = components.len(), "catalog extracted from document");
    components
}

fn collect(node: &LayoutNode, out: &mut Vec<CatalogComponent>) {
    match node.kind {
        NodeKind::ComponentSet => out.push(component_set_entry(node)),
        NodeKind::Component => out.push(base_entry(node, ComponentKind::Component)),
        _ => {
            for child in &node.children {
                collect(child, out);
            }
        }
    }
}

fn base_entry(node: &LayoutNode, kind: ComponentKind) -> CatalogComponent {
    let mut component = CatalogComponent::new(node.name.clone())
        .with_id(node.key.clone().unwrap_or_else(|| node.id.clone()))
        .with_description(node.description.clone().unwrap_or_default())
        .with_kind(kind);
    component.props = node
        .component_property_definitions
        .iter()
        .map(|(name, definition)| prop_def(name, definition))
        .collect();
    component.tokens = color_tokens(node);
    component
}

fn component_set_entry(node: &LayoutNode) -> CatalogComponent {
    let mut component = base_entry(node, ComponentKind::ComponentSet);
    component.variants = node
        .children
        .iter()
        .filter(|child| child.kind == NodeKind::Component)
        .map(|child| VariantDef::from_name(child.id.clone(), child.name.clone()))
        .collect();
    component
}

/// Property names carry a `#id` suffix for non-variant properties.
fn prop_def(name: &str, definition: &ComponentPropertyDefinition) -> PropDef {
    let name = name.split('#').next().unwrap_or(name).trim();
    let prop_type = match definition.property_type {
        ComponentPropertyType::Boolean => PropType::Boolean,
        ComponentPropertyType::Text => PropType::Text,
        ComponentPropertyType::InstanceSwap => PropType::InstanceSwap,
        ComponentPropertyType::Variant => PropType::Variant,
        ComponentPropertyType::Unknown => PropType::Other("UNKNOWN".to_string()),
    };
    let mut prop = PropDef::new(name, prop_type);
    if !definition.default_value.is_null() {
        prop = prop.with_default(definition.default_value.clone());
    }
    if let Some(options) = &definition.variant_options {
        prop = prop.with_enum_values(options.iter().cloned());
    }
    prop
}

/// Solid fill and stroke colors of a subtree, deduplicated per usage.
fn color_tokens(root: &LayoutNode) -> Vec<Token> {
    let mut seen = IndexSet::new();
    for (_, node) in root.iter() {
        let fills = node.fills.iter().map(|p| ("fill", p));
        let strokes = node.strokes.iter().map(|p| ("stroke", p));
        for (usage, paint) in fills.chain(strokes) {
            if let Some(color) = paint.solid_color() {
                seen.insert((usage, color.to_css()));
            }
        }
    }
    seen.into_iter()
        .map(|(usage, value)| Token {
            kind: TokenKind::Color,
            usage: usage.to_string(),
            value,
        })
        .collect()
}

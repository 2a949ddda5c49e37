//! Component definitions and instances found in a document.

use designmap_core::{
    BoundingBox, ComponentProperty, ComponentPropertyDefinition, LayoutNode, NodeKind, Vector2,
};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

/// A main component defined in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDefinitionInfo {
    pub id: String,
    pub name: String,
    pub key: Option<String>,
    pub description: String,
    pub bounding_box: Option<BoundingBox>,
    pub property_definitions: IndexMap<String, ComponentPropertyDefinition>,
}

/// Overridden fields of one node inside an instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideEntry {
    pub node_id: String,
    /// Name path from the instance; the raw id when the node is not in the subtree.
    pub path: String,
    pub fields: Vec<String>,
}

/// Overrides of an instance, grouped by what they change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverrideSummary {
    pub text: Vec<OverrideEntry>,
    pub color: Vec<OverrideEntry>,
    pub visibility: Vec<OverrideEntry>,
    pub other: Vec<OverrideEntry>,
    pub properties: IndexMap<String, ComponentProperty>,
}

impl OverrideSummary {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.color.is_empty()
            && self.visibility.is_empty()
            && self.other.is_empty()
            && self.properties.is_empty()
    }
}

/// An instance of a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceInfo {
    pub id: String,
    pub name: String,
    pub component_id: Option<String>,
    /// Name of the main component when it is defined in the same document.
    pub component_name: Option<String>,
    pub instance_properties: IndexMap<String, ComponentProperty>,
    pub position: Vector2,
    pub overrides: OverrideSummary,
}

/// All component definitions and instances of a tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentInventory {
    pub components: Vec<ComponentDefinitionInfo>,
    pub instances: Vec<InstanceInfo>,
    pub type_counts: IndexMap<String, usize>,
}

impl ComponentInventory {
    pub fn len(&self) -> usize {
        self.components.len() + self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collect component definitions and instances in pre-order.
pub fn inventory(root: &LayoutNode) -> ComponentInventory {
    let mut components = Vec::new();
    let mut instances = Vec::new();

    for (_, node) in root.iter() {
        match node.kind {
            NodeKind::Component => components.push(ComponentDefinitionInfo {
                id: node.id.clone(),
                name: node.name.clone(),
                key: node.key.clone(),
                description: node.description.clone().unwrap_or_default(),
                bounding_box: node.bounding_box,
                property_definitions: node.component_property_definitions.clone(),
            }),
            NodeKind::Instance => instances.push(InstanceInfo {
                id: node.id.clone(),
                name: node.name.clone(),
                component_id: node.component_id.clone(),
                component_name: None,
                instance_properties: node.instance_properties.clone(),
                position: node
                    .bounding_box
                    .map(|b| Vector2 { x: b.x, y: b.y })
                    .unwrap_or_default(),
                overrides: summarize_overrides(node),
            }),
            _ => {}
        }
    }

    for instance in &mut instances {
        instance.component_name = instance.component_id.as_deref().and_then(|id| {
            components
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        });
    }

    let mut type_counts = IndexMap::new();
    if !components.is_empty() {
        type_counts.insert("component".to_string(), components.len());
    }
    if !instances.is_empty() {
        type_counts.insert("instance".to_string(), instances.len());
    }

    info!(
        components = components.len(),
        instances = instances.len(),
        "component inventory collected"
    );

    ComponentInventory {
        components,
        instances,
        type_counts,
    }
}

/// Classify an instance's overrides by overridden field.
pub fn summarize_overrides(instance: &LayoutNode) -> OverrideSummary {
    let mut summary = OverrideSummary {
        properties: instance.instance_properties.clone(),
        ..OverrideSummary::default()
    };

    for override_ in &instance.overrides {
        let path = node_path(instance, &override_.id).unwrap_or_else(|| override_.id.clone());
        let mut text = Vec::new();
        let mut color = Vec::new();
        let mut visibility = Vec::new();
        let mut other = Vec::new();
        for field in &override_.overridden_fields {
            match field.as_str() {
                "characters" => text.push(field.clone()),
                "fills" | "strokes" => color.push(field.clone()),
                "visible" => visibility.push(field.clone()),
                _ => other.push(field.clone()),
            }
        }

        for (bucket, fields) in [
            (&mut summary.text, text),
            (&mut summary.color, color),
            (&mut summary.visibility, visibility),
            (&mut summary.other, other),
        ] {
            if !fields.is_empty() {
                bucket.push(OverrideEntry {
                    node_id: override_.id.clone(),
                    path: path.clone(),
                    fields,
                });
            }
        }
    }

    summary
}

/// Slash-joined name path from `root` to the node with `id`.
fn node_path(root: &LayoutNode, id: &str) -> Option<String> {
    if root.id == id {
        return Some(root.name.clone());
    }
    root.children
        .iter()
        .find_map(|child| node_path(child, id))
        .map(|rest| format!("{}/{}", root.name, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use designmap_core::Override;

    #[test]
    fn test_inventory_links_instances() {
        let mut instance = LayoutNode::new("2:1", "Save", NodeKind::Instance)
            .with_bounds(40.0, 80.0, 120.0, 40.0)
            .with_component_id("1:1")
            .with_instance_property("Variant", ComponentProperty::variant("Primary"))
            .with_child(LayoutNode::text("2:2", "Label", "Save"));
        instance.overrides.push(Override {
            id: "2:2".to_string(),
            overridden_fields: vec!["characters".to_string(), "fills".to_string(), "opacity".to_string()],
        });

        let mut main = LayoutNode::new("1:1", "Button", NodeKind::Component);
        main.key = Some("abc".to_string());

        let root = LayoutNode::new("0:1", "Page", NodeKind::Canvas)
            .with_child(main)
            .with_child(instance)
            .with_child(LayoutNode::new("3:1", "Orphan", NodeKind::Instance).with_component_id("9:9"));

        let inventory = inventory(&root);
        assert_eq!(inventory.components.len(), 1);
        assert_eq!(inventory.instances.len(), 2);
        assert_eq!(inventory.type_counts.get("instance"), Some(&2));
        assert_eq!(inventory.instances[0].component_name.as_deref(), Some("Button"));
        assert_eq!(inventory.instances[1].component_name, None);
        assert_eq!(inventory.instances[0].position, Vector2 { x: 40.0, y: 80.0 });

        let overrides = &inventory.instances[0].overrides;
        assert_eq!(overrides.text[0].path, "Save/Label");
        assert_eq!(overrides.color[0].fields, vec!["fills"]);
        assert_eq!(overrides.other[0].fields, vec!["opacity"]);
        assert!(overrides.visibility.is_empty());
        assert!(overrides.properties.contains_key("Variant"));
    }

    #[test]
    fn test_unknown_override_id_keeps_raw_id() {
        let mut instance = LayoutNode::new("5:1", "Chip", NodeKind::Instance);
        instance.overrides.push(Override {
            id: "I5:1;77:3".to_string(),
            overridden_fields: vec!["visible".to_string()],
        });
        let summary = summarize_overrides(&instance);
        assert_eq!(summary.visibility[0].path, "I5:1;77:3");
    }
}

//! Depth-limited structural summary of a layout tree.

use crate::styles::TextStyleToken;
use designmap_core::{BoundingBox, ComponentProperty, LayoutMode, LayoutNode, NodeKind};
use indexmap::IndexMap;
use serde::Serialize;

/// Text details of a text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInfo {
    pub content: String,
    pub style: TextStyleToken,
}

/// Component details of a definition, set, or instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInfo {
    pub component_id: Option<String>,
    pub is_main_component: bool,
    pub is_component_set: bool,
    pub is_instance: bool,
    pub properties: IndexMap<String, ComponentProperty>,
}

/// One node of the structure view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureNode {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub depth: usize,
    pub visible: bool,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentInfo>,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub children: Vec<StructureNode>,
}

impl StructureNode {
    /// Nodes in this summary, skipped stubs included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(StructureNode::count).sum::<usize>()
    }
}

/// Summarize `root` down to `max_depth`.
///
/// Children of nodes at `max_depth` appear as skipped stubs and are not
/// expanded further.
pub fn structure(root: &LayoutNode, max_depth: usize) -> StructureNode {
    describe(root, 0, max_depth)
}

fn display_name(node: &LayoutNode) -> String {
    if node.name.is_empty() {
        "Unnamed".to_string()
    } else {
        node.name.clone()
    }
}

fn describe(node: &LayoutNode, depth: usize, max_depth: usize) -> StructureNode {
    if depth > max_depth {
        return StructureNode {
            id: node.id.clone(),
            name: display_name(node),
            kind: node.kind.to_string(),
            depth,
            visible: node.visible,
            locked: node.locked,
            bounding_box: None,
            layout_mode: None,
            item_spacing: None,
            text: None,
            component: None,
            skipped: true,
            skip_reason: Some(format!("Maximum depth {} reached", max_depth)),
            children: Vec::new(),
        };
    }

    let text = (node.kind == NodeKind::Text).then(|| TextInfo {
        content: node.text_content().unwrap_or_default().to_string(),
        style: TextStyleToken::from_node(node),
    });

    let component = node.kind.is_component_like().then(|| ComponentInfo {
        component_id: node.component_id.clone(),
        is_main_component: node.kind == NodeKind::Component,
        is_component_set: node.kind == NodeKind::ComponentSet,
        is_instance: node.kind == NodeKind::Instance,
        properties: node.instance_properties.clone(),
    });

    StructureNode {
        id: node.id.clone(),
        name: display_name(node),
        kind: node.kind.to_string(),
        depth,
        visible: node.visible,
        locked: node.locked,
        bounding_box: node.bounding_box,
        layout_mode: node.layout_mode,
        item_spacing: node.item_spacing,
        text,
        component,
        skipped: false,
        skip_reason: None,
        children: node
            .children
            .iter()
            .map(|child| describe(child, depth + 1, max_depth))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep_tree() -> LayoutNode {
        LayoutNode::new("0", "Root", NodeKind::Frame).with_child(
            LayoutNode::new("1", "", NodeKind::Group).with_child(
                LayoutNode::new("2", "Deep", NodeKind::Frame)
                    .with_child(LayoutNode::text("3", "Deeper", "x")),
            ),
        )
    }

    #[test]
    fn test_depth_limit_adds_skipped_stubs() {
        let view = structure(&deep_tree(), 1);
        assert_eq!(view.children[0].name, "Unnamed");
        let stub = &view.children[0].children[0];
        assert!(stub.skipped);
        assert_eq!(stub.depth, 2);
        assert_eq!(stub.skip_reason.as_deref(), Some("Maximum depth 1 reached"));
        assert!(stub.children.is_empty());
        assert_eq!(view.count(), 3);
    }

    #[test]
    fn test_full_depth_includes_text_info() {
        let view = structure(&deep_tree(), 10);
        assert_eq!(view.count(), 4);
        let text = view.children[0].children[0].children[0].text.as_ref().unwrap();
        assert_eq!(text.content, "x");
    }

    #[test]
    fn test_component_info() {
        let node = LayoutNode::new("1", "Btn", NodeKind::Instance).with_component_id("c");
        let view = structure(&node, 3);
        let info = view.component.unwrap();
        assert!(info.is_instance && !info.is_main_component);
        assert_eq!(info.component_id.as_deref(), Some("c"));
    }
}

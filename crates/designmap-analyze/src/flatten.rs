//! Flattened, path-annotated view of a layout tree.
//!
//! Each [`FlatElement`] refers to its parent and ancestors by pre-order
//! index into the same list, so the view never borrows back into the tree.

use designmap_core::{BoundingBox, ComponentProperty, LayoutNode, NodeKind};
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

/// Classification flags derived from a node kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementFlags {
    pub is_instance: bool,
    pub is_text: bool,
    pub is_frame: bool,
    pub is_group: bool,
    pub is_component: bool,
    pub is_component_set: bool,
    pub is_shape: bool,
    pub is_mappable: bool,
}

impl ElementFlags {
    pub fn from_kind(kind: &NodeKind) -> Self {
        Self {
            is_instance: *kind == NodeKind::Instance,
            is_text: *kind == NodeKind::Text,
            is_frame: *kind == NodeKind::Frame,
            is_group: *kind == NodeKind::Group,
            is_component: *kind == NodeKind::Component,
            is_component_set: *kind == NodeKind::ComponentSet,
            is_shape: kind.is_shape(),
            is_mappable: is_mappable_kind(kind),
        }
    }
}

/// Kinds the mapper tries to match against the catalog.
pub fn is_mappable_kind(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Instance
            | NodeKind::Text
            | NodeKind::Frame
            | NodeKind::Rectangle
            | NodeKind::Ellipse
            | NodeKind::Vector
    )
}

/// One layout node plus its position in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatElement {
    /// Pre-order index.
    pub index: usize,
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// Slash-joined names from the root.
    pub path: String,
    pub depth: usize,
    pub parent: Option<usize>,
    /// Indices from the root down to the parent.
    pub ancestors: SmallVec<[usize; 8]>,
    pub bounding_box: Option<BoundingBox>,
    pub visible: bool,
    pub text: Option<String>,
    pub component_id: Option<String>,
    pub instance_properties: IndexMap<String, ComponentProperty>,
    pub flags: ElementFlags,
}

impl FlatElement {
    fn from_node(node: &LayoutNode, index: usize, depth: usize, parent: Option<&FlatElement>) -> Self {
        let (path, ancestors) = match parent {
            Some(parent) => {
                let mut ancestors = parent.ancestors.clone();
                ancestors.push(parent.index);
                (format!("{}/{}", parent.path, node.name), ancestors)
            }
            None => (node.name.clone(), SmallVec::new()),
        };

        Self {
            index,
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind.clone(),
            path,
            depth,
            parent: parent.map(|p| p.index),
            ancestors,
            bounding_box: node.bounding_box,
            visible: node.visible,
            text: node.characters.clone(),
            component_id: node.component_id.clone(),
            instance_properties: node.instance_properties.clone(),
            flags: ElementFlags::from_kind(&node.kind),
        }
    }

    /// Create a root-level element directly from a node.
    pub fn detached(node: &LayoutNode) -> Self {
        Self::from_node(node, 0, 0, None)
    }

    pub fn is_mappable(&self) -> bool {
        self.flags.is_mappable
    }

    pub fn is_instance(&self) -> bool {
        self.flags.is_instance
    }
}

/// Flatten `root` into pre-order elements; one element per node.
pub fn flatten(root: &LayoutNode) -> Vec<FlatElement> {
    let mut elements: Vec<FlatElement> = Vec::new();
    let mut stack: Vec<(&LayoutNode, usize, Option<usize>)> = vec![(root, 0, None)];

    while let Some((node, depth, parent)) = stack.pop() {
        let index = elements.len();
        let element = FlatElement::from_node(node, index, depth, parent.map(|p| &elements[p]));
        elements.push(element);
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, depth + 1, Some(index))),
        );
    }

    debug!(elements = elements.len(), "tree flattened");
    elements
}

/// Iterate over the mappable elements of a flattened tree.
pub fn mappable(elements: &[FlatElement]) -> impl Iterator<Item = &FlatElement> {
    elements.iter().filter(|e| e.is_mappable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree() -> LayoutNode {
        LayoutNode::new("0", "Screen", NodeKind::Frame)
            .with_child(
                LayoutNode::new("1", "Header", NodeKind::Group)
                    .with_child(LayoutNode::text("2", "Title", "Hello"))
                    .with_child(LayoutNode::new("3", "Logo", NodeKind::Vector)),
            )
            .with_child(
                LayoutNode::new("4", "Primary Button", NodeKind::Instance).with_component_id("c:1"),
            )
    }

    #[test]
    fn test_flatten_paths_and_parents() {
        let flat = flatten(&tree());
        let paths: Vec<&str> = flat.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "Screen",
                "Screen/Header",
                "Screen/Header/Title",
                "Screen/Header/Logo",
                "Screen/Primary Button"
            ]
        );
        assert_eq!(flat[2].parent, Some(1));
        assert_eq!(flat[2].ancestors.as_slice(), &[0, 1]);
        assert_eq!(flat[4].depth, 1);
        assert_eq!(flat[2].text.as_deref(), Some("Hello"));
        assert_eq!(flat[4].component_id.as_deref(), Some("c:1"));
    }

    #[test]
    fn test_flags() {
        let flat = flatten(&tree());
        assert!(flat[0].flags.is_frame && flat[0].is_mappable());
        assert!(flat[1].flags.is_group && !flat[1].is_mappable());
        assert!(flat[3].flags.is_shape && flat[3].is_mappable());
        assert!(flat[4].is_instance());
        assert_eq!(mappable(&flat).count(), 4);
    }

    fn arb_tree() -> impl Strategy<Value = LayoutNode> {
        let kinds = prop::sample::select(vec![
            NodeKind::Frame,
            NodeKind::Text,
            NodeKind::Group,
            NodeKind::Instance,
            NodeKind::Rectangle,
        ]);
        let leaf = (kinds, "[a-z]{0,6}").prop_map(|(kind, name)| LayoutNode::new("n", name, kind));
        leaf.prop_recursive(4, 48, 5, |inner| {
            (prop::collection::vec(inner, 0..5), "[a-z]{1,6}").prop_map(|(children, name)| {
                LayoutNode::new("p", name, NodeKind::Frame).with_children(children)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_flatten_covers_every_node(tree in arb_tree()) {
            let first = flatten(&tree);
            prop_assert_eq!(first.len(), tree.count_nodes());
            prop_assert_eq!(&first, &flatten(&tree));
            for (i, element) in first.iter().enumerate() {
                prop_assert_eq!(element.index, i);
                if let Some(parent) = element.parent {
                    prop_assert!(parent < i);
                    prop_assert_eq!(first[parent].depth + 1, element.depth);
                }
            }
        }
    }
}

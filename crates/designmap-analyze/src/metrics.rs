//! Tree-wide layout metrics.

use designmap_core::{LayoutNode, NodeKind};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate counts and densities of a layout tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutMetrics {
    pub total_nodes: usize,
    /// Node count at each depth, indexed by depth.
    pub nodes_per_depth: Vec<usize>,
    /// Node count per kind name, in first-seen order.
    pub kind_distribution: IndexMap<String, usize>,
    /// Frames, groups and sections.
    pub container_count: usize,
    /// Nodes with at least one child.
    pub parent_count: usize,
    pub total_children: usize,
    /// Mean child count over nodes with children.
    pub average_fan_out: f64,
    /// Number of parents by child count.
    pub fan_out_histogram: BTreeMap<usize, usize>,
    pub text_density: f64,
    pub component_density: f64,
    pub max_depth: usize,
}

/// Compute metrics in one traversal.
pub fn compute_metrics(root: &LayoutNode) -> LayoutMetrics {
    let mut metrics = LayoutMetrics::default();
    let mut text_nodes = 0usize;
    let mut component_nodes = 0usize;

    for (depth, node) in root.iter() {
        metrics.total_nodes += 1;
        metrics.max_depth = metrics.max_depth.max(depth);
        if metrics.nodes_per_depth.len() <= depth {
            metrics.nodes_per_depth.resize(depth + 1, 0);
        }
        metrics.nodes_per_depth[depth] += 1;
        *metrics
            .kind_distribution
            .entry(node.kind.to_string())
            .or_insert(0) += 1;

        if node.kind == NodeKind::Text {
            text_nodes += 1;
        }
        if node.kind.is_component_like() {
            component_nodes += 1;
        }
        if node.kind.is_container() {
            metrics.container_count += 1;
        }

        let children = node.children.len();
        if children > 0 {
            metrics.parent_count += 1;
            metrics.total_children += children;
            *metrics.fan_out_histogram.entry(children).or_insert(0) += 1;
        }
    }

    if metrics.total_nodes > 0 {
        metrics.text_density = round_to(text_nodes as f64 / metrics.total_nodes as f64, 3);
        metrics.component_density =
            round_to(component_nodes as f64 / metrics.total_nodes as f64, 3);
    }
    if metrics.parent_count > 0 {
        metrics.average_fan_out =
            round_to(metrics.total_children as f64 / metrics.parent_count as f64, 3);
    }

    metrics
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let tree = LayoutNode::new("0", "Page", NodeKind::Frame)
            .with_child(
                LayoutNode::new("1", "Header", NodeKind::Group)
                    .with_child(LayoutNode::text("2", "Title", "Hi"))
                    .with_child(LayoutNode::new("3", "Btn", NodeKind::Instance)),
            )
            .with_child(LayoutNode::text("4", "Body", "Text"));

        let metrics = compute_metrics(&tree);
        assert_eq!(metrics.total_nodes, 5);
        assert_eq!(metrics.nodes_per_depth, vec![1, 2, 2]);
        assert_eq!(metrics.max_depth, 2);
        assert_eq!(metrics.kind_distribution.get("TEXT"), Some(&2));
        assert_eq!(metrics.container_count, 2);
        assert_eq!(metrics.parent_count, 2);
        assert_eq!(metrics.average_fan_out, 2.0);
        assert_eq!(metrics.fan_out_histogram.get(&2), Some(&2));
        assert_eq!(metrics.text_density, 0.4);
        assert_eq!(metrics.component_density, 0.2);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.0 / 3.0, 3), 0.333);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
    }
}

//! Layout pattern detection over sibling groups.

use crate::metrics::{compute_metrics, LayoutMetrics};
use designmap_core::{
    AxisSizingMode, BoundingBox, GridPattern, LayoutNode, LayoutWrap,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Maximum gap difference, in pixels, for spacing to count as equal.
const SPACING_TOLERANCE: f64 = 1.0;

/// Edge spread, in pixels, under which siblings count as aligned.
const ALIGNMENT_TOLERANCE: f64 = 2.0;

/// Spacing regularity of a sibling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingPattern {
    Horizontal { gap: i64 },
    Vertical { gap: i64 },
    Irregular,
}

impl fmt::Display for SpacingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal { gap } => write!(f, "horizontal_equal_spacing_{}px", gap),
            Self::Vertical { gap } => write!(f, "vertical_equal_spacing_{}px", gap),
            Self::Irregular => f.write_str("irregular_spacing"),
        }
    }
}

/// Shared edge or center of a sibling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    CenterX,
    CenterY,
}

impl Alignment {
    /// Checked in this order; the first match wins.
    const PRECEDENCE: [Alignment; 6] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::CenterX,
        Self::CenterY,
    ];

    fn edge(&self, bounds: &BoundingBox) -> f64 {
        match self {
            Self::Left => bounds.x,
            Self::Right => bounds.right(),
            Self::Top => bounds.y,
            Self::Bottom => bounds.bottom(),
            Self::CenterX => bounds.center_x(),
            Self::CenterY => bounds.center_y(),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
        };
        write!(f, "{}_aligned", name)
    }
}

/// Responsive behavior of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsivePattern {
    AutoLayout { axis: &'static str, wrap: bool },
    Constraints,
}

impl fmt::Display for ResponsivePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoLayout { axis, wrap } => {
                write!(f, "{}_auto_layout", axis)?;
                if *wrap {
                    f.write_str("_wrap")?;
                }
                Ok(())
            }
            Self::Constraints => f.write_str("responsive_constraints"),
        }
    }
}

/// A pattern detected on one container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternRecord {
    pub node_id: String,
    pub node_name: String,
    pub pattern: String,
    pub children_count: usize,
}

impl PatternRecord {
    fn new(node: &LayoutNode, pattern: impl fmt::Display) -> Self {
        Self {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            pattern: pattern.to_string(),
            children_count: node.children.len(),
        }
    }
}

/// A layout grid declared on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRecord {
    pub node_id: String,
    pub node_name: String,
    pub pattern: GridPattern,
    pub section_size: Option<f64>,
    pub gutter_size: Option<f64>,
    pub alignment: Option<String>,
    pub count: Option<i64>,
    pub offset: Option<f64>,
}

/// Patterns and metrics of a whole tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutAnalysis {
    pub grids: Vec<GridRecord>,
    pub spacing_patterns: Vec<PatternRecord>,
    pub alignment_patterns: Vec<PatternRecord>,
    pub responsive_patterns: Vec<PatternRecord>,
    pub metrics: LayoutMetrics,
}

/// Detect spacing, alignment, responsive and grid patterns in `root`.
pub fn analyze_layout(root: &LayoutNode) -> LayoutAnalysis {
    let mut grids = Vec::new();
    let mut spacing_patterns = Vec::new();
    let mut alignment_patterns = Vec::new();
    let mut responsive_patterns = Vec::new();

    for (_, node) in root.iter() {
        grids.extend(node.layout_grids.iter().map(|grid| GridRecord {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            pattern: grid.pattern,
            section_size: grid.section_size,
            gutter_size: grid.gutter_size,
            alignment: grid.alignment.clone(),
            count: grid.count,
            offset: grid.offset,
        }));

        if node.children.is_empty() {
            continue;
        }

        let boxes: Vec<BoundingBox> = node
            .children
            .iter()
            .filter_map(|child| child.bounding_box)
            .collect();
        if let Some(spacing) = detect_spacing(&boxes) {
            spacing_patterns.push(PatternRecord::new(node, spacing));
        }
        if let Some(alignment) = detect_alignment(&boxes) {
            alignment_patterns.push(PatternRecord::new(node, alignment));
        }
        for pattern in detect_responsive(node) {
            responsive_patterns.push(PatternRecord::new(node, pattern));
        }
    }

    let metrics = compute_metrics(root);
    debug!(
        spacing = spacing_patterns.len(),
        alignment = alignment_patterns.len(),
        responsive = responsive_patterns.len(),
        grids = grids.len(),
        "layout analysis complete"
    );

    LayoutAnalysis {
        grids,
        spacing_patterns,
        alignment_patterns,
        responsive_patterns,
        metrics,
    }
}

/// Classify the spacing of sibling boxes; `None` for fewer than two.
pub fn detect_spacing(boxes: &[BoundingBox]) -> Option<SpacingPattern> {
    if boxes.len() < 2 {
        return None;
    }

    let mut by_x = boxes.to_vec();
    by_x.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let horizontal: Vec<f64> = by_x.windows(2).map(|w| w[1].x - w[0].right()).collect();
    if let Some(gap) = equal_gap(&horizontal) {
        return Some(SpacingPattern::Horizontal { gap });
    }

    let mut by_y = boxes.to_vec();
    by_y.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    let vertical: Vec<f64> = by_y.windows(2).map(|w| w[1].y - w[0].bottom()).collect();
    if let Some(gap) = equal_gap(&vertical) {
        return Some(SpacingPattern::Vertical { gap });
    }

    Some(SpacingPattern::Irregular)
}

/// Rounded common gap if every gap is non-overlapping and within tolerance.
fn equal_gap(gaps: &[f64]) -> Option<i64> {
    let first = *gaps.first()?;
    let regular = gaps
        .iter()
        .all(|gap| *gap >= -SPACING_TOLERANCE && (gap - first).abs() <= SPACING_TOLERANCE);
    regular.then(|| first.round().max(0.0) as i64)
}

/// First shared edge of sibling boxes; `None` for fewer than two.
pub fn detect_alignment(boxes: &[BoundingBox]) -> Option<Alignment> {
    if boxes.len() < 2 {
        return None;
    }
    Alignment::PRECEDENCE.into_iter().find(|alignment| {
        let (min, max) = boxes.iter().map(|b| alignment.edge(b)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), v| (min.min(v), max.max(v)),
        );
        max - min < ALIGNMENT_TOLERANCE
    })
}

/// Responsive signals of a container with at least one child.
pub fn detect_responsive(node: &LayoutNode) -> Vec<ResponsivePattern> {
    let mut patterns = Vec::new();
    if node.children.is_empty() {
        return patterns;
    }

    if let Some(axis) = node.layout_mode.and_then(|mode| mode.axis_name()) {
        let hugs = |mode: Option<AxisSizingMode>| mode == Some(AxisSizingMode::Auto);
        if hugs(node.primary_axis_sizing_mode) || hugs(node.counter_axis_sizing_mode) {
            patterns.push(ResponsivePattern::AutoLayout {
                axis,
                wrap: node.layout_wrap == Some(LayoutWrap::Wrap),
            });
        }
    }

    let responsive = node
        .children
        .iter()
        .filter(|child| child.constraints.is_some_and(|c| c.is_responsive()))
        .count();
    if responsive * 2 > node.children.len() {
        patterns.push(ResponsivePattern::Constraints);
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use designmap_core::{
        HorizontalConstraint, LayoutGrid, LayoutMode, NodeKind, VerticalConstraint,
    };

    fn bx(x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox::new(x, y, w, h)
    }

    #[test]
    fn test_horizontal_spacing() {
        let boxes = [bx(0.0, 0.0, 50.0, 20.0), bx(60.0, 0.0, 50.0, 20.0)];
        let pattern = detect_spacing(&boxes).unwrap();
        assert_eq!(pattern.to_string(), "horizontal_equal_spacing_10px");
    }

    #[test]
    fn test_vertical_spacing() {
        let boxes = [
            bx(0.0, 0.0, 100.0, 40.0),
            bx(0.0, 56.0, 100.0, 40.0),
            bx(0.0, 112.0, 100.0, 40.0),
        ];
        assert_eq!(detect_spacing(&boxes), Some(SpacingPattern::Vertical { gap: 16 }));
    }

    #[test]
    fn test_irregular_spacing() {
        let boxes = [
            bx(0.0, 0.0, 10.0, 10.0),
            bx(20.0, 40.0, 10.0, 10.0),
            bx(100.0, 45.0, 10.0, 10.0),
        ];
        assert_eq!(detect_spacing(&boxes), Some(SpacingPattern::Irregular));
        assert_eq!(detect_spacing(&boxes[..1]), None);
    }

    #[test]
    fn test_alignment_precedence() {
        let left = [bx(10.0, 0.0, 50.0, 10.0), bx(11.0, 30.0, 80.0, 10.0)];
        assert_eq!(detect_alignment(&left), Some(Alignment::Left));

        let centered = [bx(0.0, 0.0, 100.0, 10.0), bx(25.0, 30.0, 50.0, 10.0)];
        assert_eq!(detect_alignment(&centered).map(|a| a.to_string()).as_deref(), Some("center_x_aligned"));

        let scattered = [bx(0.0, 0.0, 10.0, 10.0), bx(50.0, 70.0, 30.0, 30.0)];
        assert_eq!(detect_alignment(&scattered), None);
    }

    #[test]
    fn test_auto_layout_and_constraints_both_recorded() {
        let node = LayoutNode::new("1", "Row", NodeKind::Frame)
            .with_auto_layout(LayoutMode::Horizontal, AxisSizingMode::Auto, AxisSizingMode::Fixed)
            .with_child(
                LayoutNode::new("2", "a", NodeKind::Rectangle)
                    .with_constraints(HorizontalConstraint::LeftRight, VerticalConstraint::Top),
            )
            .with_child(
                LayoutNode::new("3", "b", NodeKind::Rectangle)
                    .with_constraints(HorizontalConstraint::Scale, VerticalConstraint::Top),
            );
        let mut wrapped = node.clone();
        wrapped.layout_wrap = Some(LayoutWrap::Wrap);

        let tags: Vec<String> = detect_responsive(&node).iter().map(|p| p.to_string()).collect();
        assert_eq!(tags, vec!["horizontal_auto_layout", "responsive_constraints"]);
        assert_eq!(
            detect_responsive(&wrapped)[0].to_string(),
            "horizontal_auto_layout_wrap"
        );
    }

    #[test]
    fn test_fixed_sizing_is_not_responsive() {
        let node = LayoutNode::new("1", "Col", NodeKind::Frame)
            .with_auto_layout(LayoutMode::Vertical, AxisSizingMode::Fixed, AxisSizingMode::Fixed)
            .with_child(LayoutNode::new("2", "a", NodeKind::Rectangle));
        assert!(detect_responsive(&node).is_empty());
    }

    #[test]
    fn test_analyze_layout_records() {
        let mut root = LayoutNode::new("0", "Page", NodeKind::Frame)
            .with_bounds(0.0, 0.0, 400.0, 400.0)
            .with_child(LayoutNode::new("1", "A", NodeKind::Rectangle).with_bounds(0.0, 0.0, 50.0, 50.0))
            .with_child(LayoutNode::new("2", "B", NodeKind::Rectangle).with_bounds(60.0, 0.0, 50.0, 50.0));
        root.layout_grids.push(LayoutGrid {
            pattern: GridPattern::Columns,
            section_size: Some(80.0),
            gutter_size: Some(20.0),
            alignment: Some("STRETCH".to_string()),
            count: Some(12),
            offset: Some(0.0),
            visible: true,
        });

        let analysis = analyze_layout(&root);
        assert_eq!(analysis.spacing_patterns.len(), 1);
        assert_eq!(analysis.spacing_patterns[0].pattern, "horizontal_equal_spacing_10px");
        assert_eq!(analysis.alignment_patterns[0].pattern, "top_aligned");
        assert_eq!(analysis.grids.len(), 1);
        assert_eq!(analysis.grids[0].count, Some(12));
        assert_eq!(analysis.metrics.total_nodes, 3);
    }
}

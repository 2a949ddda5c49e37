//! Style extraction over a layout subtree.
//!
//! A single pre-order walk collects color, typography, shadow and size
//! tokens into insertion-ordered, deduplicated sets.

use designmap_core::{Effect, LayoutNode, NodeKind, Paint};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::debug;

/// Maximum number of characters kept as a text sample.
const SAMPLE_LEN: usize = 100;

/// Typography category derived from font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCategory {
    Heading,
    Subheading,
    BodyLarge,
    Body,
    Caption,
}

impl TextCategory {
    /// Classify a font size in pixels.
    pub fn from_font_size(size: f64) -> Self {
        if size >= 24.0 {
            Self::Heading
        } else if size >= 16.0 {
            Self::Subheading
        } else if size >= 14.0 {
            Self::BodyLarge
        } else if size >= 12.0 {
            Self::Body
        } else {
            Self::Caption
        }
    }

    /// Category name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Subheading => "subheading",
            Self::BodyLarge => "body_large",
            Self::Body => "body",
            Self::Caption => "caption",
        }
    }
}

/// Typography of one text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyleToken {
    pub font_family: String,
    pub font_weight: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub text_align: String,
    /// First solid fill of the node, if any.
    pub color: Option<String>,
    pub category: TextCategory,
    pub node_id: String,
    pub node_name: String,
    pub sample: String,
}

impl TextStyleToken {
    /// Read the typography of a node, defaulting missing fields.
    pub fn from_node(node: &LayoutNode) -> Self {
        let style = node.text_style.clone().unwrap_or_default();
        let font_size = style.font_size.unwrap_or(0.0);
        Self {
            font_family: style.font_family.unwrap_or_else(|| "Unknown".to_string()),
            font_weight: style.font_weight.unwrap_or(0.0),
            font_size,
            line_height: style.line_height_px.unwrap_or(0.0),
            letter_spacing: style.letter_spacing.unwrap_or(0.0),
            text_align: style
                .text_align_horizontal
                .unwrap_or_else(|| "LEFT".to_string()),
            color: node
                .fills
                .iter()
                .find_map(Paint::solid_color)
                .map(|c| c.to_css()),
            category: TextCategory::from_font_size(font_size),
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            sample: node
                .text_content()
                .unwrap_or_default()
                .chars()
                .take(SAMPLE_LEN)
                .collect(),
        }
    }

    /// Identity used for deduplication.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.font_family, self.font_weight, self.font_size, self.line_height
        )
    }
}

/// Text styles sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyleGroup {
    pub category: TextCategory,
    pub count: usize,
    pub styles: Vec<TextStyleToken>,
}

/// Deduplicated style tokens of a subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleDigest {
    pub colors: IndexSet<String>,
    pub text_styles: Vec<TextStyleToken>,
    pub shadows: IndexSet<String>,
    pub sizes: IndexSet<String>,
    pub layer_count: usize,
}

/// Token counts of a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleSummary {
    pub total_colors: usize,
    pub total_text_styles: usize,
    pub total_effects: usize,
    pub total_sizes: usize,
    pub layers_analyzed: usize,
}

impl StyleDigest {
    /// Token counts.
    pub fn summary(&self) -> StyleSummary {
        StyleSummary {
            total_colors: self.colors.len(),
            total_text_styles: self.text_styles.len(),
            total_effects: self.shadows.len(),
            total_sizes: self.sizes.len(),
            layers_analyzed: self.layer_count,
        }
    }

    /// Text styles grouped by category, in first-seen category order.
    pub fn text_style_groups(&self) -> Vec<TextStyleGroup> {
        let mut groups: IndexMap<TextCategory, Vec<TextStyleToken>> = IndexMap::new();
        for style in &self.text_styles {
            groups.entry(style.category).or_default().push(style.clone());
        }
        groups
            .into_iter()
            .map(|(category, styles)| TextStyleGroup {
                category,
                count: styles.len(),
                styles,
            })
            .collect()
    }

    /// Colors as CSS custom properties on `:root`.
    pub fn to_css_variables(&self) -> String {
        let mut lines = vec![":root {".to_string()];
        for (i, color) in self.colors.iter().enumerate() {
            lines.push(format!("  --color-{}: {};", i + 1, color));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// Walk `root` once and collect its style tokens.
pub fn extract_styles(root: &LayoutNode) -> StyleDigest {
    let mut digest = StyleDigest::default();
    let mut seen_text = IndexSet::new();

    for (_, node) in root.iter() {
        digest.layer_count += 1;

        for paint in node.fills.iter().chain(&node.strokes) {
            if let Some(color) = paint.solid_color() {
                digest.colors.insert(color.to_css());
            }
        }

        if node.kind == NodeKind::Text {
            let token = TextStyleToken::from_node(node);
            if seen_text.insert(token.fingerprint()) {
                digest.text_styles.push(token);
            }
        }

        for effect in &node.effects {
            if let Effect::DropShadow(shadow) = effect {
                digest.shadows.insert(format!(
                    "{}px {}px {}px {}",
                    format_px(shadow.offset.x),
                    format_px(shadow.offset.y),
                    format_px(shadow.radius),
                    shadow.color.to_rgba_css()
                ));
            }
        }

        if let Some(bounds) = node.bounding_box {
            digest.sizes.insert(format!("width: {}px", format_px(bounds.width)));
            digest.sizes.insert(format!("height: {}px", format_px(bounds.height)));
        }
    }

    debug!(
        layers = digest.layer_count,
        colors = digest.colors.len(),
        text_styles = digest.text_styles.len(),
        "style extraction complete"
    );
    digest
}

/// Format a pixel quantity, dropping a zero fraction.
pub fn format_px(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use designmap_core::{Color, TypeStyle};

    fn sample_tree() -> LayoutNode {
        LayoutNode::new("0:1", "Page", NodeKind::Frame)
            .with_bounds(0.0, 0.0, 400.0, 300.0)
            .with_fill(Paint::solid(Color::rgb(1.0, 1.0, 1.0)))
            .with_effect(Effect::drop_shadow(Color::new(0.0, 0.0, 0.0, 0.25), 0.0, 4.0, 8.0))
            .with_child(
                LayoutNode::text("0:2", "Title", "Welcome")
                    .with_bounds(16.0, 16.0, 200.0, 32.0)
                    .with_text_style(TypeStyle::new("Inter", 700.0, 24.0).with_line_height(32.0))
                    .with_fill(Paint::solid(Color::rgb(0.0, 0.0, 0.0))),
            )
            .with_child(
                LayoutNode::text("0:3", "Subtitle", "Hello again")
                    .with_bounds(16.0, 56.0, 200.0, 32.0)
                    .with_text_style(TypeStyle::new("Inter", 700.0, 24.0).with_line_height(32.0))
                    .with_stroke(Paint::solid(Color::new(1.0, 0.0, 0.0, 0.5))),
            )
    }

    #[test]
    fn test_extract_styles() {
        let digest = extract_styles(&sample_tree());

        assert_eq!(digest.layer_count, 3);
        assert_eq!(
            digest.colors.iter().cloned().collect::<Vec<_>>(),
            vec!["rgb(255, 255, 255)", "rgb(0, 0, 0)", "rgba(255, 0, 0, 0.5)"]
        );
        assert_eq!(digest.text_styles.len(), 1);
        assert_eq!(digest.text_styles[0].node_name, "Title");
        assert_eq!(digest.text_styles[0].category, TextCategory::Heading);
        assert_eq!(
            digest.shadows.iter().next().map(String::as_str),
            Some("0px 4px 8px rgba(0, 0, 0, 0.25)")
        );
        assert!(digest.sizes.contains("width: 400px"));
        assert!(digest.sizes.contains("height: 32px"));
        assert_eq!(digest.sizes.len(), 4);
    }

    #[test]
    fn test_text_defaults() {
        let token = TextStyleToken::from_node(&LayoutNode::text("1", "t", "x"));
        assert_eq!(token.font_family, "Unknown");
        assert_eq!(token.font_size, 0.0);
        assert_eq!(token.category, TextCategory::Caption);
    }

    #[test]
    fn test_text_categories() {
        assert_eq!(TextCategory::from_font_size(32.0), TextCategory::Heading);
        assert_eq!(TextCategory::from_font_size(16.0), TextCategory::Subheading);
        assert_eq!(TextCategory::from_font_size(14.0), TextCategory::BodyLarge);
        assert_eq!(TextCategory::from_font_size(12.0), TextCategory::Body);
        assert_eq!(TextCategory::from_font_size(10.0), TextCategory::Caption);
    }

    #[test]
    fn test_css_variables() {
        let digest = extract_styles(&sample_tree());
        assert_eq!(
            digest.to_css_variables(),
            ":root {\n  --color-1: rgb(255, 255, 255);\n  --color-2: rgb(0, 0, 0);\n  --color-3: rgba(255, 0, 0, 0.5);\n}"
        );
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(100.0), "100");
        assert_eq!(format_px(12.5), "12.5");
        assert_eq!(format_px(-4.0), "-4");
    }
}

//! Color palette with usage and tone classification.

use designmap_core::{Color, Effect, LayoutNode};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Where a color was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorUsage {
    Fill,
    Stroke,
    Shadow,
}

impl ColorUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::Shadow => "shadow",
        }
    }
}

/// Brightness bucket by mean channel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Light,
    Medium,
    Dark,
}

impl Tone {
    pub fn of(color: &Color) -> Self {
        let brightness = color.brightness();
        if brightness > 0.7 {
            Self::Light
        } else if brightness < 0.3 {
            Self::Dark
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }
}

/// Geometry of the shadow a color came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowGeometry {
    pub offset_x: f64,
    pub offset_y: f64,
    pub radius: f64,
    pub spread: f64,
}

/// One unique color of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSwatch {
    pub color: String,
    pub rgb: Color,
    pub opacity: f64,
    pub usage: ColorUsage,
    pub tone: Tone,
    /// `<usage>_<tone>`.
    pub category: String,
    pub node_id: String,
    pub node_name: String,
    pub node_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowGeometry>,
}

/// Swatches sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteGroup {
    pub category: String,
    pub count: usize,
    pub colors: Vec<ColorSwatch>,
}

/// Collect unique colors from fills, strokes and drop shadows.
///
/// A color is attributed to the first node and usage it was seen with.
pub fn extract_palette(root: &LayoutNode) -> Vec<ColorSwatch> {
    let mut seen = IndexSet::new();
    let mut swatches = Vec::new();

    for (_, node) in root.iter() {
        let fills = node.fills.iter().map(|p| (p.solid_color(), ColorUsage::Fill, None));
        let strokes = node.strokes.iter().map(|p| (p.solid_color(), ColorUsage::Stroke, None));
        let shadows = node.effects.iter().map(|effect| match effect {
            Effect::DropShadow(shadow) => (
                Some(shadow.color),
                ColorUsage::Shadow,
                Some(ShadowGeometry {
                    offset_x: shadow.offset.x,
                    offset_y: shadow.offset.y,
                    radius: shadow.radius,
                    spread: shadow.spread,
                }),
            ),
            _ => (None, ColorUsage::Shadow, None),
        });

        for (color, usage, shadow) in fills.chain(strokes).chain(shadows) {
            let Some(color) = color else { continue };
            let css = color.to_css();
            if !seen.insert(css.clone()) {
                continue;
            }
            let tone = Tone::of(&color);
            swatches.push(ColorSwatch {
                color: css,
                rgb: color,
                opacity: color.a,
                usage,
                tone,
                category: format!("{}_{}", usage.as_str(), tone.as_str()),
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                node_kind: node.kind.to_string(),
                shadow,
            });
        }
    }

    swatches
}

/// Group swatches by category, in first-seen category order.
pub fn group_palette(swatches: &[ColorSwatch]) -> Vec<PaletteGroup> {
    let mut groups: IndexMap<&str, Vec<ColorSwatch>> = IndexMap::new();
    for swatch in swatches {
        groups
            .entry(swatch.category.as_str())
            .or_default()
            .push(swatch.clone());
    }
    groups
        .into_iter()
        .map(|(category, colors)| PaletteGroup {
            category: category.to_string(),
            count: colors.len(),
            colors,
        })
        .collect()
}

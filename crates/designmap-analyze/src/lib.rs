//! Layout analysis for designmap.
//!
//! Every function here is a pure pass over a borrowed [`LayoutNode`] tree:
//!
//! - [`extract_styles`] - deduplicated color, typography, shadow and size tokens
//! - [`extract_palette`] - unique colors with usage and tone
//! - [`flatten`] - pre-order, path-annotated element list
//! - [`analyze_layout`] - spacing, alignment, responsive and grid patterns
//! - [`inventory`] - component definitions and instances
//! - [`structure`] - depth-limited structural summary
//!
//! [`LayoutNode`]: designmap_core::LayoutNode

pub mod flatten;
pub mod inventory;
pub mod metrics;
pub mod palette;
pub mod patterns;
pub mod structure;
pub mod styles;

pub use flatten::{flatten, is_mappable_kind, mappable, ElementFlags, FlatElement};
pub use inventory::{
    inventory, summarize_overrides, ComponentDefinitionInfo, ComponentInventory, InstanceInfo,
    OverrideEntry, OverrideSummary,
};
pub use metrics::{compute_metrics, round_to, LayoutMetrics};
pub use palette::{extract_palette, group_palette, ColorSwatch, ColorUsage, PaletteGroup, Tone};
pub use patterns::{
    analyze_layout, detect_alignment, detect_responsive, detect_spacing, Alignment, GridRecord,
    LayoutAnalysis, PatternRecord, ResponsivePattern, SpacingPattern,
};
pub use structure::{structure, StructureNode};
pub use styles::{extract_styles, StyleDigest, StyleSummary, TextCategory, TextStyleGroup, TextStyleToken};

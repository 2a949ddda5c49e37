//! Core data model for designmap.
//!
//! This crate provides the layout tree decoded from design-tool documents,
//! the UI component catalog model, and the error types shared by the
//! analysis, matching, and code generation crates.

pub mod catalog;
pub mod errors;
pub mod node;

pub use catalog::{CatalogComponent, ComponentKind, PropDef, PropType, Token, TokenKind, VariantDef};
pub use errors::{CatalogError, ConfigError, DesignMapError, Result};
pub use node::{
    AxisSizingMode, Blur, BoundingBox, Color, ColorStop, ComponentProperty,
    ComponentPropertyDefinition, ComponentPropertyType, Effect, GradientPaint, GridPattern,
    HorizontalConstraint, LayoutConstraint, LayoutGrid, LayoutMode, LayoutNode, LayoutWrap,
    NodeIter, NodeKind, Override, Paint, Shadow, TypeStyle, Vector2, VerticalConstraint,
};

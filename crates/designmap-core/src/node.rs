//! Layout tree decoded from design-tool document JSON.
//!
//! Every open-ended part of the source document (paints, effects, property
//! values) is decoded once into a tagged type with an explicit unknown case,
//! so analysis stages never probe raw maps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

/// Kind of a layout node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Line,
    Star,
    Polygon,
    BooleanOperation,
    Slice,
    Instance,
    Component,
    ComponentSet,
    /// Any type name the engine does not model.
    Other(String),
}

impl NodeKind {
    /// The design tool's type name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Canvas => "CANVAS",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Text => "TEXT",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Vector => "VECTOR",
            Self::Line => "LINE",
            Self::Star => "STAR",
            Self::Polygon => "REGULAR_POLYGON",
            Self::BooleanOperation => "BOOLEAN_OPERATION",
            Self::Slice => "SLICE",
            Self::Instance => "INSTANCE",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Other(name) => name,
        }
    }

    /// Basic vector shapes.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Self::Rectangle
                | Self::Ellipse
                | Self::Vector
                | Self::Line
                | Self::Star
                | Self::Polygon
                | Self::BooleanOperation
        )
    }

    /// Structural containers counted by layout metrics.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Frame | Self::Group | Self::Section)
    }

    /// Component definitions, sets, and instances.
    pub fn is_component_like(&self) -> bool {
        matches!(self, Self::Component | Self::ComponentSet | Self::Instance)
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other("UNKNOWN".to_string())
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DOCUMENT" => Self::Document,
            "CANVAS" => Self::Canvas,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "TEXT" => Self::Text,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "VECTOR" => Self::Vector,
            "LINE" => Self::Line,
            "STAR" => Self::Star,
            "REGULAR_POLYGON" => Self::Polygon,
            "BOOLEAN_OPERATION" => Self::BooleanOperation,
            "SLICE" => Self::Slice,
            "INSTANCE" => Self::Instance,
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned bounding box in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl BoundingBox {
    /// Create a box from position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default = "default_one")]
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }
}

impl Color {
    /// Create a color from unit channels.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Channels scaled to bytes.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Canonical CSS form: `rgb(r, g, b)` when opaque, else `rgba(r, g, b, a)`.
    pub fn to_css(&self) -> String {
        if self.a == 1.0 {
            let [r, g, b] = self.to_rgb8();
            format!("rgb({}, {}, {})", r, g, b)
        } else {
            self.to_rgba_css()
        }
    }

    /// Always the four-channel form.
    pub fn to_rgba_css(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({}, {}, {}, {})", r, g, b, self.a)
    }

    /// Mean of the three color channels.
    pub fn brightness(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// 2D offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    #[serde(default)]
    pub position: f64,
    #[serde(default)]
    pub color: Color,
}

/// Gradient paint payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    #[serde(default)]
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_one")]
    pub opacity: f64,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid {
        #[serde(default)]
        color: Color,
        #[serde(default = "default_true")]
        visible: bool,
        #[serde(default = "default_one")]
        opacity: f64,
    },
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image {
        #[serde(rename = "imageRef", default)]
        image_ref: Option<String>,
        #[serde(rename = "scaleMode", default)]
        scale_mode: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl Paint {
    /// Opaque solid paint.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color, visible: true, opacity: 1.0 }
    }

    /// Color of a solid paint.
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Self::Solid { color, .. } => Some(*color),
            _ => None,
        }
    }
}

/// Shadow effect payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Shadow {
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub offset: Vector2,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Blur effect payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Blur {
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// A visual effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(Shadow),
    InnerShadow(Shadow),
    LayerBlur(Blur),
    BackgroundBlur(Blur),
    #[serde(other)]
    Unknown,
}

impl Effect {
    /// Drop shadow with the given geometry.
    pub fn drop_shadow(color: Color, x: f64, y: f64, radius: f64) -> Self {
        Self::DropShadow(Shadow {
            color,
            offset: Vector2 { x, y },
            radius,
            spread: 0.0,
            visible: true,
        })
    }
}

/// Typography attached to a text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_height_px: Option<f64>,
    #[serde(default)]
    pub line_height_percent: Option<f64>,
    #[serde(default)]
    pub letter_spacing: Option<f64>,
    #[serde(default)]
    pub text_align_horizontal: Option<String>,
    #[serde(default)]
    pub text_case: Option<String>,
    #[serde(default)]
    pub text_decoration: Option<String>,
}

impl TypeStyle {
    /// Style with family, weight and size set.
    pub fn new(family: impl Into<String>, weight: f64, size: f64) -> Self {
        Self {
            font_family: Some(family.into()),
            font_weight: Some(weight),
            font_size: Some(size),
            ..Self::default()
        }
    }

    /// Set the line height in pixels.
    pub fn with_line_height(mut self, px: f64) -> Self {
        self.line_height_px = Some(px);
        self
    }
}

/// Auto-layout direction of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[serde(rename = "NONE")]
    NoLayout,
    Horizontal,
    Vertical,
    Grid,
    #[serde(other)]
    Unknown,
}

impl LayoutMode {
    /// Axis name used in pattern tags, for the two flow directions.
    pub fn axis_name(&self) -> Option<&'static str> {
        match self {
            Self::Horizontal => Some("horizontal"),
            Self::Vertical => Some("vertical"),
            _ => None,
        }
    }
}

/// Sizing behavior along an auto-layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisSizingMode {
    #[default]
    Fixed,
    Auto,
    #[serde(other)]
    Unknown,
}

/// Wrapping behavior of an auto-layout frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    #[default]
    NoWrap,
    Wrap,
    #[serde(other)]
    Unknown,
}

/// Horizontal resizing constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalConstraint {
    #[default]
    Left,
    Right,
    Center,
    LeftRight,
    Scale,
    #[serde(other)]
    Unknown,
}

/// Vertical resizing constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalConstraint {
    #[default]
    Top,
    Bottom,
    Center,
    TopBottom,
    Scale,
    #[serde(other)]
    Unknown,
}

/// Resizing constraints of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutConstraint {
    #[serde(default)]
    pub horizontal: HorizontalConstraint,
    #[serde(default)]
    pub vertical: VerticalConstraint,
}

impl LayoutConstraint {
    /// True when either axis stretches, centers, or scales with the parent.
    pub fn is_responsive(&self) -> bool {
        matches!(
            self.horizontal,
            HorizontalConstraint::LeftRight | HorizontalConstraint::Center | HorizontalConstraint::Scale
        ) || matches!(
            self.vertical,
            VerticalConstraint::TopBottom | VerticalConstraint::Center | VerticalConstraint::Scale
        )
    }
}

/// Layout grid pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridPattern {
    Columns,
    Rows,
    Grid,
    #[serde(other)]
    Unknown,
}

/// A layout grid declared on a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutGrid {
    pub pattern: GridPattern,
    #[serde(default)]
    pub section_size: Option<f64>,
    #[serde(default)]
    pub gutter_size: Option<f64>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub offset: Option<f64>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Type of a component property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentPropertyType {
    Boolean,
    Text,
    InstanceSwap,
    Variant,
    #[serde(other)]
    Unknown,
}

/// A property value set on a component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentProperty {
    #[serde(rename = "type")]
    pub property_type: ComponentPropertyType,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ComponentProperty {
    /// Variant property with a string value.
    pub fn variant(value: impl Into<String>) -> Self {
        Self {
            property_type: ComponentPropertyType::Variant,
            value: serde_json::Value::String(value.into()),
        }
    }

    /// Text property.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            property_type: ComponentPropertyType::Text,
            value: serde_json::Value::String(value.into()),
        }
    }

    /// Boolean property.
    pub fn boolean(value: bool) -> Self {
        Self {
            property_type: ComponentPropertyType::Boolean,
            value: serde_json::Value::Bool(value),
        }
    }
}

/// A property declared by a component definition or set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPropertyDefinition {
    #[serde(rename = "type")]
    pub property_type: ComponentPropertyType,
    #[serde(default)]
    pub default_value: serde_json::Value,
    #[serde(default)]
    pub variant_options: Option<Vec<String>>,
}

/// Fields overridden on a node inside an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    pub id: String,
    #[serde(default)]
    pub overridden_fields: Vec<String>,
}

/// One node of the design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(rename = "absoluteBoundingBox", default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(rename = "style", default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TypeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(rename = "componentProperties", default, skip_serializing_if = "IndexMap::is_empty")]
    pub instance_properties: IndexMap<String, ComponentProperty>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub component_property_definitions: IndexMap<String, ComponentPropertyDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_axis_sizing_mode: Option<AxisSizingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_axis_sizing_mode: Option<AxisSizingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_wrap: Option<LayoutWrap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<LayoutConstraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout_grids: Vec<LayoutGrid>,
    #[serde(default)]
    pub children: Vec<LayoutNode>,
}

impl Default for LayoutNode {
    fn default() -> Self {
        Self::new("", "", NodeKind::default())
    }
}

impl LayoutNode {
    /// Create a visible node with no children.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            bounding_box: None,
            visible: true,
            locked: false,
            opacity: 1.0,
            fills: Vec::new(),
            strokes: Vec::new(),
            effects: Vec::new(),
            text_style: None,
            characters: None,
            component_id: None,
            instance_properties: IndexMap::new(),
            component_property_definitions: IndexMap::new(),
            overrides: Vec::new(),
            key: None,
            description: None,
            layout_mode: None,
            primary_axis_sizing_mode: None,
            counter_axis_sizing_mode: None,
            layout_wrap: None,
            item_spacing: None,
            constraints: None,
            layout_grids: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node with content.
    pub fn text(id: impl Into<String>, name: impl Into<String>, characters: impl Into<String>) -> Self {
        let mut node = Self::new(id, name, NodeKind::Text);
        node.characters = Some(characters.into());
        node
    }

    /// Set the bounding box.
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox::new(x, y, width, height));
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add several child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = LayoutNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add a fill paint.
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Add a stroke paint.
    pub fn with_stroke(mut self, paint: Paint) -> Self {
        self.strokes.push(paint);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the text style.
    pub fn with_text_style(mut self, style: TypeStyle) -> Self {
        self.text_style = Some(style);
        self
    }

    /// Set the referenced main component.
    pub fn with_component_id(mut self, id: impl Into<String>) -> Self {
        self.component_id = Some(id.into());
        self
    }

    /// Set an instance property.
    pub fn with_instance_property(mut self, name: impl Into<String>, value: ComponentProperty) -> Self {
        self.instance_properties.insert(name.into(), value);
        self
    }

    /// Declare a component property.
    pub fn with_property_definition(
        mut self,
        name: impl Into<String>,
        definition: ComponentPropertyDefinition,
    ) -> Self {
        self.component_property_definitions.insert(name.into(), definition);
        self
    }

    /// Set auto-layout mode and axis sizing.
    pub fn with_auto_layout(
        mut self,
        mode: LayoutMode,
        primary: AxisSizingMode,
        counter: AxisSizingMode,
    ) -> Self {
        self.layout_mode = Some(mode);
        self.primary_axis_sizing_mode = Some(primary);
        self.counter_axis_sizing_mode = Some(counter);
        self
    }

    /// Set resizing constraints.
    pub fn with_constraints(mut self, horizontal: HorizontalConstraint, vertical: VerticalConstraint) -> Self {
        self.constraints = Some(LayoutConstraint { horizontal, vertical });
        self
    }

    /// Text content, if this is a text node with characters.
    pub fn text_content(&self) -> Option<&str> {
        self.characters.as_deref()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count_nodes(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order iterator over this subtree with depths relative to this node.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![(0, self)] }
    }

    /// Find a descendant (or this node) by id.
    pub fn find(&self, id: &str) -> Option<&LayoutNode> {
        self.iter().map(|(_, node)| node).find(|node| node.id == id)
    }
}

/// Pre-order traversal yielding `(depth, node)`.
pub struct NodeIter<'a> {
    stack: Vec<(usize, &'a LayoutNode)>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (usize, &'a LayoutNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

//! Catalog of reusable UI components.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether a catalog entry is a single component or a set of variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    #[default]
    Component,
    ComponentSet,
}

/// Declared type of a component prop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropType {
    Variant,
    Text,
    Boolean,
    Number,
    InstanceSwap,
    Other(String),
}

impl PropType {
    /// Type name as it appears in catalog data.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Variant => "VARIANT",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Number => "NUMBER",
            Self::InstanceSwap => "INSTANCE_SWAP",
            Self::Other(name) => name,
        }
    }

    /// TypeScript type used when emitting prop interfaces.
    pub fn typescript_type(&self) -> &'static str {
        match self {
            Self::Variant | Self::Text | Self::InstanceSwap => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Other(_) => "any",
        }
    }
}

impl From<String> for PropType {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "VARIANT" => Self::Variant,
            "TEXT" | "STRING" => Self::Text,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "NUMBER" => Self::Number,
            "INSTANCE_SWAP" => Self::InstanceSwap,
            _ => Self::Other(value),
        }
    }
}

impl From<PropType> for String {
    fn from(value: PropType) -> Self {
        value.as_str().to_string()
    }
}

/// A prop declared by a catalog component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDef {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: PropType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropDef {
    /// Create an optional prop.
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            required: false,
            default_value: None,
            enum_values: None,
        }
    }

    /// Mark the prop as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the allowed values.
    pub fn with_enum_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// One variant of a component set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantDef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

impl VariantDef {
    /// Parse a `Key=Value, Key=Value` variant name into properties.
    pub fn from_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let properties = name
            .split(',')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { id: id.into(), name, properties }
    }
}

/// Kind of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Color,
    Typography,
    Spacing,
    Shadow,
    #[serde(other)]
    Other,
}

/// A design token used by a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default)]
    pub usage: String,
    pub value: String,
}

/// A reusable UI component definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogComponent {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ComponentKind,
    #[serde(default)]
    pub props: Vec<PropDef>,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl CatalogComponent {
    /// Create a component with only a name; the id defaults to the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: String::new(),
            kind: ComponentKind::Component,
            props: Vec::new(),
            variants: Vec::new(),
            import_path: None,
            tokens: Vec::new(),
        }
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the kind.
    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a prop.
    pub fn with_prop(mut self, prop: PropDef) -> Self {
        self.props.push(prop);
        self
    }

    /// Add a variant.
    pub fn with_variant(mut self, variant: VariantDef) -> Self {
        self.variants.push(variant);
        self
    }

    /// Set the import path.
    pub fn with_import_path(mut self, path: impl Into<String>) -> Self {
        self.import_path = Some(path.into());
        self
    }

    /// Add a token.
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    /// Whether the component declares variants.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Look up a declared prop by exact name.
    pub fn prop(&self, name: &str) -> Option<&PropDef> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Whether a prop with this name is declared.
    pub fn declares_prop(&self, name: &str) -> bool {
        self.prop(name).is_some()
    }

    /// Props marked as required.
    pub fn required_props(&self) -> impl Iterator<Item = &PropDef> {
        self.props.iter().filter(|p| p.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_catalog_entry() {
        let component: CatalogComponent = serde_json::from_value(json!({
            "id": "btn",
            "name": "Button",
            "kind": "COMPONENT_SET",
            "props": [
                {"name": "variant", "type": "VARIANT", "enumValues": ["primary", "secondary"]},
                {"name": "label", "type": "TEXT", "required": true},
                {"name": "icon", "type": "SLOT"}
            ],
            "variants": [{"id": "1", "name": "variant=primary", "properties": {"variant": "primary"}}]
        }))
        .unwrap();

        assert_eq!(component.kind, ComponentKind::ComponentSet);
        assert_eq!(component.props[2].prop_type, PropType::Other("SLOT".to_string()));
        assert!(component.has_variants());
        assert_eq!(component.required_props().count(), 1);
        assert_eq!(component.import_path, None);
    }

    #[test]
    fn test_missing_name_is_a_decode_error() {
        let result: Result<CatalogComponent, _> = serde_json::from_value(json!({"id": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_typescript_types() {
        assert_eq!(PropType::Variant.typescript_type(), "string");
        assert_eq!(PropType::InstanceSwap.typescript_type(), "string");
        assert_eq!(PropType::Boolean.typescript_type(), "boolean");
        assert_eq!(PropType::Number.typescript_type(), "number");
        assert_eq!(PropType::Other("SLOT".into()).typescript_type(), "any");
    }

    #[test]
    fn test_variant_from_name() {
        let variant = VariantDef::from_name("1:5", "Size=Large, State=Hover");
        assert_eq!(variant.properties.get("Size").map(String::as_str), Some("Large"));
        assert_eq!(variant.properties.get("State").map(String::as_str), Some("Hover"));

        let plain = VariantDef::from_name("1:6", "Default");
        assert!(plain.properties.is_empty());
    }
}

//! Prop binding inference from layout elements.

use designmap_analyze::FlatElement;
use designmap_core::CatalogComponent;
use indexmap::IndexMap;
use serde_json::Value;

/// Prop name to bound value, in binding order.
pub type PropsBinding = IndexMap<String, Value>;

/// Props that can receive an element's text, in priority order.
const TEXT_PROPS: [&str; 6] = ["value", "text", "children", "label", "placeholder", "title"];

const BUTTON_KEYWORDS: [&str; 4] = ["button", "btn", "submit", "confirm"];

const INPUT_KEYWORDS: [&str; 3] = ["input", "field", "textfield"];

/// Infer prop values for `element` rendered as `component`.
///
/// Later rules overwrite earlier ones for the same prop.
pub fn bind_props(element: &FlatElement, component: &CatalogComponent) -> PropsBinding {
    let mut binding = PropsBinding::new();

    if element.is_instance() {
        for (name, property) in &element.instance_properties {
            binding.insert(name.clone(), property.value.clone());
        }
    }

    if element.flags.is_text {
        if let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) {
            let target = component
                .props
                .iter()
                .find(|p| TEXT_PROPS.contains(&p.name.to_lowercase().as_str()))
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "children".to_string());
            binding.insert(target, Value::String(text.to_string()));
        }
    }

    let name = element.name.to_lowercase();
    if BUTTON_KEYWORDS.iter().any(|k| name.contains(k)) {
        bind_button(&name, &mut binding);
    }
    if INPUT_KEYWORDS.iter().any(|k| name.contains(k)) {
        bind_input(&name, &mut binding);
    }

    binding
}

fn bind_button(name: &str, binding: &mut PropsBinding) {
    let variant = if name.contains("primary") {
        Some("primary")
    } else if name.contains("secondary") {
        Some("secondary")
    } else if name.contains("danger") || name.contains("delete") {
        Some("danger")
    } else {
        None
    };
    if let Some(variant) = variant {
        binding.insert("variant".to_string(), Value::from(variant));
    }

    let small = name.contains("small") || name.split(|c: char| !c.is_alphanumeric()).any(|t| t == "sm");
    if name.contains("large") || name.contains("big") {
        binding.insert("size".to_string(), Value::from("large"));
    } else if small {
        binding.insert("size".to_string(), Value::from("small"));
    }
}

fn bind_input(name: &str, binding: &mut PropsBinding) {
    let fields: &[(&str, &str)] = if name.contains("email") {
        &[("type", "email"), ("label", "Email"), ("placeholder", "Enter your email")]
    } else if name.contains("password") {
        &[("type", "password"), ("label", "Password"), ("placeholder", "Enter your password")]
    } else if name.contains("search") {
        &[("placeholder", "Search...")]
    } else {
        &[]
    };
    for (prop, value) in fields {
        binding.insert(prop.to_string(), Value::from(*value));
    }
}

/// Notes about a binding, with the unbound required props kept separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingNotes {
    pub messages: Vec<String>,
    pub missing_required: Vec<String>,
}

/// Warn about bound props the component does not declare and required
/// props left unbound.
pub fn mapping_notes(
    element: &FlatElement,
    component: &CatalogComponent,
    binding: &PropsBinding,
) -> MappingNotes {
    let mut notes = MappingNotes::default();

    if element.is_instance() {
        notes
            .messages
            .push("Element is an instance of a design component".to_string());
    }

    let unsupported: Vec<&str> = binding
        .keys()
        .filter(|key| !component.declares_prop(key))
        .map(String::as_str)
        .collect();
    if !unsupported.is_empty() {
        notes.messages.push(format!(
            "Some mapped props may not be supported by the component: {}",
            unsupported.join(", ")
        ));
    }

    notes.missing_required = component
        .required_props()
        .filter(|p| !binding.contains_key(&p.name))
        .map(|p| p.name.clone())
        .collect();
    if !notes.missing_required.is_empty() {
        notes.messages.push(format!(
            "Missing required props: {}",
            notes.missing_required.join(", ")
        ));
    }

    notes
}

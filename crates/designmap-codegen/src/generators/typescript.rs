//! TypeScript prop interfaces for catalog components.

use crate::config::is_identifier;
use designmap_core::CatalogComponent;

/// Props every generated interface accepts.
const PASS_THROUGH: [(&str, &str); 3] = [
    ("className", "string"),
    ("style", "React.CSSProperties"),
    ("children", "React.ReactNode"),
];

/// `interface {identifier}Props { ... }` for a component's declared props.
pub fn render_interface(component: &CatalogComponent, identifier: &str) -> String {
    let mut lines = vec![format!("interface {}Props {{", identifier)];

    for prop in &component.props {
        let optional = if prop.required { "" } else { "?" };
        let mut line = format!(
            "  {}{}: {};",
            property_key(&prop.name),
            optional,
            prop.prop_type.typescript_type()
        );
        if let Some(default) = &prop.default_value {
            line.push_str(&format!(" // default: {}", default));
        }
        lines.push(line);
    }

    for (name, ts_type) in PASS_THROUGH {
        if !component.declares_prop(name) {
            lines.push(format!("  {}?: {};", name, ts_type));
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}

fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "\\'"))
    }
}

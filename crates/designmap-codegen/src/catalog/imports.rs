//! Import path resolution for catalog components.

use convert_case::{Case, Casing};

/// Keyword to module name, checked in order.
const MODULES: &[(&str, &str)] = &[
    ("button", "Button"),
    ("input", "Input"),
    ("textarea", "Textarea"),
    ("select", "Select"),
    ("checkbox", "Checkbox"),
    ("radio", "Radio"),
    ("switch", "Switch"),
    ("modal", "Modal"),
    ("dialog", "Dialog"),
    ("card", "Card"),
    ("table", "Table"),
    ("dropdown", "Dropdown"),
    ("tooltip", "Tooltip"),
    ("popup", "Popup"),
    ("tabs", "Tabs"),
    ("accordion", "Accordion"),
    ("badge", "Badge"),
    ("avatar", "Avatar"),
    ("icon", "Icon"),
    ("spinner", "Spinner"),
    ("progress", "Progress"),
    ("skeleton", "Skeleton"),
    ("alert", "Alert"),
    ("notification", "Notification"),
    ("breadcrumbs", "Breadcrumbs"),
    ("pagination", "Pagination"),
    ("stepper", "Stepper"),
    ("rating", "Rating"),
    ("slider", "Slider"),
    ("datepicker", "DatePicker"),
    ("timepicker", "TimePicker"),
    ("calendar", "Calendar"),
    ("tree", "Tree"),
    ("menu", "Menu"),
    ("navbar", "Navbar"),
    ("sidebar", "Sidebar"),
    ("footer", "Footer"),
    ("layout", "Layout"),
    ("grid", "Grid"),
    ("flex", "Flex"),
    ("stack", "Stack"),
    ("container", "Container"),
    ("paper", "Paper"),
    ("box", "Box"),
    ("form", "Form"),
    ("formgroup", "FormGroup"),
    ("formcontrol", "FormControl"),
    ("formlabel", "FormLabel"),
    ("formhelpertext", "FormHelperText"),
    ("formerrormessage", "FormErrorMessage"),
];

/// Resolves import paths for components that do not declare one.
#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    base: Option<String>,
}

impl ImportResolver {
    /// Resolver rooted at a package, or at `./components` when `None`.
    pub fn new(base: Option<String>) -> Self {
        Self {
            base: base.map(|b| b.trim_end_matches('/').to_string()),
        }
    }

    /// Import path for a component name.
    pub fn resolve(&self, name: &str) -> String {
        let Some(base) = &self.base else {
            return format!("./components/{}", component_identifier(name));
        };
        match module_for(name) {
            Some(module) => format!("{}/{}", base, module),
            None => format!("{}/{}", base, component_identifier(name)),
        }
    }
}

/// First table module whose keyword is in the name, or contains it.
fn module_for(name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    MODULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword) || keyword.contains(lower.as_str()))
        .map(|(_, module)| *module)
}

/// PascalCase JSX identifier for a component name.
pub fn component_identifier(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let ident = spaced.to_case(Case::Pascal);
    match ident.chars().next() {
        None => "Component".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{}", ident),
        Some(_) => ident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_base() {
        let resolver = ImportResolver::new(Some("@acme/ui/".to_string()));
        assert_eq!(resolver.resolve("Primary Button"), "@acme/ui/Button");
        assert_eq!(resolver.resolve("DatePicker"), "@acme/ui/DatePicker");
        assert_eq!(resolver.resolve("Hero banner"), "@acme/ui/HeroBanner");
    }

    #[test]
    fn test_resolve_without_base() {
        let resolver = ImportResolver::default();
        assert_eq!(resolver.resolve("Button"), "./components/Button");
        assert_eq!(resolver.resolve("user card"), "./components/UserCard");
    }

    #[test]
    fn test_component_identifier() {
        assert_eq!(component_identifier("Button"), "Button");
        assert_eq!(component_identifier("Buttons/Primary"), "ButtonsPrimary");
        assert_eq!(component_identifier("icon-button"), "IconButton");
        assert_eq!(component_identifier("3 col grid"), "Component3ColGrid");
        assert_eq!(component_identifier("  "), "Component");
    }
}

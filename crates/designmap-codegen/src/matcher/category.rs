//! Component categories used by the kind match heuristic.

use designmap_core::NodeKind;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// What a catalog component appears to be, judging by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Input,
    TextArea,
    TextField,
    Button,
    Card,
    Container,
    Modal,
    Dialog,
    /// Every catalog entry belongs here.
    Component,
}

/// Name keyword per category, matched against the lower-cased name.
const KEYWORDS: &[(&str, Category)] = &[
    ("input", Category::Input),
    ("textarea", Category::TextArea),
    ("textfield", Category::TextField),
    ("button", Category::Button),
    ("card", Category::Card),
    ("container", Category::Container),
    ("modal", Category::Modal),
    ("dialog", Category::Dialog),
];

/// Small inline set of categories.
pub type Categories = SmallVec<[Category; 4]>;

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::TextArea => "textarea",
            Self::TextField => "textfield",
            Self::Button => "button",
            Self::Card => "card",
            Self::Container => "container",
            Self::Modal => "modal",
            Self::Dialog => "dialog",
            Self::Component => "component",
        }
    }

    /// Categories a component of this name belongs to.
    pub fn for_component_name(name: &str) -> Categories {
        let lower = name.to_lowercase();
        let mut categories: Categories = KEYWORDS
            .iter()
            .filter(|(keyword, _)| lower.contains(keyword))
            .map(|(_, category)| *category)
            .collect();
        categories.push(Category::Component);
        categories
    }

    /// Categories an element of this kind can stand in for.
    pub fn for_node_kind(kind: &NodeKind) -> &'static [Category] {
        match kind {
            NodeKind::Text => &[Category::Input, Category::TextArea, Category::TextField],
            NodeKind::Rectangle => &[Category::Button, Category::Card, Category::Container],
            NodeKind::Frame => &[Category::Modal, Category::Dialog, Category::Card],
            NodeKind::Instance | NodeKind::Component => &[Category::Component],
            _ => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First category shared by an element kind and a component's categories.
pub fn shared_category(kind: &NodeKind, categories: &[Category]) -> Option<Category> {
    Category::for_node_kind(kind)
        .iter()
        .copied()
        .find(|c| categories.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_categories() {
        assert_eq!(
            Category::for_component_name("Card Button").as_slice(),
            &[Category::Button, Category::Card, Category::Component]
        );
        assert_eq!(Category::for_component_name("Avatar").as_slice(), &[Category::Component]);
    }

    #[test]
    fn test_shared_category() {
        let button = Category::for_component_name("Button");
        assert_eq!(shared_category(&NodeKind::Rectangle, &button), Some(Category::Button));
        assert_eq!(shared_category(&NodeKind::Instance, &button), Some(Category::Component));
        assert_eq!(shared_category(&NodeKind::Text, &button), None);
        assert_eq!(shared_category(&NodeKind::Ellipse, &button), None);
    }
}

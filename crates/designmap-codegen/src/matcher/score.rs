//! Element to component similarity scoring.

use super::category::{shared_category, Category};
use crate::catalog::IndexedComponent;
use designmap_analyze::FlatElement;
use serde::Serialize;

const NAME_MATCH: f64 = 30.0;
const NAME_TOKEN_MATCH: f64 = 20.0;
const CATEGORY_MATCH: f64 = 40.0;
const INSTANCE_BONUS: f64 = 10.0;
const VARIANTS_BONUS: f64 = 5.0;

/// Maximum confidence.
pub const MAX_SCORE: f64 = 100.0;

/// Per-heuristic contributions to a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub name: f64,
    pub category: f64,
    pub instance: f64,
    pub variants: f64,
    /// Category behind `category`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_category: Option<Category>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        (self.name + self.category + self.instance + self.variants).min(MAX_SCORE)
    }

    /// One name contains the other; token overlap alone does not count.
    pub fn has_name_match(&self) -> bool {
        self.name >= NAME_MATCH
    }
}

/// Score each heuristic for one element and component.
pub fn breakdown(element: &FlatElement, component: &IndexedComponent) -> ScoreBreakdown {
    let element_name = element.name.to_lowercase();
    let matched_category = shared_category(&element.kind, &component.categories);

    ScoreBreakdown {
        name: name_similarity(&element_name, &component.name_lower),
        category: if matched_category.is_some() { CATEGORY_MATCH } else { 0.0 },
        instance: if element.is_instance() { INSTANCE_BONUS } else { 0.0 },
        variants: if component.component.has_variants() { VARIANTS_BONUS } else { 0.0 },
        matched_category,
    }
}

/// Confidence in `[0, 100]` that `element` is an instance of `component`.
pub fn score(element: &FlatElement, component: &IndexedComponent) -> f64 {
    breakdown(element, component).total()
}

fn name_similarity(element_name: &str, component_name: &str) -> f64 {
    if element_name.is_empty() || component_name.is_empty() {
        return 0.0;
    }
    if element_name.contains(component_name) || component_name.contains(element_name) {
        return NAME_MATCH;
    }
    if component_name
        .split_whitespace()
        .any(|token| element_name.contains(token))
    {
        return NAME_TOKEN_MATCH;
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImportResolver;
    use designmap_core::{CatalogComponent, LayoutNode, NodeKind, VariantDef};
    use proptest::prelude::*;

    fn indexed(component: CatalogComponent) -> IndexedComponent {
        IndexedComponent::new(component, &ImportResolver::default())
    }

    fn element(name: &str, kind: NodeKind) -> FlatElement {
        FlatElement::detached(&LayoutNode::new("1", name, kind))
    }

    #[test]
    fn test_instance_name_match() {
        let button = indexed(CatalogComponent::new("Button"));
        let b = breakdown(&element("Primary Button", NodeKind::Instance), &button);
        assert_eq!(b.name, 30.0);
        assert_eq!(b.category, 40.0);
        assert_eq!(b.instance, 10.0);
        assert_eq!(b.matched_category, Some(Category::Component));
        assert_eq!(b.total(), 80.0);
    }

    #[test]
    fn test_token_match_and_variants() {
        let card = indexed(
            CatalogComponent::new("Product Card").with_variant(VariantDef::from_name("2", "size=large")),
        );
        let b = breakdown(&element("Card / hero", NodeKind::Rectangle), &card);
        assert_eq!(b.name, 20.0);
        assert_eq!(b.category, 40.0);
        assert_eq!(b.variants, 5.0);
        assert_eq!(b.total(), 65.0);
    }

    #[test]
    fn test_empty_names_never_match() {
        let button = indexed(CatalogComponent::new("Button"));
        assert_eq!(score(&element("", NodeKind::Ellipse), &button), 0.0);
    }

    #[test]
    fn test_reverse_substring() {
        let button = indexed(CatalogComponent::new("Icon Button"));
        assert_eq!(breakdown(&element("icon", NodeKind::Vector), &button).name, 30.0);
    }

    fn kinds() -> impl Strategy<Value = NodeKind> {
        prop_oneof![
            Just(NodeKind::Instance),
            Just(NodeKind::Text),
            Just(NodeKind::Frame),
            Just(NodeKind::Rectangle),
            Just(NodeKind::Component),
            Just(NodeKind::Vector),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(
            element_name in "[a-zA-Z ]{0,16}",
            component_name in "[a-zA-Z ]{1,16}",
            kind in kinds(),
            variants in any::<bool>(),
        ) {
            let mut component = CatalogComponent::new(component_name);
            if variants {
                component = component.with_variant(VariantDef::from_name("v", "state=on"));
            }
            let s = score(&element(&element_name, kind), &indexed(component));
            prop_assert!((0.0..=MAX_SCORE).contains(&s));
        }
    }
}

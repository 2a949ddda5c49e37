//! Ranked suggestions for elements that were not mapped.

use super::score::ScoreBreakdown;
use crate::catalog::{component_identifier, Catalog};
use crate::config::MatchConfig;
use crate::model::Suggestion;
use designmap_analyze::FlatElement;

/// Top-scoring components above the suggestion floor.
///
/// `scores` holds one breakdown per catalog component, in catalog order.
/// Equal scores keep catalog order.
pub(crate) fn suggestions(
    element: &FlatElement,
    scores: &[ScoreBreakdown],
    catalog: &Catalog,
    config: &MatchConfig,
) -> Vec<Suggestion> {
    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .enumerate()
        .map(|(i, b)| (i, b.total()))
        .filter(|(_, score)| *score > config.suggestion_floor)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .take(config.max_suggestions)
        .filter_map(|(i, score)| {
            let indexed = catalog.components().get(i)?;
            Some(Suggestion {
                component_id: indexed.id().to_string(),
                component_name: indexed.name().to_string(),
                confidence: score,
                reason: reason(element, &scores[i]),
                example: format!("<{} />", component_identifier(indexed.name())),
            })
        })
        .collect()
}

/// Why a component was suggested: every signal that applies, joined
/// with `", "`.
fn reason(element: &FlatElement, breakdown: &ScoreBreakdown) -> String {
    let mut reasons = Vec::new();
    if breakdown.has_name_match() {
        reasons.push("name similarity".to_string());
    }
    if element.is_instance() {
        reasons.push("instance of a component".to_string());
    } else if let Some(category) = breakdown.matched_category {
        reasons.push(format!(
            "{} element matches {} component",
            element.kind.as_str().to_lowercase(),
            category
        ));
    }
    if reasons.is_empty() {
        reasons.push(format!("partial match (score: {})", breakdown.total()));
    }
    reasons.join(", ")
}

/// Reason recorded on an unmapped element.
pub(crate) fn unmapped_reason(best_score: f64) -> String {
    if best_score > 0.0 {
        "No component meets minimum confidence".to_string()
    } else {
        "No suitable component found".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_index;
    use crate::config::CatalogConfig;
    use crate::matcher::category::Category;
    use crate::matcher::score::breakdown;
    use designmap_core::{CatalogComponent, LayoutNode, NodeKind, VariantDef};

    #[test]
    fn test_ranked_suggestions() {
        let catalog = build_index(
            vec![
                CatalogComponent::new("Card"),
                CatalogComponent::new("Button"),
                CatalogComponent::new("Info Card").with_variant(VariantDef::from_name("1", "tone=muted")),
                CatalogComponent::new("Container"),
                CatalogComponent::new("Avatar"),
            ],
            &CatalogConfig::default(),
        );
        let element = FlatElement::detached(&LayoutNode::new("1", "Panel", NodeKind::Rectangle));
        let scores: Vec<_> = catalog.iter().map(|c| breakdown(&element, c)).collect();

        let suggestions = suggestions(&element, &scores, &catalog, &MatchConfig::default());
        let names: Vec<&str> = suggestions.iter().map(|s| s.component_name.as_str()).collect();
        assert_eq!(names, vec!["Info Card", "Card", "Button"]);
        assert_eq!(suggestions[0].confidence, 45.0);
        assert_eq!(suggestions[1].reason, "rectangle element matches card component");
        assert_eq!(suggestions[2].example, "<Button />");
    }

    #[test]
    fn test_reasons() {
        let element = FlatElement::detached(&LayoutNode::new("1", "Tile", NodeKind::Instance));
        let b = ScoreBreakdown { category: 40.0, instance: 10.0, ..ScoreBreakdown::default() };
        assert_eq!(reason(&element, &b), "instance of a component");

        let b = ScoreBreakdown { name: 30.0, category: 40.0, instance: 10.0, ..ScoreBreakdown::default() };
        assert_eq!(reason(&element, &b), "name similarity, instance of a component");

        // A token match alone is not a name match.
        let panel = FlatElement::detached(&LayoutNode::new("3", "Panel", NodeKind::Rectangle));
        let b = ScoreBreakdown { name: 20.0, ..ScoreBreakdown::default() };
        assert_eq!(reason(&panel, &b), "partial match (score: 20)");

        let b = ScoreBreakdown {
            name: 30.0,
            category: 40.0,
            matched_category: Some(Category::Button),
            ..ScoreBreakdown::default()
        };
        assert_eq!(reason(&panel, &b), "name similarity, rectangle element matches button component");

        let shape = FlatElement::detached(&LayoutNode::new("2", "Blob", NodeKind::Vector));
        let b = ScoreBreakdown { variants: 5.0, ..ScoreBreakdown::default() };
        assert_eq!(reason(&shape, &b), "partial match (score: 5)");
    }

    #[test]
    fn test_unmapped_reason() {
        assert_eq!(unmapped_reason(45.0), "No component meets minimum confidence");
        assert_eq!(unmapped_reason(0.0), "No suitable component found");
    }
}

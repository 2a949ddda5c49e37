//! Best-match assignment of layout elements to catalog components.

use super::score::{breakdown, ScoreBreakdown};
use super::stats::{recommendations, MappingStatistics};
use super::suggest::{suggestions, unmapped_reason};
use crate::catalog::Catalog;
use crate::config::MatchConfig;
use crate::error::Result;
use crate::model::{Mapping, MappingReport, UnmappedElement};
use designmap_analyze::FlatElement;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

enum Outcome {
    Mapped(Mapping),
    Unmapped(UnmappedElement),
}

/// Maps flattened elements onto a catalog.
#[derive(Debug, Clone)]
pub struct Mapper<'c> {
    catalog: &'c Catalog,
    config: MatchConfig,
}

impl<'c> Mapper<'c> {
    /// Create a mapper; the config is validated first.
    pub fn new(catalog: &'c Catalog, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Map every mappable element. Output order follows element order.
    pub fn map(&self, elements: &[FlatElement]) -> MappingReport {
        let candidates: Vec<&FlatElement> = elements.iter().filter(|e| e.is_mappable()).collect();
        debug!(
            elements = elements.len(),
            mappable = candidates.len(),
            components = self.catalog.len(),
            min_confidence = self.config.min_confidence,
            "mapping elements"
        );

        let outcomes = if self.config.parallel {
            self.map_parallel(&candidates)
        } else {
            self.map_sequential(&candidates)
        };

        let mut mappings = Vec::new();
        let mut unmapped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Mapped(mapping) => mappings.push(mapping),
                Outcome::Unmapped(element) => unmapped.push(element),
            }
        }

        let statistics = MappingStatistics::compute(elements, &mappings, &unmapped, self.catalog);
        let recommendations = recommendations(&statistics, &mappings, &unmapped);
        info!(
            mapped = mappings.len(),
            unmapped = unmapped.len(),
            average_confidence = statistics.average_confidence,
            "mapping complete"
        );

        MappingReport {
            mappings,
            unmapped,
            statistics,
            recommendations,
        }
    }

    fn map_sequential(&self, candidates: &[&FlatElement]) -> Vec<Outcome> {
        candidates.iter().map(|e| self.match_element(e)).collect()
    }

    #[cfg(feature = "parallel")]
    fn map_parallel(&self, candidates: &[&FlatElement]) -> Vec<Outcome> {
        candidates.par_iter().map(|e| self.match_element(e)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn map_parallel(&self, candidates: &[&FlatElement]) -> Vec<Outcome> {
        self.map_sequential(candidates)
    }

    fn match_element(&self, element: &FlatElement) -> Outcome {
        let scores: Vec<ScoreBreakdown> = self
            .catalog
            .iter()
            .map(|component| breakdown(element, component))
            .collect();

        // First strictly greater score wins, so ties keep catalog order.
        let mut best: Option<(usize, f64)> = None;
        for (i, score) in scores.iter().map(ScoreBreakdown::total).enumerate() {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((i, score));
            }
        }

        if let Some((i, score)) = best {
            if score >= self.config.min_confidence {
                if let Some(component) = self.catalog.components().get(i) {
                    return Outcome::Mapped(Mapping::new(element.clone(), component, score));
                }
            }
        }

        let best_score = best.map_or(0.0, |(_, score)| score);
        Outcome::Unmapped(UnmappedElement {
            element: element.clone(),
            best_score,
            reason: unmapped_reason(best_score),
            suggestions: suggestions(element, &scores, self.catalog, &self.config),
        })
    }
}

/// Map elements onto a catalog with a validated config.
pub fn map(elements: &[FlatElement], catalog: &Catalog, config: &MatchConfig) -> Result<MappingReport> {
    Ok(Mapper::new(catalog, config.clone())?.map(elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_index;
    use crate::config::CatalogConfig;
    use crate::error::CodegenError;
    use designmap_analyze::flatten;
    use designmap_core::{CatalogComponent, ConfigError, LayoutNode, NodeKind, PropDef, PropType};
    use proptest::prelude::*;
    use serde_json::json;

    fn catalog(names: &[&str]) -> Catalog {
        build_index(
            names.iter().map(|n| CatalogComponent::new(*n)).collect(),
            &CatalogConfig::default(),
        )
    }

    #[test]
    fn test_instance_maps_with_variant_binding() {
        let tree = LayoutNode::new("0", "Page", NodeKind::Canvas)
            .with_child(LayoutNode::new("1", "Primary Button", NodeKind::Instance));
        let report = map(&flatten(&tree), &catalog(&["Button"]), &MatchConfig::default()).unwrap();

        assert_eq!(report.mappings.len(), 1);
        let mapping = &report.mappings[0];
        assert!(mapping.confidence() >= 70.0);
        assert_eq!(mapping.component().name, "Button");
        assert_eq!(mapping.props_binding().get("variant"), Some(&json!("primary")));
        assert_eq!(mapping.example_code(), "<Button variant=\"primary\" />");
        assert!(report.unmapped.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let tree = LayoutNode::new("0", "Screen", NodeKind::Frame)
            .with_child(LayoutNode::text("1", "Title", "Hello"))
            .with_child(LayoutNode::new("2", "Box", NodeKind::Rectangle))
            .with_child(LayoutNode::new("3", "Dot", NodeKind::Ellipse))
            .with_child(LayoutNode::new("4", "Icon", NodeKind::Vector));
        let report = map(&flatten(&tree), &catalog(&[]), &MatchConfig::default()).unwrap();

        assert!(report.mappings.is_empty());
        assert_eq!(report.unmapped.len(), 5);
        for unmapped in &report.unmapped {
            assert!(unmapped.suggestions.is_empty());
            assert_eq!(unmapped.best_score, 0.0);
            assert_eq!(unmapped.reason, "No suitable component found");
        }
    }

    #[test]
    fn test_text_binding_is_exact() {
        let tree = LayoutNode::text("1", "Submit", "Submit");
        let catalog = build_index(
            vec![CatalogComponent::new("Text Input").with_prop(PropDef::new("label", PropType::Text))],
            &CatalogConfig::default(),
        );
        let config = MatchConfig::default().with_min_confidence(40.0);
        let report = map(&flatten(&tree), &catalog, &config).unwrap();

        assert_eq!(report.mappings.len(), 1);
        let binding = report.mappings[0].props_binding();
        assert_eq!(binding.len(), 1);
        assert_eq!(binding.get("label"), Some(&json!("Submit")));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let tree = LayoutNode::new("1", "Widget", NodeKind::Instance);
        let report = map(
            &flatten(&tree),
            &catalog(&["Alpha", "Beta"]),
            &MatchConfig::default().with_min_confidence(50.0),
        )
        .unwrap();
        assert_eq!(report.mappings[0].component().name, "Alpha");
    }

    #[test]
    fn test_below_floor_gets_suggestions() {
        let tree = LayoutNode::new("1", "Hero", NodeKind::Rectangle);
        let report = map(&flatten(&tree), &catalog(&["Card", "Avatar"]), &MatchConfig::default()).unwrap();

        assert!(report.mappings.is_empty());
        let unmapped = &report.unmapped[0];
        assert_eq!(unmapped.best_score, 40.0);
        assert_eq!(unmapped.reason, "No component meets minimum confidence");
        assert_eq!(unmapped.suggestions.len(), 1);
        assert_eq!(unmapped.suggestions[0].component_name, "Card");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let elements = flatten(&LayoutNode::new("1", "Button", NodeKind::Instance));
        let config = MatchConfig::default().with_min_confidence(-1.0);
        let err = map(&elements, &catalog(&["Button"]), &config).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Config(ConfigError::ConfidenceOutOfRange { field: "min_confidence", .. })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let tree = LayoutNode::new("0", "Screen", NodeKind::Frame).with_children(
            (0..40).map(|i| {
                let name = if i % 2 == 0 { "Primary Button" } else { "Card" };
                LayoutNode::new(i.to_string(), name, NodeKind::Instance)
            }),
        );
        let elements = flatten(&tree);
        let catalog = catalog(&["Button", "Card", "Modal"]);

        let sequential = map(&elements, &catalog, &MatchConfig::default()).unwrap();
        let parallel = map(&elements, &catalog, &MatchConfig::default().with_parallel(true)).unwrap();
        assert_eq!(sequential, parallel);
    }

    fn trees() -> impl Strategy<Value = LayoutNode> {
        let kinds = prop_oneof![
            Just(NodeKind::Instance),
            Just(NodeKind::Text),
            Just(NodeKind::Frame),
            Just(NodeKind::Rectangle),
            Just(NodeKind::Group),
            Just(NodeKind::Line),
        ];
        let names = prop_oneof![
            Just("Primary Button"),
            Just("Email input"),
            Just("Card"),
            Just("Container"),
            Just(""),
            Just("Shape"),
        ];
        let leaf = (kinds, names).prop_map(|(kind, name)| LayoutNode::new("n", name, kind));
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop::collection::vec(inner, 0..4)
                .prop_map(|children| LayoutNode::new("p", "Section", NodeKind::Frame).with_children(children))
        })
    }

    proptest! {
        #[test]
        fn prop_partition_and_floor(tree in trees(), floor in 0.0f64..=100.0) {
            let elements = flatten(&tree);
            let catalog = catalog(&["Button", "Input", "Card", "Modal Dialog"]);
            let config = MatchConfig::default().with_min_confidence(floor);
            let report = map(&elements, &catalog, &config).unwrap();

            let mappable = elements.iter().filter(|e| e.is_mappable()).count();
            prop_assert_eq!(report.mappings.len() + report.unmapped.len(), mappable);
            prop_assert!(report.mappings.iter().all(|m| m.confidence() >= floor));
            prop_assert!(report.unmapped.iter().all(|u| u.best_score < floor));

            let again = map(&elements, &catalog, &config).unwrap();
            prop_assert_eq!(report, again);
        }
    }
}

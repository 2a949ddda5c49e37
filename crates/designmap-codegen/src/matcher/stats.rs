//! Aggregate mapping statistics and recommendations.

use crate::catalog::Catalog;
use crate::model::{Mapping, UnmappedElement};
use designmap_analyze::{round_to, FlatElement};
use indexmap::IndexMap;
use serde::Serialize;

/// Mapping counts by confidence band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceDistribution {
    /// Confidence of at least 80.
    pub high: usize,
    /// At least 60.
    pub medium: usize,
    pub low: usize,
}

impl ConfidenceDistribution {
    fn record(&mut self, confidence: f64) {
        if confidence >= 80.0 {
            self.high += 1;
        } else if confidence >= 60.0 {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingStatistics {
    pub total_elements: usize,
    pub mappable_elements: usize,
    pub mapped: usize,
    pub unmapped: usize,
    pub mapping_rate_percent: f64,
    pub average_confidence: f64,
    pub confidence_distribution: ConfidenceDistribution,
    /// Kinds of the mapped elements.
    pub mapped_kind_distribution: IndexMap<String, usize>,
    /// Kinds of every layout element.
    pub element_kind_distribution: IndexMap<String, usize>,
    pub catalog_kind_distribution: IndexMap<String, usize>,
    /// Mapping count per component name.
    pub component_usage: IndexMap<String, usize>,
    pub unique_components_used: usize,
    pub total_props_mapped: usize,
    pub average_props_per_mapping: f64,
    pub catalog_coverage_percent: f64,
}

impl MappingStatistics {
    pub fn compute(
        elements: &[FlatElement],
        mappings: &[Mapping],
        unmapped: &[UnmappedElement],
        catalog: &Catalog,
    ) -> Self {
        let mapped = mappings.len();
        let mappable = mapped + unmapped.len();

        let mut confidence_distribution = ConfidenceDistribution::default();
        let mut mapped_kind_distribution = IndexMap::new();
        let mut component_usage = IndexMap::new();
        let mut components_used: IndexMap<&str, ()> = IndexMap::new();
        let mut confidence_sum = 0.0;
        let mut total_props_mapped = 0;

        for mapping in mappings {
            confidence_sum += mapping.confidence();
            confidence_distribution.record(mapping.confidence());
            *mapped_kind_distribution
                .entry(mapping.element().kind.to_string())
                .or_insert(0) += 1;
            *component_usage
                .entry(mapping.component().name.clone())
                .or_insert(0) += 1;
            components_used.insert(mapping.component().id.as_str(), ());
            total_props_mapped += mapping.props_binding().len();
        }

        let mut element_kind_distribution = IndexMap::new();
        for element in elements {
            *element_kind_distribution
                .entry(element.kind.to_string())
                .or_insert(0) += 1;
        }

        Self {
            total_elements: elements.len(),
            mappable_elements: mappable,
            mapped,
            unmapped: unmapped.len(),
            mapping_rate_percent: round_to(percent(mapped, mappable), 1),
            average_confidence: round_to(ratio(confidence_sum, mapped), 2),
            confidence_distribution,
            mapped_kind_distribution,
            element_kind_distribution,
            catalog_kind_distribution: catalog.kind_distribution(),
            component_usage,
            unique_components_used: components_used.len(),
            total_props_mapped,
            average_props_per_mapping: round_to(ratio(total_props_mapped as f64, mapped), 2),
            catalog_coverage_percent: round_to(percent(components_used.len(), catalog.len()), 1),
        }
    }
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    ratio(part as f64 * 100.0, whole)
}

/// Follow-up advice derived from a mapping run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    MostUsedComponent {
        component: String,
        usage_count: usize,
        message: String,
    },
    UnmappedElements {
        count: usize,
        message: String,
    },
    MissingRequiredProps {
        count: usize,
        message: String,
    },
}

impl Recommendation {
    pub fn message(&self) -> &str {
        match self {
            Self::MostUsedComponent { message, .. }
            | Self::UnmappedElements { message, .. }
            | Self::MissingRequiredProps { message, .. } => message,
        }
    }
}

pub fn recommendations(
    statistics: &MappingStatistics,
    mappings: &[Mapping],
    unmapped: &[UnmappedElement],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    // First of the highest counts wins.
    let most_used = statistics
        .component_usage
        .iter()
        .fold(None::<(&String, usize)>, |best, (name, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        });
    if let Some((name, count)) = most_used {
        recommendations.push(Recommendation::MostUsedComponent {
            component: name.clone(),
            usage_count: count,
            message: format!("'{}' is the most frequently used component in this layout", name),
        });
    }

    if !unmapped.is_empty() {
        recommendations.push(Recommendation::UnmappedElements {
            count: unmapped.len(),
            message: format!(
                "{} elements couldn't be mapped. Consider creating custom components or extending the design system.",
                unmapped.len()
            ),
        });
    }

    let missing = mappings
        .iter()
        .filter(|m| !m.missing_required().is_empty())
        .count();
    if missing > 0 {
        recommendations.push(Recommendation::MissingRequiredProps {
            count: missing,
            message: format!(
                "{} components are missing required props. Please review the generated code.",
                missing
            ),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_index;
    use crate::config::{CatalogConfig, MatchConfig};
    use crate::matcher::map;
    use designmap_analyze::flatten;
    use designmap_core::{CatalogComponent, LayoutNode, NodeKind, PropDef, PropType};

    #[test]
    fn test_statistics_and_recommendations() {
        let tree = LayoutNode::new("0", "Screen", NodeKind::Frame)
            .with_child(LayoutNode::new("1", "Primary Button", NodeKind::Instance))
            .with_child(LayoutNode::new("2", "Secondary Button", NodeKind::Instance))
            .with_child(LayoutNode::new("3", "Avatar", NodeKind::Instance))
            .with_child(LayoutNode::new("4", "Divider", NodeKind::Line));
        let catalog = build_index(
            vec![
                CatalogComponent::new("Button").with_prop(PropDef::new("onClick", PropType::Other("FUNCTION".into())).required()),
                CatalogComponent::new("Avatar"),
                CatalogComponent::new("Tooltip"),
                CatalogComponent::new("Tabs"),
            ],
            &CatalogConfig::default(),
        );
        let elements = flatten(&tree);
        let report = map(&elements, &catalog, &MatchConfig::default()).unwrap();
        let stats = &report.statistics;

        assert_eq!(stats.total_elements, 5);
        assert_eq!(stats.mappable_elements, 4);
        assert_eq!(stats.mapped, 3);
        assert_eq!(stats.unmapped, 1);
        assert_eq!(stats.mapping_rate_percent, 75.0);
        assert_eq!(stats.average_confidence, 80.0);
        assert_eq!(stats.confidence_distribution, ConfidenceDistribution { high: 3, medium: 0, low: 0 });
        assert_eq!(stats.mapped_kind_distribution.get("INSTANCE"), Some(&3));
        assert_eq!(stats.element_kind_distribution.get("LINE"), Some(&1));
        assert_eq!(stats.component_usage.get("Button"), Some(&2));
        assert_eq!(stats.unique_components_used, 2);
        assert_eq!(stats.total_props_mapped, 2);
        assert_eq!(stats.average_props_per_mapping, 0.67);
        assert_eq!(stats.catalog_coverage_percent, 50.0);

        let kinds: Vec<&str> = report
            .recommendations
            .iter()
            .map(|r| match r {
                Recommendation::MostUsedComponent { .. } => "most_used",
                Recommendation::UnmappedElements { .. } => "unmapped",
                Recommendation::MissingRequiredProps { .. } => "missing",
            })
            .collect();
        assert_eq!(kinds, vec!["most_used", "unmapped", "missing"]);
        assert_eq!(
            report.recommendations[0].message(),
            "'Button' is the most frequently used component in this layout"
        );
        assert_eq!(
            report.recommendations[2],
            Recommendation::MissingRequiredProps {
                count: 2,
                message: "2 components are missing required props. Please review the generated code.".into(),
            }
        );
    }

    #[test]
    fn test_empty_statistics() {
        let catalog = build_index(Vec::new(), &CatalogConfig::default());
        let stats = MappingStatistics::compute(&[], &[], &[], &catalog);
        assert_eq!(stats.mapping_rate_percent, 0.0);
        assert_eq!(stats.average_confidence, 0.0);
        assert_eq!(stats.catalog_coverage_percent, 0.0);
        assert!(recommendations(&stats, &[], &[]).is_empty());
    }
}

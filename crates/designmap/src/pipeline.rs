//! End-to-end analysis and mapping pipelines.

use crate::config::{AnalysisOptions, EngineConfig};
use designmap_analyze::{
    analyze_layout, extract_palette, extract_styles, flatten, group_palette, inventory, structure,
    ComponentInventory, LayoutAnalysis, PaletteGroup, StructureNode, StyleDigest, TextStyleGroup,
};
use designmap_codegen::{
    build_index, build_index_from_json, catalog_from_document, generate, map, Catalog,
    GeneratedCode, MappingReport,
};
use designmap_core::{CatalogComponent, CatalogError, LayoutNode, NodeKind, Result};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Counts over a [`LayoutReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutStatistics {
    /// Nodes in the structure view, skipped stubs included.
    pub total_elements: usize,
    pub components_found: usize,
    pub text_styles_found: usize,
    pub color_styles_found: usize,
    pub grids_found: usize,
    pub spacing_patterns: usize,
    pub alignment_patterns: usize,
    pub responsive_patterns: usize,
    pub component_types: IndexMap<String, usize>,
    pub text_style_categories: IndexMap<String, usize>,
    pub color_style_categories: IndexMap<String, usize>,
}

/// Structural and style digest of one layout document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub structure: StructureNode,
    /// Empty unless components were requested.
    pub components: ComponentInventory,
    pub text_styles: Vec<TextStyleGroup>,
    pub color_styles: Vec<PaletteGroup>,
    pub styles: StyleDigest,
    pub layout_analysis: LayoutAnalysis,
    pub statistics: LayoutStatistics,
    /// Non-fatal problems found in the input.
    pub errors: Vec<String>,
}

impl LayoutReport {
    /// Document colors as CSS custom properties.
    pub fn css_variables(&self) -> String {
        self.styles.to_css_variables()
    }
}

/// Analyze a layout document.
pub fn analyze_document(root: &LayoutNode, options: &AnalysisOptions) -> LayoutReport {
    info!(document = %root.name, max_depth = options.max_depth, "analyzing layout");

    let structure = structure(root, options.max_depth);
    let components = if options.include_components {
        inventory(root)
    } else {
        ComponentInventory::default()
    };
    let styles = extract_styles(root);
    let text_styles = if options.include_text_styles {
        styles.text_style_groups()
    } else {
        Vec::new()
    };
    let color_styles = if options.include_color_styles {
        group_palette(&extract_palette(root))
    } else {
        Vec::new()
    };
    let layout_analysis = analyze_layout(root);
    let errors = unrecognized_kinds(root);

    let statistics = LayoutStatistics {
        total_elements: structure.count(),
        components_found: components.len(),
        text_styles_found: text_styles.iter().map(|g| g.count).sum(),
        color_styles_found: color_styles.iter().map(|g| g.count).sum(),
        grids_found: layout_analysis.grids.len(),
        spacing_patterns: layout_analysis.spacing_patterns.len(),
        alignment_patterns: layout_analysis.alignment_patterns.len(),
        responsive_patterns: layout_analysis.responsive_patterns.len(),
        component_types: components.type_counts.clone(),
        text_style_categories: text_styles
            .iter()
            .map(|g| (g.category.as_str().to_string(), g.count))
            .collect(),
        color_style_categories: color_styles
            .iter()
            .map(|g| (g.category.clone(), g.count))
            .collect(),
    };

    info!(
        elements = statistics.total_elements,
        components = statistics.components_found,
        errors = errors.len(),
        "layout analysis complete"
    );

    LayoutReport {
        structure,
        components,
        text_styles,
        color_styles,
        styles,
        layout_analysis,
        statistics,
        errors,
    }
}

/// One message per unrecognized node type, with its node count.
fn unrecognized_kinds(root: &LayoutNode) -> Vec<String> {
    let mut unknown: IndexMap<&str, usize> = IndexMap::new();
    for (_, node) in root.iter() {
        if let NodeKind::Other(name) = &node.kind {
            *unknown.entry(name.as_str()).or_insert(0) += 1;
        }
    }
    unknown
        .into_iter()
        .map(|(name, count)| {
            warn!(kind = name, count, "unrecognized node type");
            format!("Unrecognized node type '{}' on {} node(s)", name, count)
        })
        .collect()
}

/// Summary of the layout side of a mapping run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub name: String,
    pub elements_count: usize,
    pub element_types: IndexMap<String, usize>,
}

/// Summary of the catalog side of a mapping run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub components_count: usize,
    pub component_types: IndexMap<String, usize>,
    pub rejected_count: usize,
}

/// A catalog entry left out of the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEntry {
    pub index: usize,
    pub error: String,
}

impl From<&CatalogError> for RejectedEntry {
    fn from(error: &CatalogError) -> Self {
        Self {
            index: error.index(),
            error: error.to_string(),
        }
    }
}

/// Everything a mapping run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingOutcome {
    pub layout_summary: LayoutSummary,
    pub catalog_summary: CatalogSummary,
    pub report: MappingReport,
    /// Present when generation was requested and something was mapped.
    pub generated_code: Option<GeneratedCode>,
    pub rejected: Vec<RejectedEntry>,
}

/// Map a layout document onto raw catalog entries.
///
/// Malformed entries are rejected one by one and reported in the outcome.
pub fn map_document(
    layout_root: &LayoutNode,
    catalog_entries: &[serde_json::Value],
    config: &EngineConfig,
) -> Result<MappingOutcome> {
    config.validate()?;
    let catalog = build_index_from_json(catalog_entries, &config.catalog);
    map_with_catalog(layout_root, &catalog, config)
}

/// Map a layout document onto already decoded catalog components.
pub fn map_components(
    layout_root: &LayoutNode,
    components: Vec<CatalogComponent>,
    config: &EngineConfig,
) -> Result<MappingOutcome> {
    config.validate()?;
    let catalog = build_index(components, &config.catalog);
    map_with_catalog(layout_root, &catalog, config)
}

/// Map a layout document onto the components of a design-system document.
pub fn map_design_system(
    layout_root: &LayoutNode,
    design_system_root: &LayoutNode,
    config: &EngineConfig,
) -> Result<MappingOutcome> {
    map_components(layout_root, catalog_from_document(design_system_root), config)
}

fn map_with_catalog(layout_root: &LayoutNode, catalog: &Catalog, config: &EngineConfig) -> Result<MappingOutcome> {
    let elements = flatten(layout_root);
    debug!(
        layout = %layout_root.name,
        elements = elements.len(),
        components = catalog.len(),
        rejected = catalog.rejected().len(),
        "mapping document"
    );

    let report = map(&elements, catalog, &config.matching)?;

    let generated_code = match &config.generate {
        Some(options) if !report.mappings.is_empty() => Some(generate(&report, catalog, options)?),
        _ => None,
    };

    let layout_summary = LayoutSummary {
        name: layout_root.name.clone(),
        elements_count: elements.len(),
        element_types: report.statistics.element_kind_distribution.clone(),
    };
    let catalog_summary = CatalogSummary {
        components_count: catalog.len(),
        component_types: catalog.kind_distribution(),
        rejected_count: catalog.rejected().len(),
    };

    info!(
        mapped = report.mappings.len(),
        unmapped = report.unmapped.len(),
        generated = generated_code.is_some(),
        "document mapped"
    );

    Ok(MappingOutcome {
        layout_summary,
        catalog_summary,
        rejected: catalog.rejected().iter().map(RejectedEntry::from).collect(),
        report,
        generated_code,
    })
}

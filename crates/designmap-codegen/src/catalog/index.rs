//! Name- and capability-keyed catalog index.

use super::imports::ImportResolver;
use crate::config::CatalogConfig;
use crate::matcher::category::{Categories, Category};
use designmap_core::{CatalogComponent, CatalogError, ComponentKind};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// Capability tags a component can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    HasVariants,
    HasProps,
    HasRequiredProps,
    HasTokens,
    ComponentSet,
}

impl Capability {
    fn of(component: &CatalogComponent) -> impl Iterator<Item = Capability> {
        [
            (component.has_variants(), Self::HasVariants),
            (!component.props.is_empty(), Self::HasProps),
            (component.required_props().next().is_some(), Self::HasRequiredProps),
            (!component.tokens.is_empty(), Self::HasTokens),
            (component.kind == ComponentKind::ComponentSet, Self::ComponentSet),
        ]
        .into_iter()
        .filter_map(|(present, capability)| present.then_some(capability))
    }
}

/// A catalog component with its derived lookup data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedComponent {
    pub component: CatalogComponent,
    /// Always set after indexing.
    pub import_path: String,
    pub categories: Categories,
    #[serde(skip)]
    pub(crate) name_lower: String,
}

impl IndexedComponent {
    /// Index one component, resolving its import path if missing.
    pub fn new(mut component: CatalogComponent, resolver: &ImportResolver) -> Self {
        if component.id.is_empty() {
            component.id = component.name.clone();
        }
        let import_path = component
            .import_path
            .clone()
            .unwrap_or_else(|| resolver.resolve(&component.name));
        component.import_path = Some(import_path.clone());
        Self {
            categories: Category::for_component_name(&component.name),
            name_lower: component.name.to_lowercase(),
            import_path,
            component,
        }
    }

    pub fn id(&self) -> &str {
        &self.component.id
    }

    pub fn name(&self) -> &str {
        &self.component.name
    }
}

/// Indexed component catalog.
///
/// Iteration order is insertion order and is the tie-breaking order for
/// equal scores.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<IndexedComponent>,
    by_name: IndexMap<String, usize>,
    by_id: IndexMap<String, usize>,
    capabilities: IndexMap<Capability, Vec<usize>>,
    rejected: Vec<CatalogError>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexedComponent> {
        self.components.iter()
    }

    pub fn components(&self) -> &[IndexedComponent] {
        &self.components
    }

    /// First component with this exact name.
    pub fn get(&self, name: &str) -> Option<&IndexedComponent> {
        self.by_name.get(name).map(|&i| &self.components[i])
    }

    /// Component with this id.
    pub fn get_by_id(&self, id: &str) -> Option<&IndexedComponent> {
        self.by_id.get(id).map(|&i| &self.components[i])
    }

    /// Components tagged with a capability, in catalog order.
    pub fn with_capability(&self, capability: Capability) -> impl Iterator<Item = &IndexedComponent> {
        self.capabilities
            .get(&capability)
            .into_iter()
            .flatten()
            .map(|&i| &self.components[i])
    }

    /// Entries that could not be indexed.
    pub fn rejected(&self) -> &[CatalogError] {
        &self.rejected
    }

    /// Component count per kind.
    pub fn kind_distribution(&self) -> IndexMap<String, usize> {
        let mut distribution = IndexMap::new();
        for indexed in &self.components {
            let kind = match indexed.component.kind {
                ComponentKind::Component => "COMPONENT",
                ComponentKind::ComponentSet => "COMPONENT_SET",
            };
            *distribution.entry(kind.to_string()).or_insert(0) += 1;
        }
        distribution
    }

    /// Ids are unique; a repeated id rejects the entry at `position`.
    fn push(&mut self, position: usize, indexed: IndexedComponent) {
        if self.by_id.contains_key(indexed.id()) {
            self.reject(CatalogError::DuplicateId {
                index: position,
                id: indexed.id().to_string(),
            });
            return;
        }
        let index = self.components.len();
        self.by_name.entry(indexed.name().to_string()).or_insert(index);
        self.by_id.insert(indexed.id().to_string(), index);
        for capability in Capability::of(&indexed.component) {
            self.capabilities.entry(capability).or_default().push(index);
        }
        self.components.push(indexed);
    }

    fn reject(&mut self, error: CatalogError) {
        warn!(index = error.index(), error = %error, "catalog entry rejected");
        self.rejected.push(error);
    }
}

/// Index decoded components; entries without a name or with a repeated
/// id are rejected.
pub fn build_index(components: Vec<CatalogComponent>, config: &CatalogConfig) -> Catalog {
    let resolver = ImportResolver::new(config.import_base.clone());
    let mut catalog = Catalog::default();

    for (index, component) in components.into_iter().enumerate() {
        if component.name.trim().is_empty() {
            catalog.reject(CatalogError::MissingName { index });
            continue;
        }
        catalog.push(index, IndexedComponent::new(component, &resolver));
    }

    debug!(
        indexed = catalog.len(),
        rejected = catalog.rejected.len(),
        "catalog indexed"
    );
    catalog
}

/// Decode one raw catalog entry.
pub fn decode_entry(index: usize, entry: &serde_json::Value) -> Result<CatalogComponent, CatalogError> {
    let has_name = entry
        .get("name")
        .and_then(|n| n.as_str())
        .is_some_and(|n| !n.trim().is_empty());
    if !has_name {
        return Err(CatalogError::MissingName { index });
    }
    serde_json::from_value(entry.clone()).map_err(|e| CatalogError::Malformed {
        index,
        message: e.to_string(),
    })
}

/// Decode and index raw entries; each bad entry is rejected on its own.
pub fn build_index_from_json(entries: &[serde_json::Value], config: &CatalogConfig) -> Catalog {
    let resolver = ImportResolver::new(config.import_base.clone());
    let mut catalog = Catalog::default();

    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(index, entry) {
            Ok(component) => catalog.push(index, IndexedComponent::new(component, &resolver)),
            Err(error) => catalog.reject(error),
        }
    }

    debug!(
        indexed = catalog.len(),
        rejected = catalog.rejected.len(),
        "catalog decoded and indexed"
    );
    catalog
}

//! Catalog indexing, import resolution, and catalog extraction.

mod document;
mod imports;
mod index;

pub use document::catalog_from_document;
pub use imports::{component_identifier, ImportResolver};
pub use index::{build_index, build_index_from_json, decode_entry, Capability, Catalog, IndexedComponent};

//! Form catalog adapters.

mod catalog_resolver;
mod template_catalog;

pub use catalog_resolver::CatalogSchemaResolver;
pub use template_catalog::{TemplateCatalog, TemplateCatalogError};

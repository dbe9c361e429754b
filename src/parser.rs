//! Ontology loader adapters
//!
//! The reasoner core consumes an [`Ontology`](crate::ontology::Ontology) —
//! a sequence of axioms plus the concept names occurring in the document —
//! and does not depend on any particular file format. Format adapters
//! implement [`OntologyLoader`] and intern everything they read into the
//! shared [`TermStore`](crate::terms::TermStore); new formats plug in
//! through [`LoaderFactory`].

pub mod owl_xml;

pub use owl_xml::OwlXmlLoader;

use crate::error::ElResult;
use crate::ontology::Ontology;
use crate::terms::TermStore;
use std::path::Path;

/// Loader trait for ontology serialization formats
pub trait OntologyLoader {
    /// Parse an ontology from a string, interning concepts into `store`.
    fn parse_str(&self, content: &str, store: &mut TermStore) -> ElResult<Ontology>;

    /// Parse an ontology from a file.
    fn parse_file(&self, path: &Path, store: &mut TermStore) -> ElResult<Ontology> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content, store)
    }

    /// Get the supported format name
    fn format_name(&self) -> &'static str;
}

/// Factory for creating loaders based on file extension
pub struct LoaderFactory;

impl LoaderFactory {
    /// Create a loader for the given path, dispatching on its extension.
    pub fn for_path(path: &Path) -> Option<Box<dyn OntologyLoader>> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        match ext.to_lowercase().as_str() {
            "owx" | "owl" | "xml" => Some(Box::new(OwlXmlLoader::new())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_dispatch() {
        assert!(LoaderFactory::for_path(Path::new("pizza.owx")).is_some());
        assert!(LoaderFactory::for_path(Path::new("pizza.owl")).is_some());
        assert!(LoaderFactory::for_path(Path::new("PIZZA.XML")).is_some());
        assert!(LoaderFactory::for_path(Path::new("pizza.ttl")).is_none());
        assert!(LoaderFactory::for_path(Path::new("pizza")).is_none());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let loader = OwlXmlLoader::new();
        let mut store = TermStore::new();
        let err = loader
            .parse_file(Path::new("/nonexistent/pizza.owx"), &mut store)
            .unwrap_err();
        assert!(matches!(err, crate::error::ElError::OntologyLoad(_)));
    }
}

//! # EL Reasoner
//!
//! A subsumption reasoner for ontologies in the description logic EL:
//! concept names, ⊤, binary conjunctions and existential role restrictions,
//! with general concept inclusions and equivalences as TBox axioms.
//!
//! ## Quick Start
//!
//! ```rust
//! use el_reasoner::ontology::{Axiom, Ontology};
//! use el_reasoner::reasoning::ElReasoner;
//! use el_reasoner::terms::TermStore;
//!
//! // Build a small TBox: Margherita ⊑ Pizza
//! let mut store = TermStore::new();
//! let mut ontology = Ontology::new();
//! let margherita = store.intern_name("Margherita");
//! let pizza = store.intern_name("Pizza");
//! ontology.add_concept_name(margherita);
//! ontology.add_concept_name(pizza);
//! ontology.add_axiom(Axiom::SubClassOf(margherita, pizza));
//!
//! // Query the subsumers of Margherita
//! let reasoner = ElReasoner::new(store, ontology)?;
//! let subsumers = reasoner.subsumers("Margherita")?;
//! assert_eq!(subsumers, vec!["Margherita", "Pizza"]);
//! # Ok::<(), el_reasoner::ElError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`terms`] - Concept and role interning with stable integer ids
//! - [`ontology`] - Raw axioms and the entity registry produced by loaders
//! - [`parser`] - Loader adapters (OWL/XML) behind a pluggable trait
//! - [`normalize`] - Equivalence elimination and trigger-indexed GCIs
//! - [`reasoning`] - Completion-graph saturation and the reasoner façade
//! - [`format`] - Canonical textual rendering of concepts
//! - [`error`] - Error handling and CLI exit-code mapping

/// EL reasoner error types and result handling
pub mod error;

/// Concept and role interning with stable integer identifiers
pub mod terms;

/// Ontology structure produced by the loader adapters
pub mod ontology;

/// Ontology loader adapters for supported file formats
pub mod parser;

/// TBox normalization and trigger indexing
pub mod normalize;

/// Saturation engine and reasoner façade
pub mod reasoning;

/// Canonical textual rendering of concepts
pub mod format;

// Re-export common types for convenience
pub use error::{ElError, ElResult};
pub use normalize::{normalize, Gci, NormalizedTBox};
pub use ontology::{Axiom, Ontology};
pub use parser::{LoaderFactory, OntologyLoader, OwlXmlLoader};
pub use reasoning::{ElReasoner, ReasonerConfig, WitnessStrategy};
pub use terms::{Concept, ConceptId, RoleId, TermStore, TOP, TOP_NAME};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Ontology structure produced by the loader adapters
//!
//! An [`Ontology`] holds the raw TBox as the loader saw it: general concept
//! inclusions and equivalence axioms over interned concept ids, plus the
//! registry of concept names and roles occurring in the document. It is the
//! input to the normalizer; it performs no reasoning of its own.
//!
//! ## Usage
//!
//! ```rust
//! use el_reasoner::ontology::{Axiom, Ontology};
//! use el_reasoner::terms::TermStore;
//!
//! let mut store = TermStore::new();
//! let mut ontology = Ontology::new();
//!
//! let a = store.intern_name("A");
//! let b = store.intern_name("B");
//! ontology.add_concept_name(a);
//! ontology.add_concept_name(b);
//! ontology.add_axiom(Axiom::SubClassOf(a, b));
//!
//! assert_eq!(ontology.axioms().len(), 1);
//! assert!(ontology.contains_concept_name(a));
//! ```

use crate::terms::{ConceptId, RoleId, TermStore};
use indexmap::IndexSet;

/// A raw TBox axiom as delivered by a loader adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Axiom {
    /// General concept inclusion `lhs ⊑ rhs`
    SubClassOf(ConceptId, ConceptId),
    /// Equivalence of two or more concepts
    EquivalentClasses(Vec<ConceptId>),
}

/// A loaded ontology: raw axioms plus the entity registry.
///
/// Concept names and roles keep their insertion order so that queries over
/// the same document enumerate them deterministically.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    axioms: Vec<Axiom>,
    concept_names: IndexSet<ConceptId>,
    roles: IndexSet<RoleId>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a TBox axiom.
    pub fn add_axiom(&mut self, axiom: Axiom) {
        self.axioms.push(axiom);
    }

    /// Register a concept name occurring in the document.
    pub fn add_concept_name(&mut self, id: ConceptId) {
        self.concept_names.insert(id);
    }

    /// Register a role occurring in the document.
    pub fn add_role(&mut self, id: RoleId) {
        self.roles.insert(id);
    }

    /// All raw axioms, in document order.
    pub fn axioms(&self) -> &[Axiom] {
        self.axioms.as_slice()
    }

    /// All concept names, in first-occurrence order.
    pub fn concept_names(&self) -> impl Iterator<Item = ConceptId> + '_ {
        self.concept_names.iter().copied()
    }

    /// All roles, in first-occurrence order.
    pub fn roles(&self) -> impl Iterator<Item = RoleId> + '_ {
        self.roles.iter().copied()
    }

    pub fn contains_concept_name(&self, id: ConceptId) -> bool {
        self.concept_names.contains(&id)
    }

    pub fn concept_name_count(&self) -> usize {
        self.concept_names.len()
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Whether the document spells its concept names with surrounding
    /// quotes. Detected by inspecting any existing concept-name string;
    /// queries are matched against whatever spelling the ontology uses.
    pub fn uses_quoted_names(&self, store: &TermStore) -> bool {
        self.concept_names
            .iter()
            .filter_map(|&id| store.name(id))
            .find(|name| *name != crate::terms::TOP_NAME)
            .map(|name| name.starts_with('"') && name.ends_with('"'))
            .unwrap_or(false)
    }
}

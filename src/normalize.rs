//! TBox normalization and indexing
//!
//! Rewrites the raw axioms of an [`Ontology`] into the indexed form the
//! saturation engine consumes: equivalences become pairs of GCIs, trivial
//! `C ⊑ ⊤` inclusions are dropped, and every GCI is indexed by the concept
//! ids that can trigger a completion rule. The normalized TBox is read-only
//! after construction and can be shared by reference across queries.

use crate::error::{ElError, ElResult};
use crate::ontology::{Axiom, Ontology};
use crate::terms::{Concept, ConceptId, TermStore, TOP};
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

/// A normalized general concept inclusion `lhs ⊑ rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gci {
    pub lhs: ConceptId,
    pub rhs: ConceptId,
}

/// The normalized, indexed TBox.
#[derive(Debug, Default)]
pub struct NormalizedTBox {
    gcis: Vec<Gci>,
    /// Exact-lhs index: lhs id → rhs ids (rule CR1)
    gci_by_lhs: HashMap<ConceptId, SmallVec<[ConceptId; 4]>>,
    /// Conjunctions occurring in the TBox, registered under both operands
    /// (rule CR-AND⁺); the mate's presence is checked at rule time
    conjunctions_by_operand: HashMap<ConceptId, SmallVec<[ConceptId; 4]>>,
    /// Existential restrictions occurring anywhere in the TBox (rule CR-∃₂)
    existentials: HashSet<ConceptId>,
}

impl NormalizedTBox {
    pub fn gcis(&self) -> &[Gci] {
        &self.gcis
    }

    /// Right-hand sides of all GCIs whose lhs is exactly `id`.
    pub fn gcis_with_lhs(&self, id: ConceptId) -> &[ConceptId] {
        self.gci_by_lhs.get(&id).map_or(&[], |v| v.as_slice())
    }

    /// TBox conjunctions having `id` as one of their operands.
    pub fn conjunctions_with_operand(&self, id: ConceptId) -> &[ConceptId] {
        self.conjunctions_by_operand
            .get(&id)
            .map_or(&[], |v| v.as_slice())
    }

    /// Whether the existential restriction `id` occurs in the TBox.
    pub fn contains_existential(&self, id: ConceptId) -> bool {
        self.existentials.contains(&id)
    }

    pub fn gci_count(&self) -> usize {
        self.gcis.len()
    }

    fn add_gci(&mut self, store: &TermStore, gci: Gci) -> ElResult<()> {
        // Rule T makes C ⊑ ⊤ redundant.
        if gci.rhs == TOP {
            return Ok(());
        }
        self.index_subterms(store, gci.lhs)?;
        self.index_subterms(store, gci.rhs)?;
        self.gci_by_lhs.entry(gci.lhs).or_default().push(gci.rhs);
        self.gcis.push(gci);
        Ok(())
    }

    /// Walk a concept and register every conjunction and existential
    /// occurring in it. Conjunctions are binary by construction of the term
    /// store; a dangling id here means the ontology and store went out of
    /// sync, which is a bug, not bad input.
    fn index_subterms(&mut self, store: &TermStore, id: ConceptId) -> ElResult<()> {
        let concept = store.get(id).ok_or_else(|| {
            ElError::InvariantViolation(format!("concept id {:?} not present in term store", id))
        })?;
        match concept {
            Concept::Name(_) => {}
            Concept::And(left, right) => {
                for operand in [left, right] {
                    let entry = self.conjunctions_by_operand.entry(operand).or_default();
                    if !entry.contains(&id) {
                        entry.push(id);
                    }
                }
                self.index_subterms(store, left)?;
                self.index_subterms(store, right)?;
            }
            Concept::Exists(_, filler) => {
                self.existentials.insert(id);
                self.index_subterms(store, filler)?;
            }
        }
        Ok(())
    }
}

/// Normalize an ontology's raw axioms into an indexed TBox.
///
/// Equivalences of n concepts expand to the GCIs of every ordered pair;
/// transitive application of the completion rules makes the adjacent-pair
/// expansion equivalent, but the pairwise form keeps each entailment one
/// rule application away.
pub fn normalize(store: &TermStore, ontology: &Ontology) -> ElResult<NormalizedTBox> {
    let mut tbox = NormalizedTBox::default();
    for axiom in ontology.axioms() {
        match axiom {
            Axiom::SubClassOf(lhs, rhs) => {
                tbox.add_gci(store, Gci { lhs: *lhs, rhs: *rhs })?;
            }
            Axiom::EquivalentClasses(concepts) => {
                if concepts.len() < 2 {
                    return Err(ElError::InvariantViolation(format!(
                        "equivalence axiom with {} concept(s)",
                        concepts.len()
                    )));
                }
                for (i, &lhs) in concepts.iter().enumerate() {
                    for (j, &rhs) in concepts.iter().enumerate() {
                        if i != j {
                            tbox.add_gci(store, Gci { lhs, rhs })?;
                        }
                    }
                }
            }
        }
    }
    log::debug!(
        "normalized {} raw axiom(s) into {} GCI(s)",
        ontology.axiom_count(),
        tbox.gci_count()
    );
    Ok(tbox)
}

//! Reasoner façade
//!
//! [`ElReasoner`] owns a term store, a loaded ontology, and the TBox
//! normalized once at construction. Each query builds a fresh completion
//! graph, saturates it, and reads the subsumers off the root label; results
//! are cached per concept name. The store and normalized TBox are read-only
//! after construction, so a caller may run queries sequentially over a
//! shared reasoner without further coordination.

use crate::error::{ElError, ElResult};
use crate::format;
use crate::normalize::{normalize, NormalizedTBox};
use crate::ontology::Ontology;
use crate::reasoning::saturation::{saturate, NodeId, ReasonerConfig};
use crate::terms::{ConceptId, TermStore, TOP};
use hashbrown::HashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// EL subsumption reasoner over one loaded ontology.
pub struct ElReasoner {
    store: TermStore,
    ontology: Ontology,
    tbox: NormalizedTBox,
    config: ReasonerConfig,
    /// Per-name result cache; lives and dies with the reasoner, so a
    /// reloaded ontology starts from an empty cache.
    cache: RefCell<HashMap<String, Vec<String>>>,
}

impl ElReasoner {
    /// Create a reasoner, normalizing the ontology's TBox once.
    pub fn new(store: TermStore, ontology: Ontology) -> ElResult<Self> {
        Self::with_config(store, ontology, ReasonerConfig::default())
    }

    /// Create a reasoner with a custom saturation configuration.
    pub fn with_config(
        store: TermStore,
        ontology: Ontology,
        config: ReasonerConfig,
    ) -> ElResult<Self> {
        let tbox = normalize(&store, &ontology)?;
        Ok(ElReasoner {
            store,
            ontology,
            tbox,
            config,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// The loaded ontology.
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The term store backing this reasoner.
    pub fn store(&self) -> &TermStore {
        &self.store
    }

    /// All concept names subsuming `class_name`, rendered canonically and
    /// sorted; ⊤ is filtered from the reported set.
    pub fn subsumers(&self, class_name: &str) -> ElResult<Vec<String>> {
        if let Some(cached) = self.cache.borrow().get(class_name) {
            return Ok(cached.clone());
        }
        let root = self.resolve_query_name(class_name)?;
        let graph = saturate(&self.store, &self.tbox, root, &self.config)?;
        log::debug!(
            "query for {} saturated {} element(s)",
            class_name,
            graph.node_count()
        );

        let mut names: Vec<String> = graph
            .label(NodeId::ROOT)
            .filter(|&id| {
                id != TOP && self.store.is_name(id) && self.ontology.contains_concept_name(id)
            })
            .map(|id| format::render(&self.store, id))
            .collect();
        names.sort();

        self.cache
            .borrow_mut()
            .insert(class_name.to_string(), names.clone());
        Ok(names)
    }

    /// All concepts, compound ones included, subsuming `class_name`.
    pub fn subsumer_concepts(&self, class_name: &str) -> ElResult<Vec<ConceptId>> {
        let root = self.resolve_query_name(class_name)?;
        let graph = saturate(&self.store, &self.tbox, root, &self.config)?;
        Ok(graph.label(NodeId::ROOT).collect())
    }

    /// Subsumers of every concept name in the ontology, keyed by the
    /// name's canonical rendering.
    pub fn subsumers_of_all(&self) -> ElResult<BTreeMap<String, Vec<String>>> {
        let mut hierarchy = BTreeMap::new();
        let names: Vec<ConceptId> = self.ontology.concept_names().collect();
        for id in names {
            let spelling = self.store.name(id).ok_or_else(|| {
                ElError::InvariantViolation(format!(
                    "registered concept name {:?} is not a name in the term store",
                    id
                ))
            })?;
            let spelling = spelling.to_string();
            let subsumers = self.subsumers(&spelling)?;
            hierarchy.insert(spelling, subsumers);
        }
        Ok(hierarchy)
    }

    /// Resolve a queried name against the ontology, matching whatever
    /// spelling the document uses: when the ontology quotes its concept
    /// names and the query does not, the query is wrapped in quotes.
    fn resolve_query_name(&self, name: &str) -> ElResult<ConceptId> {
        if let Some(id) = self.lookup_ontology_name(name) {
            return Ok(id);
        }
        if self.ontology.uses_quoted_names(&self.store) && !name.starts_with('"') {
            let quoted = format!("\"{}\"", name);
            if let Some(id) = self.lookup_ontology_name(&quoted) {
                return Ok(id);
            }
        }
        Err(ElError::UnknownConcept(name.to_string()))
    }

    fn lookup_ontology_name(&self, name: &str) -> Option<ConceptId> {
        self.store
            .find_name(name)
            .filter(|id| self.ontology.contains_concept_name(*id))
    }
}

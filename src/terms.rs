//! Concept and role interning for EL expressions
//!
//! Every concept that flows through the reasoner is interned here once and
//! referred to by a stable integer id afterwards. Two concepts with equal
//! structure share the same id, so downstream code compares and hashes ids
//! only. The store is append-only for the lifetime of a loaded ontology.

use hashbrown::HashMap;
use std::sync::Arc;

/// Identifier of an interned concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptId(u32);

impl ConceptId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_usize(index: usize) -> Self {
        ConceptId(index as u32)
    }
}

/// Identifier of an interned role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(u32);

impl RoleId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The distinguished top concept ⊤, interned at store construction.
pub const TOP: ConceptId = ConceptId(0);

/// Reserved spelling of ⊤.
pub const TOP_NAME: &str = "⊤";

/// Interned structural form of a concept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Term {
    Name(Arc<str>),
    And(ConceptId, ConceptId),
    Exists(RoleId, ConceptId),
}

/// Structural view of an interned concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concept<'a> {
    /// Named concept (⊤ is the distinguished name with id [`TOP`])
    Name(&'a str),
    /// Binary conjunction; both operands are interned concepts
    And(ConceptId, ConceptId),
    /// Existential role restriction with role and filler
    Exists(RoleId, ConceptId),
}

/// Interning store for concepts and roles.
///
/// Guarantee: structural equality ⇔ id equality. Conjunctions are
/// canonicalized by their exact operand pair; commutativity and
/// associativity are NOT normalized away, the completion rules handle each
/// conjunct symmetrically instead.
#[derive(Debug, Clone)]
pub struct TermStore {
    terms: Vec<Term>,
    ids: HashMap<Term, ConceptId>,
    roles: Vec<Arc<str>>,
    role_ids: HashMap<Arc<str>, RoleId>,
}

impl TermStore {
    /// Create a store with ⊤ pre-interned at its reserved id.
    pub fn new() -> Self {
        let mut store = TermStore {
            terms: Vec::new(),
            ids: HashMap::new(),
            roles: Vec::new(),
            role_ids: HashMap::new(),
        };
        let top = store.intern_name(TOP_NAME);
        debug_assert_eq!(top, TOP);
        store
    }

    /// Intern a concept name by exact string match.
    pub fn intern_name(&mut self, text: &str) -> ConceptId {
        self.intern(Term::Name(Arc::from(text)))
    }

    /// Intern the binary conjunction of two interned concepts.
    pub fn mk_and(&mut self, left: ConceptId, right: ConceptId) -> ConceptId {
        self.intern(Term::And(left, right))
    }

    /// Intern an existential restriction, canonicalized by (role, filler).
    pub fn mk_exists(&mut self, role: RoleId, filler: ConceptId) -> ConceptId {
        self.intern(Term::Exists(role, filler))
    }

    /// Intern a role name.
    pub fn intern_role(&mut self, text: &str) -> RoleId {
        if let Some(&id) = self.role_ids.get(text) {
            return id;
        }
        let name: Arc<str> = Arc::from(text);
        let id = RoleId(self.roles.len() as u32);
        self.roles.push(name.clone());
        self.role_ids.insert(name, id);
        id
    }

    fn intern(&mut self, term: Term) -> ConceptId {
        if let Some(&id) = self.ids.get(&term) {
            return id;
        }
        let id = ConceptId(self.terms.len() as u32);
        self.terms.push(term.clone());
        self.ids.insert(term, id);
        id
    }

    /// Structural view of an interned concept.
    ///
    /// Panics if `id` was not produced by this store; use [`TermStore::get`]
    /// when the id's provenance is not certain.
    pub fn concept(&self, id: ConceptId) -> Concept<'_> {
        self.view(&self.terms[id.as_usize()])
    }

    /// Fallible variant of [`TermStore::concept`].
    pub fn get(&self, id: ConceptId) -> Option<Concept<'_>> {
        self.terms.get(id.as_usize()).map(|t| self.view(t))
    }

    fn view<'a>(&'a self, term: &'a Term) -> Concept<'a> {
        match term {
            Term::Name(text) => Concept::Name(text),
            Term::And(l, r) => Concept::And(*l, *r),
            Term::Exists(role, filler) => Concept::Exists(*role, *filler),
        }
    }

    /// Look up a concept name without interning it.
    pub fn find_name(&self, text: &str) -> Option<ConceptId> {
        self.ids.get(&Term::Name(Arc::from(text))).copied()
    }

    /// Look up an existential restriction without interning it.
    pub fn find_exists(&self, role: RoleId, filler: ConceptId) -> Option<ConceptId> {
        self.ids.get(&Term::Exists(role, filler)).copied()
    }

    /// Spelling of a named concept, `None` for compound concepts.
    pub fn name(&self, id: ConceptId) -> Option<&str> {
        match self.terms.get(id.as_usize()) {
            Some(Term::Name(text)) => Some(text),
            _ => None,
        }
    }

    /// Whether `id` denotes a concept name (⊤ included).
    pub fn is_name(&self, id: ConceptId) -> bool {
        matches!(self.terms.get(id.as_usize()), Some(Term::Name(_)))
    }

    /// Spelling of a role.
    pub fn role_name(&self, id: RoleId) -> &str {
        &self.roles[id.as_usize()]
    }

    /// Number of interned concepts; bounds label-set sizes during saturation.
    pub fn concept_count(&self) -> usize {
        self.terms.len()
    }
}

impl Default for TermStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Canonical textual rendering of concepts
//!
//! Names render verbatim (whatever spelling the ontology uses, quotes
//! included), ⊤ as its reserved symbol, conjunctions as `A ⊓ B`, and
//! existential restrictions as `∃r.C`. Compound operands are
//! parenthesized so the rendering is unambiguous.

use crate::terms::{Concept, ConceptId, TermStore};

/// Render a concept in its canonical textual form.
pub fn render(store: &TermStore, id: ConceptId) -> String {
    match store.concept(id) {
        Concept::Name(text) => text.to_string(),
        Concept::And(left, right) => {
            format!(
                "{} ⊓ {}",
                render_operand(store, left),
                render_operand(store, right)
            )
        }
        Concept::Exists(role, filler) => {
            format!(
                "∃{}.{}",
                store.role_name(role),
                render_operand(store, filler)
            )
        }
    }
}

fn render_operand(store: &TermStore, id: ConceptId) -> String {
    match store.concept(id) {
        Concept::Name(text) => text.to_string(),
        _ => format!("({})", render(store, id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{TermStore, TOP};

    #[test]
    fn test_render_forms() {
        let mut store = TermStore::new();
        let a = store.intern_name("A");
        let b = store.intern_name("B");
        let r = store.intern_role("r");

        assert_eq!(render(&store, TOP), "⊤");
        assert_eq!(render(&store, a), "A");

        let ab = store.mk_and(a, b);
        assert_eq!(render(&store, ab), "A ⊓ B");

        let ex = store.mk_exists(r, ab);
        assert_eq!(render(&store, ex), "∃r.(A ⊓ B)");

        let nested = store.mk_and(ex, a);
        assert_eq!(render(&store, nested), "(∃r.(A ⊓ B)) ⊓ A");
    }

    #[test]
    fn test_quoted_names_render_verbatim() {
        let mut store = TermStore::new();
        let quoted = store.intern_name("\"Margherita\"");
        assert_eq!(render(&store, quoted), "\"Margherita\"");
    }
}

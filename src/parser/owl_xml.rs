//! OWL/XML loader adapter
//!
//! Reads the OWL2 XML serialization and interns the EL fragment of it:
//! class and object-property declarations, `SubClassOf`,
//! `EquivalentClasses`, `ObjectIntersectionOf` and `ObjectSomeValuesFrom`.
//! Anything outside that fragment is rejected with
//! [`ElError::UnsupportedConstruct`] rather than silently dropped —
//! otherwise the reported subsumers would quietly be computed against a
//! weaker ontology than the document describes.

use crate::error::{ElError, ElResult};
use crate::ontology::{Axiom, Ontology};
use crate::parser::OntologyLoader;
use crate::terms::{ConceptId, TermStore, TOP};
use xmltree::{Element, XMLNode};

const OWL_THING_IRI: &str = "http://www.w3.org/2002/07/owl#Thing";

/// OWL/XML format loader
pub struct OwlXmlLoader;

impl OwlXmlLoader {
    pub fn new() -> Self {
        OwlXmlLoader
    }

    fn parse_declaration(
        &self,
        el: &Element,
        store: &mut TermStore,
        ontology: &mut Ontology,
    ) -> ElResult<()> {
        for child in logical_children(el) {
            match child.name.as_str() {
                "Class" => {
                    let id = self.parse_class(child, store)?;
                    if id != TOP {
                        ontology.add_concept_name(id);
                    }
                }
                "ObjectProperty" => {
                    let role = store.intern_role(&entity_name(child)?);
                    ontology.add_role(role);
                }
                other => {
                    return Err(ElError::UnsupportedConstruct(format!(
                        "declaration of {}",
                        other
                    )))
                }
            }
        }
        Ok(())
    }

    fn parse_class(&self, el: &Element, store: &mut TermStore) -> ElResult<ConceptId> {
        let name = entity_name(el)?;
        if name == "Thing" && is_owl_entity(el) {
            return Ok(TOP);
        }
        Ok(store.intern_name(&name))
    }

    /// Parse a class expression, registering every concept name and role
    /// it mentions. N-ary intersections are interned as left-associative
    /// binary conjunctions.
    fn parse_concept(
        &self,
        el: &Element,
        store: &mut TermStore,
        ontology: &mut Ontology,
    ) -> ElResult<ConceptId> {
        match el.name.as_str() {
            "Class" => {
                let id = self.parse_class(el, store)?;
                if id != TOP {
                    ontology.add_concept_name(id);
                }
                Ok(id)
            }
            "ObjectIntersectionOf" => {
                let operands: Vec<&Element> = logical_children(el).collect();
                let [first, rest @ ..] = operands.as_slice() else {
                    return Err(ElError::Parse(
                        "ObjectIntersectionOf without operands".to_string(),
                    ));
                };
                if rest.is_empty() {
                    return Err(ElError::Parse(
                        "ObjectIntersectionOf with a single operand".to_string(),
                    ));
                }
                let mut conjunction = self.parse_concept(first, store, ontology)?;
                for operand in rest {
                    let next = self.parse_concept(operand, store, ontology)?;
                    conjunction = store.mk_and(conjunction, next);
                }
                Ok(conjunction)
            }
            "ObjectSomeValuesFrom" => {
                let children: Vec<&Element> = logical_children(el).collect();
                let [property, filler] = children.as_slice() else {
                    return Err(ElError::Parse(
                        "ObjectSomeValuesFrom expects a property and a filler".to_string(),
                    ));
                };
                if property.name != "ObjectProperty" {
                    return Err(ElError::UnsupportedConstruct(format!(
                        "property expression {}",
                        property.name
                    )));
                }
                let role = store.intern_role(&entity_name(property)?);
                ontology.add_role(role);
                let filler_id = self.parse_concept(filler, store, ontology)?;
                Ok(store.mk_exists(role, filler_id))
            }
            other => Err(ElError::UnsupportedConstruct(format!(
                "class expression {}",
                other
            ))),
        }
    }

    fn parse_subclass_of(
        &self,
        el: &Element,
        store: &mut TermStore,
        ontology: &mut Ontology,
    ) -> ElResult<()> {
        let children: Vec<&Element> = logical_children(el).collect();
        let [sub, sup] = children.as_slice() else {
            return Err(ElError::Parse(
                "SubClassOf expects exactly two class expressions".to_string(),
            ));
        };
        let lhs = self.parse_concept(sub, store, ontology)?;
        let rhs = self.parse_concept(sup, store, ontology)?;
        ontology.add_axiom(Axiom::SubClassOf(lhs, rhs));
        Ok(())
    }

    fn parse_equivalent_classes(
        &self,
        el: &Element,
        store: &mut TermStore,
        ontology: &mut Ontology,
    ) -> ElResult<()> {
        let children: Vec<&Element> = logical_children(el).collect();
        if children.len() < 2 {
            return Err(ElError::Parse(
                "EquivalentClasses expects at least two class expressions".to_string(),
            ));
        }
        let concepts = children
            .iter()
            .map(|child| self.parse_concept(child, store, ontology))
            .collect::<ElResult<Vec<_>>>()?;
        ontology.add_axiom(Axiom::EquivalentClasses(concepts));
        Ok(())
    }
}

impl Default for OwlXmlLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologyLoader for OwlXmlLoader {
    fn parse_str(&self, content: &str, store: &mut TermStore) -> ElResult<Ontology> {
        let root = Element::parse(content.as_bytes())
            .map_err(|e| ElError::Parse(format!("malformed OWL/XML: {}", e)))?;
        if root.name != "Ontology" {
            return Err(ElError::Parse(format!(
                "expected Ontology document element, found {}",
                root.name
            )));
        }

        let mut ontology = Ontology::new();
        for el in logical_children(&root) {
            match el.name.as_str() {
                // Prefixes are resolved by the XML layer; annotations and
                // imports carry no TBox content.
                "Prefix" | "AnnotationAssertion" | "Import" => {}
                "Declaration" => self.parse_declaration(el, store, &mut ontology)?,
                "SubClassOf" => self.parse_subclass_of(el, store, &mut ontology)?,
                "EquivalentClasses" => self.parse_equivalent_classes(el, store, &mut ontology)?,
                other => {
                    return Err(ElError::UnsupportedConstruct(format!("axiom {}", other)));
                }
            }
        }
        Ok(ontology)
    }

    fn format_name(&self) -> &'static str {
        "OWL/XML"
    }
}

/// Element children that carry logical content; axiom annotations are
/// skipped.
fn logical_children(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) if child.name != "Annotation" => Some(child),
        _ => None,
    })
}

/// Spelling of an entity: the local name of its `IRI` or `abbreviatedIRI`
/// attribute (the part after the last `#`, `/`, or prefix colon).
fn entity_name(el: &Element) -> ElResult<String> {
    if let Some(iri) = el.attributes.get("IRI") {
        return Ok(local_name(iri).to_string());
    }
    if let Some(abbreviated) = el.attributes.get("abbreviatedIRI") {
        let local = abbreviated
            .rsplit_once(':')
            .map(|(_, local)| local)
            .unwrap_or(abbreviated);
        return Ok(local.to_string());
    }
    Err(ElError::Parse(format!(
        "{} element without IRI or abbreviatedIRI",
        el.name
    )))
}

/// Whether the entity's IRI lives in the OWL namespace.
fn is_owl_entity(el: &Element) -> bool {
    if let Some(iri) = el.attributes.get("IRI") {
        return iri.starts_with("http://www.w3.org/2002/07/owl#") || iri == OWL_THING_IRI;
    }
    if let Some(abbreviated) = el.attributes.get("abbreviatedIRI") {
        return abbreviated.starts_with("owl:");
    }
    false
}

fn local_name(iri: &str) -> &str {
    if let Some(pos) = iri.rfind('#') {
        &iri[pos + 1..]
    } else if let Some(pos) = iri.rfind('/') {
        &iri[pos + 1..]
    } else {
        iri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Concept;

    fn parse(content: &str) -> (TermStore, Ontology) {
        let mut store = TermStore::new();
        let ontology = OwlXmlLoader::new()
            .parse_str(content, &mut store)
            .expect("document should parse");
        (store, ontology)
    }

    #[test]
    fn test_parse_subclass_axioms() {
        let (store, ontology) = parse(
            r##"<?xml version="1.0"?>
            <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                <Declaration><Class IRI="#Margherita"/></Declaration>
                <Declaration><Class IRI="#Pizza"/></Declaration>
                <SubClassOf>
                    <Class IRI="#Margherita"/>
                    <Class IRI="#Pizza"/>
                </SubClassOf>
            </Ontology>"##,
        );
        assert_eq!(ontology.axiom_count(), 1);
        assert_eq!(ontology.concept_name_count(), 2);
        let margherita = store.find_name("Margherita").unwrap();
        let pizza = store.find_name("Pizza").unwrap();
        assert_eq!(
            ontology.axioms()[0],
            Axiom::SubClassOf(margherita, pizza)
        );
    }

    #[test]
    fn test_existential_and_intersection() {
        let (store, ontology) = parse(
            r##"<?xml version="1.0"?>
            <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                <SubClassOf>
                    <ObjectIntersectionOf>
                        <Class IRI="#Pizza"/>
                        <ObjectSomeValuesFrom>
                            <ObjectProperty IRI="#hasTopping"/>
                            <Class IRI="#Cheese"/>
                        </ObjectSomeValuesFrom>
                    </ObjectIntersectionOf>
                    <Class IRI="#CheesyPizza"/>
                </SubClassOf>
            </Ontology>"##,
        );
        let pizza = store.find_name("Pizza").unwrap();
        let cheese = store.find_name("Cheese").unwrap();
        let Axiom::SubClassOf(lhs, rhs) = &ontology.axioms()[0] else {
            panic!("expected GCI");
        };
        assert_eq!(store.name(*rhs), Some("CheesyPizza"));
        let Concept::And(left, right) = store.concept(*lhs) else {
            panic!("expected conjunction on the left-hand side");
        };
        assert_eq!(left, pizza);
        let Concept::Exists(role, filler) = store.concept(right) else {
            panic!("expected existential conjunct");
        };
        assert_eq!(store.role_name(role), "hasTopping");
        assert_eq!(filler, cheese);
    }

    #[test]
    fn test_nary_intersection_flattens_left_associatively() {
        let (store, ontology) = parse(
            r##"<?xml version="1.0"?>
            <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                <SubClassOf>
                    <ObjectIntersectionOf>
                        <Class IRI="#A"/>
                        <Class IRI="#B"/>
                        <Class IRI="#C"/>
                    </ObjectIntersectionOf>
                    <Class IRI="#D"/>
                </SubClassOf>
            </Ontology>"##,
        );
        let a = store.find_name("A").unwrap();
        let b = store.find_name("B").unwrap();
        let c = store.find_name("C").unwrap();
        let Axiom::SubClassOf(lhs, _) = &ontology.axioms()[0] else {
            panic!("expected GCI");
        };
        // ((A ⊓ B) ⊓ C)
        let Concept::And(left, right) = store.concept(*lhs) else {
            panic!("expected conjunction");
        };
        assert_eq!(right, c);
        assert_eq!(store.concept(left), Concept::And(a, b));
    }

    #[test]
    fn test_owl_thing_maps_to_top() {
        let (store, ontology) = parse(
            r##"<?xml version="1.0"?>
            <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                <SubClassOf>
                    <Class IRI="#Pizza"/>
                    <Class IRI="http://www.w3.org/2002/07/owl#Thing"/>
                </SubClassOf>
                <SubClassOf>
                    <Class IRI="#Pizza"/>
                    <Class abbreviatedIRI="owl:Thing"/>
                </SubClassOf>
            </Ontology>"##,
        );
        for axiom in ontology.axioms() {
            let Axiom::SubClassOf(_, rhs) = axiom else {
                panic!("expected GCI");
            };
            assert_eq!(*rhs, TOP);
        }
        // ⊤ is not a declared concept name of the document.
        assert_eq!(ontology.concept_name_count(), 1);
        assert!(store.find_name("Pizza").is_some());
    }

    #[test]
    fn test_equivalent_classes() {
        let (store, ontology) = parse(
            r##"<?xml version="1.0"?>
            <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                <EquivalentClasses>
                    <Class IRI="#A"/>
                    <ObjectIntersectionOf>
                        <Class IRI="#B"/>
                        <Class IRI="#C"/>
                    </ObjectIntersectionOf>
                </EquivalentClasses>
            </Ontology>"##,
        );
        let a = store.find_name("A").unwrap();
        let Axiom::EquivalentClasses(concepts) = &ontology.axioms()[0] else {
            panic!("expected equivalence");
        };
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[0], a);
        assert!(matches!(store.concept(concepts[1]), Concept::And(_, _)));
    }

    #[test]
    fn test_union_is_rejected() {
        let mut store = TermStore::new();
        let err = OwlXmlLoader::new()
            .parse_str(
                r##"<?xml version="1.0"?>
                <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                    <SubClassOf>
                        <ObjectUnionOf>
                            <Class IRI="#A"/>
                            <Class IRI="#B"/>
                        </ObjectUnionOf>
                        <Class IRI="#C"/>
                    </SubClassOf>
                </Ontology>"##,
                &mut store,
            )
            .unwrap_err();
        assert!(matches!(err, ElError::UnsupportedConstruct(_)));
    }

    #[test]
    fn test_disjoint_classes_axiom_is_rejected() {
        let mut store = TermStore::new();
        let err = OwlXmlLoader::new()
            .parse_str(
                r##"<?xml version="1.0"?>
                <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                    <DisjointClasses>
                        <Class IRI="#A"/>
                        <Class IRI="#B"/>
                    </DisjointClasses>
                </Ontology>"##,
                &mut store,
            )
            .unwrap_err();
        assert!(matches!(err, ElError::UnsupportedConstruct(_)));
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let mut store = TermStore::new();
        let err = OwlXmlLoader::new()
            .parse_str("<Ontology><SubClassOf>", &mut store)
            .unwrap_err();
        assert!(matches!(err, ElError::Parse(_)));
    }

    #[test]
    fn test_annotations_are_skipped() {
        let (_, ontology) = parse(
            r##"<?xml version="1.0"?>
            <Ontology xmlns="http://www.w3.org/2002/07/owl#">
                <Prefix name="owl" IRI="http://www.w3.org/2002/07/owl#"/>
                <SubClassOf>
                    <Annotation>
                        <AnnotationProperty abbreviatedIRI="rdfs:comment"/>
                        <Literal>margherita is a pizza</Literal>
                    </Annotation>
                    <Class IRI="#Margherita"/>
                    <Class IRI="#Pizza"/>
                </SubClassOf>
            </Ontology>"##,
        );
        assert_eq!(ontology.axiom_count(), 1);
    }
}

//! Reasoning performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use el_reasoner::ontology::{Axiom, Ontology};
use el_reasoner::reasoning::ElReasoner;
use el_reasoner::terms::TermStore;

/// Subclass chain C0 ⊑ C1 ⊑ … ⊑ Cn with an existential hop every fourth
/// step, so CR1, CR-∃₁ and CR-∃₂ all get exercised.
fn create_chain_ontology(size: usize) -> (TermStore, Ontology) {
    let mut store = TermStore::new();
    let mut ontology = Ontology::new();
    let role = store.intern_role("r");

    let names: Vec<_> = (0..size)
        .map(|i| {
            let id = store.intern_name(&format!("C{}", i));
            ontology.add_concept_name(id);
            id
        })
        .collect();

    for window in names.windows(2) {
        ontology.add_axiom(Axiom::SubClassOf(window[0], window[1]));
    }
    for i in (0..size.saturating_sub(4)).step_by(4) {
        let filler = names[i + 4];
        let exists = store.mk_exists(role, filler);
        ontology.add_axiom(Axiom::SubClassOf(names[i], exists));
        ontology.add_axiom(Axiom::SubClassOf(exists, names[i + 1]));
    }

    (store, ontology)
}

fn bench_subsumers(c: &mut Criterion) {
    let mut group = c.benchmark_group("subsumers");

    for size in [10usize, 50, 100, 500].iter() {
        let (store, ontology) = create_chain_ontology(*size);
        group.bench_with_input(BenchmarkId::new("chain", size), size, |b, _| {
            b.iter(|| {
                let reasoner =
                    ElReasoner::new(black_box(store.clone()), black_box(ontology.clone()))
                        .expect("normalization");
                black_box(reasoner.subsumers("C0").expect("query"));
            })
        });
    }

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    group.sample_size(20);

    for size in [10usize, 50, 100].iter() {
        let (store, ontology) = create_chain_ontology(*size);
        group.bench_with_input(BenchmarkId::new("all_names", size), size, |b, _| {
            b.iter(|| {
                let reasoner =
                    ElReasoner::new(black_box(store.clone()), black_box(ontology.clone()))
                        .expect("normalization");
                black_box(reasoner.subsumers_of_all().expect("classification"));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_subsumers, bench_classification);
criterion_main!(benches);

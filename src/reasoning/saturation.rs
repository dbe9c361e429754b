//! Worklist-driven saturation over the completion graph
//!
//! Decides `O ⊨ C₀ ⊑ D` for every concept name D simultaneously by
//! building a small canonical model rooted at an element labeled `{C₀}`
//! and closing it under the EL completion rules until no rule fires. The
//! subsumers of C₀ are exactly the concepts in the root's label at
//! fixpoint.
//!
//! ## Completion rules
//!
//! | Rule    | Precondition                                   | Action |
//! |---------|------------------------------------------------|--------|
//! | T       | d exists                                       | add ⊤ to label\[d\] |
//! | CR1     | C ∈ label\[d\], GCI C ⊑ D                      | add D to label\[d\] |
//! | CR-AND⁻ | A⊓B ∈ label\[d\]                               | add A, B to label\[d\] |
//! | CR-AND⁺ | A, B ∈ label\[d\], A⊓B occurs in the TBox      | add A⊓B to label\[d\] |
//! | CR-∃₁   | ∃r.C ∈ label\[d\]                              | ensure an r-successor with C |
//! | CR-∃₂   | d —r→ e, C ∈ label\[e\], ∃r.C occurs in TBox   | add ∃r.C to label\[d\] |
//!
//! Labels and edges only grow, the rules are confluent, and witness reuse
//! bounds the number of elements by the number of distinct fillers, so the
//! fixpoint is reached in polynomially many steps.

use crate::error::{ElError, ElResult};
use crate::normalize::NormalizedTBox;
use crate::terms::{Concept, ConceptId, RoleId, TermStore, TOP};
use bit_set::BitSet;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Element identifier in a completion graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root element representing the queried concept.
    pub const ROOT: NodeId = NodeId(0);

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Witness selection for rule CR-∃₁.
///
/// Reuse is the canonical-model construction and is what keeps cyclic
/// TBoxes terminating; always-create exists so the reuse optimization can
/// be cross-checked on acyclic inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WitnessStrategy {
    /// Share one witness per filler across all demands
    #[default]
    Reuse,
    /// Give every demand its own witness
    AlwaysCreate,
}

/// Saturation configuration
#[derive(Debug, Clone, Default)]
pub struct ReasonerConfig {
    pub witness_strategy: WitnessStrategy,
    /// Safety valve; saturation is provably terminating, so tripping this
    /// limit is reported as an invariant violation.
    pub max_iterations: Option<usize>,
}

/// The completion graph of one query.
///
/// Grown monotonically during saturation: labels and edges are only ever
/// added. Discarded when the query returns.
#[derive(Debug)]
pub struct CompletionGraph {
    /// Per-element concept labels, as bit sets over interned concept ids
    labels: Vec<BitSet>,
    /// Outgoing edges per element
    successors: Vec<SmallVec<[(RoleId, NodeId); 4]>>,
    /// Reverse edges, for re-examining predecessors when a label grows
    predecessors: Vec<SmallVec<[NodeId; 4]>>,
}

impl CompletionGraph {
    fn new(root_seed: ConceptId) -> Self {
        let mut graph = CompletionGraph {
            labels: Vec::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
        };
        graph.add_node(root_seed);
        graph
    }

    fn add_node(&mut self, seed: ConceptId) -> NodeId {
        let id = NodeId(self.labels.len() as u32);
        let mut label = BitSet::new();
        label.insert(seed.as_usize());
        self.labels.push(label);
        self.successors.push(SmallVec::new());
        self.predecessors.push(SmallVec::new());
        id
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// All elements of the graph, root first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.labels.len() as u32).map(NodeId)
    }

    pub fn label_contains(&self, node: NodeId, concept: ConceptId) -> bool {
        self.labels[node.as_usize()].contains(concept.as_usize())
    }

    fn insert_label(&mut self, node: NodeId, concept: ConceptId) -> bool {
        self.labels[node.as_usize()].insert(concept.as_usize())
    }

    /// Concepts currently labeling `node`.
    pub fn label(&self, node: NodeId) -> impl Iterator<Item = ConceptId> + '_ {
        self.labels[node.as_usize()]
            .iter()
            .map(ConceptId::from_usize)
    }

    /// Outgoing `(role, successor)` pairs of `node`.
    pub fn successors(&self, node: NodeId) -> &[(RoleId, NodeId)] {
        &self.successors[node.as_usize()]
    }

    fn predecessors(&self, node: NodeId) -> &[NodeId] {
        &self.predecessors[node.as_usize()]
    }

    fn has_edge(&self, from: NodeId, role: RoleId, to: NodeId) -> bool {
        self.successors[from.as_usize()].contains(&(role, to))
    }

    fn add_edge(&mut self, from: NodeId, role: RoleId, to: NodeId) {
        self.successors[from.as_usize()].push((role, to));
        let preds = &mut self.predecessors[to.as_usize()];
        if !preds.contains(&from) {
            preds.push(from);
        }
    }

    /// First element whose label currently contains `concept`.
    fn find_node_with(&self, concept: ConceptId) -> Option<NodeId> {
        self.labels
            .iter()
            .position(|label| label.contains(concept.as_usize()))
            .map(|index| NodeId(index as u32))
    }
}

/// Build the completion graph for `root` and saturate it to fixpoint.
pub fn saturate(
    store: &TermStore,
    tbox: &NormalizedTBox,
    root: ConceptId,
    config: &ReasonerConfig,
) -> ElResult<CompletionGraph> {
    let mut saturator = Saturator {
        store,
        tbox,
        strategy: config.witness_strategy,
        max_iterations: config.max_iterations,
        graph: CompletionGraph::new(root),
        queue: VecDeque::new(),
        queued: vec![false],
    };
    saturator.enqueue(NodeId::ROOT);
    saturator.run()?;
    Ok(saturator.graph)
}

struct Saturator<'a> {
    store: &'a TermStore,
    tbox: &'a NormalizedTBox,
    strategy: WitnessStrategy,
    max_iterations: Option<usize>,
    graph: CompletionGraph,
    /// Dirty elements awaiting a rule pass
    queue: VecDeque<NodeId>,
    /// Membership flags for the queue, indexed by node
    queued: Vec<bool>,
}

impl<'a> Saturator<'a> {
    fn run(&mut self) -> ElResult<()> {
        let mut steps = 0usize;
        while let Some(node) = self.queue.pop_front() {
            self.queued[node.as_usize()] = false;
            steps += 1;
            if let Some(limit) = self.max_iterations {
                if steps > limit {
                    return Err(ElError::InvariantViolation(format!(
                        "saturation exceeded the {} iteration limit",
                        limit
                    )));
                }
            }
            self.apply_rules(node)?;
        }
        log::debug!(
            "saturation reached fixpoint after {} passes over {} element(s)",
            steps,
            self.graph.node_count()
        );
        Ok(())
    }

    /// One pass of every completion rule over `node`. Additions re-enqueue
    /// the affected elements, so a single pass per pop suffices.
    fn apply_rules(&mut self, node: NodeId) -> ElResult<()> {
        // T
        self.add_to_label(node, TOP);

        // Rules below only ever append to the label, so a snapshot is safe.
        let snapshot: Vec<ConceptId> = self.graph.label(node).collect();
        for &concept in &snapshot {
            // CR1
            for &rhs in self.tbox.gcis_with_lhs(concept) {
                self.add_to_label(node, rhs);
            }

            match self.store.get(concept).ok_or_else(|| {
                ElError::InvariantViolation(format!(
                    "label of element {} holds unknown concept id {:?}",
                    node.as_usize(),
                    concept
                ))
            })? {
                Concept::Name(_) => {}
                // CR-AND⁻
                Concept::And(left, right) => {
                    self.add_to_label(node, left);
                    self.add_to_label(node, right);
                }
                // CR-∃₁
                Concept::Exists(role, filler) => {
                    self.ensure_witness(node, role, filler);
                }
            }

            // CR-AND⁺: conjunctions of the TBox with this concept as one
            // operand; fire once the mate is present too.
            for &conjunction in self.tbox.conjunctions_with_operand(concept) {
                let Some(Concept::And(left, right)) = self.store.get(conjunction) else {
                    return Err(ElError::InvariantViolation(format!(
                        "conjunction index entry {:?} is not a binary conjunction",
                        conjunction
                    )));
                };
                if self.graph.label_contains(node, left) && self.graph.label_contains(node, right)
                {
                    self.add_to_label(node, conjunction);
                }
            }
        }

        // CR-∃₂
        let edges: Vec<(RoleId, NodeId)> = self.graph.successors(node).to_vec();
        for (role, successor) in edges {
            let successor_label: Vec<ConceptId> = self.graph.label(successor).collect();
            for filler in successor_label {
                if let Some(existential) = self.store.find_exists(role, filler) {
                    if self.tbox.contains_existential(existential) {
                        self.add_to_label(node, existential);
                    }
                }
            }
        }

        Ok(())
    }

    /// CR-∃₁: make sure `node` has an `role`-successor labeled with
    /// `filler`, reusing the canonical witness where the strategy allows.
    fn ensure_witness(&mut self, node: NodeId, role: RoleId, filler: ConceptId) {
        let witnessed = self
            .graph
            .successors(node)
            .iter()
            .any(|&(r, succ)| r == role && self.graph.label_contains(succ, filler));
        if witnessed {
            return;
        }

        let existing = match self.strategy {
            WitnessStrategy::Reuse => self.graph.find_node_with(filler),
            WitnessStrategy::AlwaysCreate => None,
        };
        match existing {
            Some(witness) => {
                if !self.graph.has_edge(node, role, witness) {
                    self.graph.add_edge(node, role, witness);
                    self.enqueue(node);
                }
            }
            None => {
                let witness = self.graph.add_node(filler);
                self.queued.push(false);
                self.graph.add_edge(node, role, witness);
                log::trace!(
                    "element {} created as witness for filler {:?}",
                    witness.as_usize(),
                    filler
                );
                self.enqueue(node);
                self.enqueue(witness);
            }
        }
    }

    fn add_to_label(&mut self, node: NodeId, concept: ConceptId) {
        if self.graph.insert_label(node, concept) {
            log::trace!(
                "label of element {} grew by {:?}",
                node.as_usize(),
                concept
            );
            self.enqueue(node);
            // Predecessors may now satisfy CR-∃₂.
            let predecessors: SmallVec<[NodeId; 4]> =
                SmallVec::from_slice(self.graph.predecessors(node));
            for predecessor in predecessors {
                self.enqueue(predecessor);
            }
        }
    }

    fn enqueue(&mut self, node: NodeId) {
        let flag = &mut self.queued[node.as_usize()];
        if !*flag {
            *flag = true;
            self.queue.push_back(node);
        }
    }
}

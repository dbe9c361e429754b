//! EL Reasoning Engine
//!
//! Provides subsumption reasoning for EL ontologies through
//! consequence-based saturation of a canonical completion graph.

pub mod engine;
pub mod saturation;

pub use engine::ElReasoner;
pub use saturation::{saturate, CompletionGraph, NodeId, ReasonerConfig, WitnessStrategy};

//! Error types for the EL reasoner

use thiserror::Error;

/// EL reasoner error type
#[derive(Error, Debug)]
pub enum ElError {
    /// Ontology file could not be read
    #[error("Ontology load error: {0}")]
    OntologyLoad(#[from] std::io::Error),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Axiom uses a construct outside the EL fragment
    #[error("Unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// The queried name does not occur as a concept name in the ontology
    #[error("Unknown concept: {0}")]
    UnknownConcept(String),

    /// Internal invariant violation; indicates a bug
    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for EL reasoning operations
pub type ElResult<T> = Result<T, ElError>;

impl ElError {
    /// Process exit code for this error when surfaced by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ElError::OntologyLoad(_) => 2,
            ElError::Parse(_) | ElError::UnsupportedConstruct(_) => 3,
            ElError::UnknownConcept(_) => 4,
            ElError::InvariantViolation(_) => 1,
        }
    }
}

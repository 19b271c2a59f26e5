//! Error types for OracleForge

use std::path::PathBuf;

use thiserror::Error;

use crate::fact::Fact;

/// Main error type for oracle registration and evaluation
#[derive(Debug, Error)]
pub enum OracleError {
    /// No oracle is registered under this name or id
    #[error("unknown oracle `{0}`")]
    UnknownOracle(String),

    /// An oracle with this name is already registered
    #[error("oracle `{0}` is already registered")]
    DuplicateOracle(String),

    /// Inputs or descriptor do not match what the oracle expects
    #[error("oracle `{oracle}`: {reason}")]
    ConfigurationMismatch { oracle: String, reason: String },

    /// Deciding one fact moved the answer against the declared direction
    #[error("oracle `{oracle}` violates monotonicity at input {position} on {fact}: {detail}")]
    MonotonicityViolation {
        oracle: String,
        position: usize,
        fact: Fact,
        detail: String,
    },

    /// A formula or data file could not be parsed
    #[error("oracle `{oracle}`: malformed file {}: {reason}", path.display())]
    MalformedFile {
        oracle: String,
        path: PathBuf,
        reason: String,
    },

    /// A formula or data file could not be read
    #[error("oracle `{oracle}`: cannot read {}: {source}", path.display())]
    FileAccess {
        oracle: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input fact breaks a precondition of the oracle
    #[error("oracle `{oracle}`: invalid fact {fact}: {invariant}")]
    InvalidFact {
        oracle: String,
        fact: Fact,
        invariant: String,
    },

    /// The oracle produced an internally inconsistent result
    #[error("oracle `{oracle}`: internal defect: {detail}")]
    LogicDefect { oracle: String, detail: String },
}

impl OracleError {
    pub fn mismatch(oracle: &str, reason: impl Into<String>) -> Self {
        OracleError::ConfigurationMismatch {
            oracle: oracle.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_fact(oracle: &str, fact: &Fact, invariant: impl Into<String>) -> Self {
        OracleError::InvalidFact {
            oracle: oracle.to_string(),
            fact: fact.clone(),
            invariant: invariant.into(),
        }
    }

    pub fn defect(oracle: &str, detail: impl Into<String>) -> Self {
        OracleError::LogicDefect {
            oracle: oracle.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;

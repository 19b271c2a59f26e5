//! Formula and data files consumed by oracles.
//!
//! Each format parses a whole file from text. Files are read by
//! [`FileCache`], which keys parsed values by content digest so repeated
//! calls within one run parse each file once.

mod adjacency;
mod cache;
mod cnf;
mod pb;
mod preferences;

use thiserror::Error;

pub use adjacency::AdjacencyList;
pub use cache::FileCache;
pub use cnf::{Clause, Cnf};
pub use pb::{Comparison, PbConstraint, PbFormula, PbTerm};
pub use preferences::Preferences;

/// A file that can be parsed from text.
pub trait FileFormat: Sized + Send + Sync + 'static {
    /// Short name used in cache logs.
    const NAME: &'static str;

    fn parse(text: &str) -> Result<Self, ParseError>;
}

/// Parse error, located by 1-based line where applicable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: clause has no literals")]
    EmptyClause { line: usize },

    #[error("line {line}: cannot parse `{token}`")]
    InvalidToken { line: usize, token: String },

    #[error("line {line}: clause is not terminated by 0")]
    MissingTerminator { line: usize },

    #[error("line {line}: literal `{token}` has no variable")]
    LiteralOutOfRange { line: usize, token: String },

    #[error("line {line}: coefficients overflow a 64-bit sum")]
    CoefficientOverflow { line: usize },

    #[error("line {line}: constraint has no comparison operator")]
    MissingOperator { line: usize },

    #[error("odd number of vertex tokens ({0}), every edge needs two endpoints")]
    OddTokenCount(usize),

    #[error("preferences: {0}")]
    Preferences(String),
}

/// Parses a signed integer token, reporting the line on failure.
pub(crate) fn parse_int(token: &str, line: usize) -> Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidToken {
        line,
        token: token.to_string(),
    })
}

/// Parses a formula literal. `i64::MIN` is rejected since its variable
/// `|i64::MIN|` is not an `i64`.
pub(crate) fn parse_literal(token: &str, line: usize) -> Result<i64, ParseError> {
    match parse_int(token, line)? {
        i64::MIN => Err(ParseError::LiteralOutOfRange {
            line,
            token: token.to_string(),
        }),
        literal => Ok(literal),
    }
}

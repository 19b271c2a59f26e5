//! Built-in oracles for OracleForge.
//!
//! Every oracle implements [`Oracle`]: it reads its input predicates through a
//! [`Query`], classifies the relevant facts, and reports definite and
//! possible output tuples. Families:
//!
//! - [`set`] - set difference and union
//! - [`cardinality`] - counting bounds
//! - [`formula`] - CNF satisfiability and pseudo-Boolean constraints
//! - [`subset_sum`] - subset-sum feasibility
//! - [`graph`] - subgraph extraction and reachability
//! - [`control`] - corporate control and strategic companies
//! - [`allocation`] - envy-free allocation against preference files
//! - [`learning`] - identity, negation, disjunction and parity with nogoods
//!
//! [`BuiltinOracle`] enumerates all of them behind the same trait.

pub mod allocation;
pub mod builtin;
pub mod cardinality;
pub mod control;
pub mod format;
pub mod formula;
pub mod graph;
pub mod learning;
pub mod oracle;
pub mod set;
pub mod subset_sum;

#[cfg(test)]
pub(crate) mod test_utils;

pub use builtin::BuiltinOracle;
pub use format::{FileCache, FileFormat, ParseError};
pub use oracle::{Oracle, Query};

//! OracleForge - three-valued external oracles
//!
//! Oracles compute the extension of an external atom under a partial
//! assignment of their input predicates. Each call reports the output
//! tuples that hold under every completion (definite) and those that hold
//! under some (possible), and learning oracles also justify their output
//! with nogoods.
//!
//! # Quick Start
//!
//! ```
//! use oracleforge::prelude::*;
//!
//! let registry = OracleRegistry::with_builtins(OracleConfig::default());
//! let at_least = registry.lookup("atLeast").unwrap();
//!
//! let mut view = Assignment::new();
//! view.assign("p(1)".parse().unwrap(), TruthValue::True).unwrap();
//! view.assign("p(2)".parse().unwrap(), TruthValue::Undefined).unwrap();
//!
//! let call = Call::new(at_least, vec![Input::predicate("p"), Input::constant(2i64)]);
//! let evaluation = registry.evaluate(&call, &view).unwrap();
//! assert_eq!(evaluation.answer.truth_of(&[]), TruthValue::Undefined);
//! ```

pub mod conformance;
pub mod registry;

#[cfg(feature = "console")]
pub mod console;

pub use conformance::check_monotonicity;
pub use registry::{Call, Evaluation, OracleId, OracleRegistry};

pub use oracleforge_config::{ConfigError, EnvironmentMode, OracleConfig};
pub use oracleforge_core::{
    Answer, Assignment, AssignmentError, AssignmentView, Fact, FactParseError, Input, InputKind,
    MonotonicitySpec, Nogood, NogoodLearner, OracleDescriptor, OracleError, Result, TruthValue,
    Value, Verdict,
};
pub use oracleforge_oracles::{BuiltinOracle, Oracle, Query};

pub mod prelude {
    pub use crate::{
        Answer, Assignment, AssignmentView, BuiltinOracle, Call, Evaluation, Fact, Input,
        Nogood, Oracle, OracleConfig, OracleError, OracleId, OracleRegistry, TruthValue, Value,
        Verdict,
    };
}

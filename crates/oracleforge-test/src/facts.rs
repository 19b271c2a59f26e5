//! Fact and assignment shorthands.

use oracleforge_config::OracleConfig;
use oracleforge_core::{Assignment, Fact, TruthValue};

/// Parses a fact, panicking on malformed text.
///
/// ```
/// use oracleforge_test::fact;
///
/// assert_eq!(fact("p(1,a)").arity(), 2);
/// ```
pub fn fact(text: &str) -> Fact {
    text.parse()
        .unwrap_or_else(|err| panic!("bad fact `{text}` in test: {err}"))
}

/// Builds an assignment from `(fact, value)` pairs in order.
///
/// ```
/// use oracleforge_core::{AssignmentView, TruthValue::*};
/// use oracleforge_test::{assignment, fact};
///
/// let a = assignment(&[("p(1)", True), ("p(2)", Undefined)]);
/// assert_eq!(a.value_of(&fact("p(1)")), True);
/// assert_eq!(a.known_facts("p").len(), 2);
/// ```
pub fn assignment(entries: &[(&str, TruthValue)]) -> Assignment {
    Assignment::from_facts(entries.iter().map(|(text, value)| (fact(text), *value)))
        .unwrap_or_else(|err| panic!("inconsistent test assignment: {err}"))
}

/// A configuration with small enumeration and table bounds.
pub fn quick_config() -> OracleConfig {
    let mut config = OracleConfig::new().with_max_undefined(8);
    config.subset_sum.max_table_size = 1 << 12;
    config
}

//! The closed set of built-in oracles.

use oracleforge_core::{Answer, NogoodLearner, OracleDescriptor, Result};

use crate::allocation::EnvyFree;
use crate::cardinality::{AtLeast, AtMost, Cardinality};
use crate::control::{
    Controls, ControlsMajority, ControlsMajorityNonmonotonic, ControlsMajorityWithMax, Strategic,
};
use crate::formula::{PseudoBoolean, Sat};
use crate::graph::{Reachable, Subgraph, SubgraphFile};
use crate::learning::{Disj, Id, Neg, Parity};
use crate::oracle::{Oracle, Query};
use crate::set::{SetMinus, SetMinusNonmonotonic, SetUnion};
use crate::subset_sum::SubsetSum;

/// One variant per built-in oracle.
///
/// Dispatch goes through a `match`, so the registry never looks an
/// implementation up by string once an oracle is registered.
///
/// # Examples
///
/// ```
/// use oracleforge_oracles::{BuiltinOracle, Oracle};
///
/// let oracle = BuiltinOracle::from_name("setminus").unwrap();
/// assert_eq!(oracle, BuiltinOracle::SetMinus);
/// assert_eq!(oracle.descriptor().output_arity, 1);
/// assert_eq!(BuiltinOracle::ALL.len(), 22);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinOracle {
    SetMinus,
    SetMinusNonmonotonic,
    SetUnion,
    Cardinality,
    AtLeast,
    AtMost,
    Sat,
    PseudoBoolean,
    SubsetSum,
    Subgraph,
    SubgraphFile,
    Reachable,
    Controls,
    Strategic,
    ControlsMajority,
    ControlsMajorityWithMax,
    ControlsMajorityNonmonotonic,
    EnvyFree,
    Id,
    Neg,
    Disj,
    Parity,
}

impl BuiltinOracle {
    pub const ALL: [BuiltinOracle; 22] = [
        BuiltinOracle::SetMinus,
        BuiltinOracle::SetMinusNonmonotonic,
        BuiltinOracle::SetUnion,
        BuiltinOracle::Cardinality,
        BuiltinOracle::AtLeast,
        BuiltinOracle::AtMost,
        BuiltinOracle::Sat,
        BuiltinOracle::PseudoBoolean,
        BuiltinOracle::SubsetSum,
        BuiltinOracle::Subgraph,
        BuiltinOracle::SubgraphFile,
        BuiltinOracle::Reachable,
        BuiltinOracle::Controls,
        BuiltinOracle::Strategic,
        BuiltinOracle::ControlsMajority,
        BuiltinOracle::ControlsMajorityWithMax,
        BuiltinOracle::ControlsMajorityNonmonotonic,
        BuiltinOracle::EnvyFree,
        BuiltinOracle::Id,
        BuiltinOracle::Neg,
        BuiltinOracle::Disj,
        BuiltinOracle::Parity,
    ];

    fn implementation(self) -> &'static dyn Oracle {
        match self {
            BuiltinOracle::SetMinus => &SetMinus,
            BuiltinOracle::SetMinusNonmonotonic => &SetMinusNonmonotonic,
            BuiltinOracle::SetUnion => &SetUnion,
            BuiltinOracle::Cardinality => &Cardinality,
            BuiltinOracle::AtLeast => &AtLeast,
            BuiltinOracle::AtMost => &AtMost,
            BuiltinOracle::Sat => &Sat,
            BuiltinOracle::PseudoBoolean => &PseudoBoolean,
            BuiltinOracle::SubsetSum => &SubsetSum,
            BuiltinOracle::Subgraph => &Subgraph,
            BuiltinOracle::SubgraphFile => &SubgraphFile,
            BuiltinOracle::Reachable => &Reachable,
            BuiltinOracle::Controls => &Controls,
            BuiltinOracle::Strategic => &Strategic,
            BuiltinOracle::ControlsMajority => &ControlsMajority,
            BuiltinOracle::ControlsMajorityWithMax => &ControlsMajorityWithMax,
            BuiltinOracle::ControlsMajorityNonmonotonic => &ControlsMajorityNonmonotonic,
            BuiltinOracle::EnvyFree => &EnvyFree,
            BuiltinOracle::Id => &Id,
            BuiltinOracle::Neg => &Neg,
            BuiltinOracle::Disj => &Disj,
            BuiltinOracle::Parity => &Parity,
        }
    }

    /// Registered name, as written in `&name[...]`.
    pub fn name(self) -> &'static str {
        self.implementation().descriptor().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|oracle| oracle.name() == name)
    }
}

impl Oracle for BuiltinOracle {
    fn descriptor(&self) -> OracleDescriptor {
        self.implementation().descriptor()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        self.implementation().evaluate(query)
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        self.implementation().learn(query, learner)
    }
}

//! Counting bounds over the true facts of a predicate.

use oracleforge_core::{Answer, InputKind, MonotonicitySpec, OracleDescriptor, Result, TruthValue};

use crate::oracle::{Oracle, Query};

/// True and Undefined fact counts of one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub true_count: i64,
    pub undefined_count: i64,
}

impl Counts {
    pub fn of(query: &Query<'_>, position: usize) -> Result<Self> {
        let mut counts = Self::default();
        for (_, value) in query.facts(position)? {
            match value {
                TruthValue::True => counts.true_count += 1,
                TruthValue::Undefined => counts.undefined_count += 1,
                TruthValue::False => {}
            }
        }
        Ok(counts)
    }

    /// Largest count any completion can reach.
    pub fn optimistic(&self) -> i64 {
        self.true_count + self.undefined_count
    }

    /// `count >= min` under every / some completion.
    pub fn at_least(&self, min: i64) -> TruthValue {
        if self.true_count >= min {
            TruthValue::True
        } else if self.optimistic() >= min {
            TruthValue::Undefined
        } else {
            TruthValue::False
        }
    }

    /// `count <= max` under every / some completion.
    pub fn at_most(&self, max: i64) -> TruthValue {
        if self.optimistic() <= max {
            TruthValue::True
        } else if self.true_count <= max {
            TruthValue::Undefined
        } else {
            TruthValue::False
        }
    }
}

/// `&cardinality[p, min, max]()`: true iff `min <= |p| <= max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cardinality;

impl Oracle for Cardinality {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("cardinality", 0)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Constant)
            .with_input(InputKind::Constant)
            .with_partial_answer()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let (min, max) = (query.int(1)?, query.int(2)?);
        let counts = Counts::of(query, 0)?;
        Ok(Answer::nullary(counts.at_least(min) & counts.at_most(max)))
    }
}

/// `&atLeast[p, min]()`: true iff `|p| >= min`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtLeast;

impl Oracle for AtLeast {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("atLeast", 0)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Constant)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0))
            .with_partial_answer()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let min = query.int(1)?;
        Ok(Answer::nullary(Counts::of(query, 0)?.at_least(min)))
    }
}

/// `&atMost[p, max]()`: true iff `|p| <= max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtMost;

impl Oracle for AtMost {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("atMost", 0)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Constant)
            .with_monotonicity(MonotonicitySpec::new().antimonotonic(0))
            .with_partial_answer()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let max = query.int(1)?;
        Ok(Answer::nullary(Counts::of(query, 0)?.at_most(max)))
    }
}

//! Majority control by strategic shareholders.

use std::collections::BTreeMap;

use oracleforge_core::{
    Answer, InputKind, MonotonicitySpec, OracleDescriptor, OracleError, Result, TruthValue, Value,
};

use super::{add_holding, holdings, Tally};
use crate::oracle::{Oracle, Query};

/// Sums, per target, the shares held by strategic owners.
///
/// A holding counts when both `owns(O, T, S)` and `strat(O)` hold, so its
/// condition is their Kleene conjunction.
fn strategic_tallies(
    query: &Query<'_>,
    strat: usize,
    owns: usize,
    allow_negative: bool,
) -> Result<BTreeMap<Value, Tally>> {
    let mut tallies: BTreeMap<Value, Tally> = BTreeMap::new();
    for holding in holdings(query, owns, allow_negative)? {
        let condition = holding.value & query.value_at(strat, vec![holding.owner.clone()])?;
        let tally = tallies.entry(holding.target.clone()).or_default();
        add_holding(query, tally, &holding, condition)?;
    }
    Ok(tallies)
}

/// Definite above `threshold` at `low`, Possible above it at `high`.
fn exceeds(low: i64, high: i64, threshold: i64) -> TruthValue {
    if low > threshold {
        TruthValue::True
    } else if high > threshold {
        TruthValue::Undefined
    } else {
        TruthValue::False
    }
}

fn strat_and_owns(name: &'static str) -> OracleDescriptor {
    OracleDescriptor::new(name, 1)
        .with_input(InputKind::Predicate)
        .with_input(InputKind::Predicate)
        .with_partial_answer()
        .with_finite_output_domain(0)
}

/// `&controlsMajority[strat, owns](T)`: strategic owners jointly hold more
/// than `control.majority_threshold` shares of `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlsMajority;

impl Oracle for ControlsMajority {
    fn descriptor(&self) -> OracleDescriptor {
        strat_and_owns("controlsMajority")
            .with_monotonicity(MonotonicitySpec::new().monotonic(0).monotonic(1))
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let threshold = query.config().control.majority_threshold;
        let mut answer = Answer::new();
        for (target, tally) in strategic_tallies(query, 0, 1, false)? {
            answer.insert(
                vec![target],
                exceeds(tally.confirmed, tally.optimistic(), threshold),
            );
        }
        Ok(answer)
    }
}

/// `&controlsMajorityWithMax[strat, owns, max](T)`: as [`ControlsMajority`]
/// with shares in millionths, threshold `control.scaled_majority_threshold`,
/// and the optimistic total capped at `max`.
///
/// `max` must bound every achievable total; confirmed shares above it are
/// reported as a defect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlsMajorityWithMax;

impl Oracle for ControlsMajorityWithMax {
    fn descriptor(&self) -> OracleDescriptor {
        strat_and_owns("controlsMajorityWithMax")
            .with_input(InputKind::Constant)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0).monotonic(1))
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let threshold = query.config().control.scaled_majority_threshold;
        let max = query.int(2)?;
        let mut answer = Answer::new();
        for (target, tally) in strategic_tallies(query, 0, 1, false)? {
            if tally.confirmed > max {
                return Err(OracleError::defect(
                    query.oracle(),
                    format!(
                        "confirmed shares {} of {target} exceed the maximum {max}",
                        tally.confirmed
                    ),
                ));
            }
            let optimistic = tally.optimistic().min(max);
            answer.insert(vec![target], exceeds(tally.confirmed, optimistic, threshold));
        }
        Ok(answer)
    }
}

/// `&controlsMajorityNonmonotonic[strat, owns](T)`: as [`ControlsMajority`]
/// with negative shares allowed.
///
/// Undecided negative holdings lower the pessimistic total and undecided
/// positive holdings raise the optimistic one. Making a fact True can then
/// remove a target, so no position is declared monotonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlsMajorityNonmonotonic;

impl Oracle for ControlsMajorityNonmonotonic {
    fn descriptor(&self) -> OracleDescriptor {
        strat_and_owns("controlsMajorityNonmonotonic")
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let threshold = query.config().control.majority_threshold;
        let mut answer = Answer::new();
        for (target, tally) in strategic_tallies(query, 0, 1, true)? {
            answer.insert(
                vec![target],
                exceeds(tally.pessimistic(), tally.optimistic(), threshold),
            );
        }
        Ok(answer)
    }
}

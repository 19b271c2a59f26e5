//! Oracles that justify their output with nogoods.
//!
//! Each of these can explain every output it produces by a small set of
//! input literals, so besides evaluating it hands those implications to the
//! learner. The implications hold under every assignment, so they are
//! emitted for all observed input facts regardless of their current value.

use oracleforge_core::{
    Answer, Fact, InputKind, Literal, MonotonicitySpec, Nogood, NogoodLearner, OracleDescriptor,
    OracleError, Result, TruthValue,
};
use tracing::warn;

use crate::oracle::{Oracle, Query};

#[cfg(test)]
mod tests;

/// `&id[p](X)`: copies `p`.
///
/// Learns `{p(x), -out(x)}` and `{-p(x), out(x)}` per observed fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id;

impl Oracle for Id {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("id", 1)
            .with_input(InputKind::Predicate)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0))
            .with_partial_answer()
            .with_learning()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let mut answer = Answer::new();
        for (fact, value) in query.facts_of_arity(0, 1)? {
            answer.insert(fact.args().to_vec(), value);
        }
        Ok(answer)
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        for (fact, _) in query.facts_of_arity(0, 1)? {
            let out = query.output_atom(fact.args().to_vec());
            learner.learn(Nogood::from_literals([
                Literal::input(fact.clone(), true),
                Literal::output(out.clone(), false),
            ]));
            learner.learn(Nogood::from_literals([
                Literal::input(fact.clone(), false),
                Literal::output(out, true),
            ]));
        }
        Ok(())
    }
}

/// `&neg[c, p](X)`: yields `c` exactly when `p(c)` does not hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neg;

impl Neg {
    fn probe(query: &Query<'_>) -> Result<Fact> {
        let constant = query.constant(0)?.clone();
        Ok(Fact::new(query.predicate(1)?, vec![constant]))
    }
}

impl Oracle for Neg {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("neg", 1)
            .with_input(InputKind::Constant)
            .with_input(InputKind::Predicate)
            .with_monotonicity(MonotonicitySpec::new().antimonotonic(1))
            .with_partial_answer()
            .with_learning()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let probe = Self::probe(query)?;
        let value = !query.view().value_of(&probe);
        let mut answer = Answer::new();
        answer.insert(probe.args().to_vec(), value);
        Ok(answer)
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        let probe = Self::probe(query)?;
        let out = query.output_atom(probe.args().to_vec());
        learner.learn(Nogood::from_literals([
            Literal::input(probe.clone(), true),
            Literal::output(out.clone(), true),
        ]));
        learner.learn(Nogood::from_literals([
            Literal::input(probe, false),
            Literal::output(out, false),
        ]));
        Ok(())
    }
}

/// `&disj[i, pos, neg]()`: some `pos` member is in `i`, or some `neg`
/// member is not.
///
/// For `pos(1), pos(2), neg(0)` this is `i(1) ∨ i(2) ∨ ¬i(0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disj;

impl Disj {
    /// Disjuncts as `(member fact, member value, probed i fact, required sign)`.
    fn disjuncts<'a>(query: &Query<'a>) -> Result<Vec<(&'a Fact, TruthValue, Fact, bool)>> {
        let i = query.predicate(0)?;
        let mut disjuncts = Vec::new();
        for (position, sign) in [(1, true), (2, false)] {
            for (member, value) in query.facts(position)? {
                disjuncts.push((member, value, member.renamed(i), sign));
            }
        }
        Ok(disjuncts)
    }
}

impl Oracle for Disj {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("disj", 0)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Predicate)
            .with_monotonicity(MonotonicitySpec::new().monotonic(1).monotonic(2))
            .with_partial_answer()
            .with_learning()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let view = query.view();
        let value = TruthValue::any(Self::disjuncts(query)?.into_iter().map(
            |(_, member, probe, sign)| {
                let in_i = view.value_of(&probe);
                let wanted = if sign { in_i } else { !in_i };
                member & wanted
            },
        ));
        Ok(Answer::nullary(value))
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        let out = query.output_atom(Vec::new());
        for (member, _, probe, sign) in Self::disjuncts(query)? {
            learner.learn(Nogood::from_literals([
                Literal::input(member.clone(), true),
                Literal::input(probe, sign),
                Literal::output(out.clone(), false),
            ]));
        }
        Ok(())
    }
}

/// Widest input whose sign combinations still fit a `u64` mask.
const MAX_PARITY_INPUTS: usize = 64;

/// `&parity[p]()`: an even number of `p` facts hold.
///
/// Learning enumerates every sign combination of the first `n - 1` observed
/// facts, forcing the sign of the last one to even parity, and learns one
/// nogood per combination. That is `2^(n-1)` nogoods, so a warning is
/// logged above `learning.parity_warn_inputs` facts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parity;

impl Oracle for Parity {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("parity", 0)
            .with_input(InputKind::Predicate)
            .with_partial_answer()
            .with_learning()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let facts = query.facts(0)?;
        if facts.iter().any(|(_, value)| value.is_undefined()) {
            return Ok(Answer::nullary(TruthValue::Undefined));
        }
        let holding = facts.iter().filter(|(_, value)| value.is_true()).count();
        Ok(Answer::nullary(TruthValue::from(holding % 2 == 0)))
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        let facts = query.facts(0)?;
        let Some(((last, _), rest)) = facts.split_last() else {
            return Ok(());
        };
        if facts.len() > MAX_PARITY_INPUTS {
            return Err(OracleError::mismatch(
                query.oracle(),
                format!(
                    "cannot learn over {} facts, at most {MAX_PARITY_INPUTS} supported",
                    facts.len()
                ),
            ));
        }
        let warn_above = query.config().learning.parity_warn_inputs;
        if facts.len() > warn_above {
            warn!(
                event = "expensive_learning",
                oracle = query.oracle(),
                facts = facts.len(),
                warn_above
            );
        }

        let out = query.output_atom(Vec::new());
        for mask in 0..1u64 << rest.len() {
            let mut literals = Vec::with_capacity(facts.len() + 1);
            for (bit, (fact, _)) in rest.iter().enumerate() {
                literals.push(Literal::input((*fact).clone(), mask & (1 << bit) != 0));
            }
            let last_positive = mask.count_ones() % 2 == 1;
            literals.push(Literal::input((*last).clone(), last_positive));
            literals.push(Literal::output(out.clone(), false));
            learner.learn(Nogood::from_literals(literals));
        }
        Ok(())
    }
}

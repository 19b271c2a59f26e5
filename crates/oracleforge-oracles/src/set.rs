//! Set difference and set union over two predicates.
//!
//! Output tuples carry the arguments of the input facts, so the output
//! arity follows the arity of the facts in `p` and `q`.

use oracleforge_core::{
    Answer, Fact, InputKind, Literal, MonotonicitySpec, Nogood, NogoodLearner, OracleDescriptor,
    Result, TruthValue,
};
use tracing::trace;

use crate::oracle::{Oracle, Query};

/// Computes `p(t) ∧ ¬q(t)` for every candidate `t` observed in `p`.
fn difference(query: &Query<'_>) -> Result<Answer> {
    let q = query.predicate(1)?;
    let mut answer = Answer::new();
    for (fact, in_p) in query.facts(0)? {
        if in_p.is_false() {
            continue;
        }
        let in_q = query.view().value_of(&fact.renamed(q));
        let value = in_p & !in_q;
        trace!(event = "classify", oracle = query.oracle(), fact = %fact, value = %value);
        answer.insert(fact.args().to_vec(), value);
    }
    Ok(answer)
}

fn two_predicates(name: &'static str) -> OracleDescriptor {
    OracleDescriptor::new(name, 1)
        .with_input(InputKind::Predicate)
        .with_input(InputKind::Predicate)
}

/// `&setminus[p, q](X)`: tuples in `p` but not in `q`.
///
/// Monotonic in `p`, antimonotonic in `q`. When `q` is closed, a tuple
/// with no `q` fact is certainly not in `q`.
///
/// Learns `{p(t), -q(t), -out(t)}` for every tuple already decided to be
/// in the difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetMinus;

impl Oracle for SetMinus {
    fn descriptor(&self) -> OracleDescriptor {
        two_predicates("setminus")
            .with_monotonicity(MonotonicitySpec::new().monotonic(0).antimonotonic(1))
            .with_partial_answer()
            .with_learning()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        difference(query)
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        let q = query.predicate(1)?;
        for (fact, in_p) in query.facts(0)? {
            let in_q_fact = fact.renamed(q);
            if in_p.is_true() && query.view().value_of(&in_q_fact).is_false() {
                learner.learn(Nogood::from_literals([
                    Literal::input(fact.clone(), true),
                    Literal::input(in_q_fact, false),
                    Literal::output(query.output_atom(fact.args().to_vec()), false),
                ]));
            }
        }
        Ok(())
    }
}

/// `&setminusNonmonotonic[p, q](X)`: same answers as [`SetMinus`] without
/// any monotonicity declaration, so the host cannot prune on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetMinusNonmonotonic;

impl Oracle for SetMinusNonmonotonic {
    fn descriptor(&self) -> OracleDescriptor {
        two_predicates("setminusNonmonotonic").with_partial_answer()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        difference(query)
    }
}

/// `&setunion[p, q](X)`: tuples in `p` or in `q`.
///
/// Learns `{p(t), -out(t)}` and `{q(t), -out(t)}` for true members.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetUnion;

impl SetUnion {
    fn members<'a>(query: &Query<'a>) -> Result<Vec<(&'a Fact, TruthValue)>> {
        let mut members = query.facts(0)?;
        members.extend(query.facts(1)?);
        Ok(members)
    }
}

impl Oracle for SetUnion {
    fn descriptor(&self) -> OracleDescriptor {
        two_predicates("setunion")
            .with_monotonicity(MonotonicitySpec::new().monotonic(0).monotonic(1))
            .with_partial_answer()
            .with_learning()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let mut answer = Answer::new();
        for (fact, value) in Self::members(query)? {
            answer.insert(fact.args().to_vec(), value);
        }
        Ok(answer)
    }

    fn learn(&self, query: &Query<'_>, learner: &mut dyn NogoodLearner) -> Result<()> {
        for (fact, value) in Self::members(query)? {
            if value.is_true() {
                learner.learn(Nogood::from_literals([
                    Literal::input(fact.clone(), true),
                    Literal::output(query.output_atom(fact.args().to_vec()), false),
                ]));
            }
        }
        Ok(())
    }
}

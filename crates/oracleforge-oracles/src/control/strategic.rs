//! Strategic companies forced by their controllers.

use oracleforge_core::{
    Answer, InputKind, MonotonicitySpec, OracleDescriptor, OracleError, Result, TruthValue,
};

use crate::oracle::{Oracle, Query};

/// `&strategic[strat, controlledBy](C)`: company `C` must be strategic.
///
/// Each `controlledBy(C, C1, ..., Cn)` fact names one group of joint
/// controllers of `C`. `C` is forced when, for some group, the fact holds
/// and every member is strategic:
///
/// ```text
/// out(C) = OR over facts ( controlledBy(C, C1..Cn) AND strat(C1) AND ... AND strat(Cn) )
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Strategic;

impl Oracle for Strategic {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("strategic", 1)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Predicate)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0).monotonic(1))
            .with_partial_answer()
            .with_finite_output_domain(0)
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let mut answer = Answer::new();
        for (fact, value) in query.facts(1)? {
            let Some((company, controllers)) = fact.args().split_first() else {
                return Err(OracleError::invalid_fact(
                    query.oracle(),
                    fact,
                    "expected at least a company and one controller",
                ));
            };
            if controllers.is_empty() {
                return Err(OracleError::invalid_fact(
                    query.oracle(),
                    fact,
                    "expected at least one controller",
                ));
            }
            if value.is_false() {
                continue;
            }

            let mut forced = value;
            for controller in controllers {
                forced = forced & query.value_at(0, vec![controller.clone()])?;
            }
            answer.insert(vec![company.clone()], forced);
        }
        Ok(answer)
    }
}

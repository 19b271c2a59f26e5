//! Soundness and totality checks.

use std::fmt::Debug;

use oracleforge_core::{Answer, Assignment};

use crate::completions::completions;

/// Evaluates `evaluate` on `partial` and on each of its completions and
/// checks that
///
/// - every Definite tuple of the partial answer is Definite in each
///   completion,
/// - every tuple holding in some completion is Definite or Possible in
///   the partial answer,
/// - answers on total assignments have no Possible tuples.
///
/// Returns a description of the first violation.
pub fn check_soundness<E, F>(partial: &Assignment, evaluate: F) -> Result<(), String>
where
    E: Debug,
    F: Fn(&Assignment) -> Result<Answer, E>,
{
    let answer = evaluate(partial).map_err(|err| format!("partial evaluation failed: {err:?}"))?;
    let optimistic = answer.optimistic();

    for completion in completions(partial) {
        let total = evaluate(&completion)
            .map_err(|err| format!("evaluation of a completion failed: {err:?}"))?;

        if !total.is_decided() {
            return Err(format!(
                "total assignment {} still has possible tuples: {total}",
                describe(&completion)
            ));
        }
        if let Some(tuple) = answer.definite().difference(total.definite()).next() {
            return Err(format!(
                "definite {tuple:?} does not hold in completion {}",
                describe(&completion)
            ));
        }
        if let Some(tuple) = total.definite().difference(&optimistic).next() {
            return Err(format!(
                "{tuple:?} holds in completion {} but was excluded from {answer}",
                describe(&completion)
            ));
        }
    }
    Ok(())
}

fn describe(assignment: &Assignment) -> String {
    let parts: Vec<String> = assignment
        .iter()
        .map(|(fact, value)| format!("{fact}={value}"))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{assignment, fact};
    use oracleforge_core::TruthValue::{self, *};
    use oracleforge_core::{AssignmentView, Value};

    fn copy_p(view: &Assignment) -> Result<Answer, ()> {
        let mut answer = Answer::new();
        for (fact, value) in view.known_facts("p") {
            answer.insert(fact.args().to_vec(), value);
        }
        Ok(answer)
    }

    #[test]
    fn test_sound_oracle_passes() {
        let partial = assignment(&[("p(1)", True), ("p(2)", Undefined)]);
        assert_eq!(check_soundness(&partial, copy_p), Ok(()));
    }

    #[test]
    fn test_overclaiming_oracle_fails() {
        let partial = assignment(&[("p(1)", Undefined)]);
        let always_definite = |_: &Assignment| -> Result<Answer, ()> {
            let mut answer = Answer::new();
            answer.insert(vec![Value::Int(1)], TruthValue::True);
            Ok(answer)
        };
        assert!(check_soundness(&partial, always_definite).is_ok());

        let reads_p = |view: &Assignment| -> Result<Answer, ()> {
            let mut answer = Answer::new();
            if view.value_of(&fact("p(1)")).is_false() {
                answer.insert(vec![Value::Int(1)], TruthValue::True);
            }
            Ok(answer)
        };
        let err = check_soundness(&partial, reads_p).unwrap_err();
        assert!(err.contains("excluded"), "{err}");
    }
}

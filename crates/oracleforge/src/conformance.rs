//! Checks that an oracle behaves as its monotonicity declaration promises.
//!
//! For every declared position and every Undefined fact of that predicate,
//! the oracle is evaluated once with the fact forced False and once with it
//! forced True. A monotonic position must not lose Definite or optimistic
//! tuples going from False to True; an antimonotonic one must not gain any.

use std::collections::BTreeSet;

use oracleforge_core::{
    Answer, AssignmentView, Fact, Input, MonotonicitySpec, OracleError, OverlayView, Result,
    TruthValue, Tuple,
};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Monotonic,
    Antimonotonic,
}

fn first_missing<'a>(smaller: &'a BTreeSet<Tuple>, larger: &'a BTreeSet<Tuple>) -> Option<&'a Tuple> {
    smaller.difference(larger).next()
}

fn describe(tuple: &Tuple) -> String {
    let parts: Vec<String> = tuple.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(","))
}

/// Compares the answers with `fact` False and True.
fn compare(direction: Direction, with_false: &Answer, with_true: &Answer) -> Option<String> {
    let (before, after, change) = match direction {
        Direction::Monotonic => (with_false, with_true, "making it true"),
        Direction::Antimonotonic => (with_true, with_false, "making it false"),
    };
    if let Some(tuple) = first_missing(before.definite(), after.definite()) {
        return Some(format!(
            "{change} loses the definite tuple {}",
            describe(tuple)
        ));
    }
    let (before, after) = (before.optimistic(), after.optimistic());
    first_missing(&before, &after)
        .map(|tuple| format!("{change} excludes the tuple {}", describe(tuple)))
}

/// Runs the conformance check for one call.
///
/// `evaluate` must evaluate the same call against the given view.
pub fn check_monotonicity<F>(
    oracle: &str,
    spec: &MonotonicitySpec,
    inputs: &[Input],
    view: &dyn AssignmentView,
    evaluate: F,
) -> Result<()>
where
    F: Fn(&dyn AssignmentView) -> Result<Answer>,
{
    let declared = spec
        .monotonic_positions()
        .map(|position| (position, Direction::Monotonic))
        .chain(
            spec.antimonotonic_positions()
                .map(|position| (position, Direction::Antimonotonic)),
        );

    for (position, direction) in declared {
        let Some(Input::Predicate(predicate)) = inputs.get(position) else {
            return Err(OracleError::mismatch(
                oracle,
                format!("declared position {position} is not a predicate input"),
            ));
        };
        let undecided: Vec<Fact> = view
            .known_facts(predicate)
            .into_iter()
            .filter(|(_, value)| value.is_undefined())
            .map(|(fact, _)| fact.clone())
            .collect();

        for fact in undecided {
            let with_false = evaluate(&OverlayView::new(view, fact.clone(), TruthValue::False))?;
            let with_true = evaluate(&OverlayView::new(view, fact.clone(), TruthValue::True))?;
            trace!(event = "conformance_probe", oracle, position, fact = %fact);
            if let Some(detail) = compare(direction, &with_false, &with_true) {
                return Err(OracleError::MonotonicityViolation {
                    oracle: oracle.to_string(),
                    position,
                    fact,
                    detail,
                });
            }
        }
    }
    Ok(())
}

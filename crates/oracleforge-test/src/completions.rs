//! Total refinements of a partial assignment.

use oracleforge_core::{Assignment, TruthValue};

/// Largest number of Undefined facts [`completions`] will enumerate.
pub const MAX_UNDEFINED: usize = 16;

/// Every total assignment that agrees with `partial` on its known facts.
///
/// Only observed facts are completed; closed predicates stay closed.
///
/// # Panics
///
/// Panics if more than [`MAX_UNDEFINED`] observed facts are Undefined.
///
/// ```
/// use oracleforge_core::TruthValue::*;
/// use oracleforge_test::{assignment, completions};
///
/// let partial = assignment(&[("a", True), ("b", Undefined), ("c", Undefined)]);
/// let all = completions(&partial);
/// assert_eq!(all.len(), 4);
/// assert!(all.iter().all(|c| c.is_total()));
/// ```
pub fn completions(partial: &Assignment) -> Vec<Assignment> {
    let undefined: Vec<_> = partial.undefined_facts().into_iter().cloned().collect();
    assert!(
        undefined.len() <= MAX_UNDEFINED,
        "{} undefined facts are too many to enumerate",
        undefined.len()
    );

    (0u32..1 << undefined.len())
        .map(|mask| {
            let mut total = partial.clone();
            for (bit, fact) in undefined.iter().enumerate() {
                let value = TruthValue::from_bool(mask & (1 << bit) != 0);
                total
                    .assign(fact.clone(), value)
                    .unwrap_or_else(|err| panic!("completion conflict: {err}"));
            }
            total
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{assignment, fact};
    use oracleforge_core::AssignmentView;
    use oracleforge_core::TruthValue::*;

    #[test]
    fn test_total_assignment_has_one_completion() {
        let total = assignment(&[("a", True), ("b", False)]);
        assert_eq!(completions(&total).len(), 1);
    }

    #[test]
    fn test_completions_keep_known_values_and_closure() {
        let mut partial = assignment(&[("p(1)", False), ("p(2)", Undefined)]);
        partial.close("q");
        let all = completions(&partial);
        assert_eq!(all.len(), 2);
        for completion in &all {
            assert_eq!(completion.value_of(&fact("p(1)")), False);
            assert!(completion.is_closed("q"));
        }
        assert_ne!(
            all[0].value_of(&fact("p(2)")),
            all[1].value_of(&fact("p(2)"))
        );
    }
}

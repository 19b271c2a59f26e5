//! Subset-sum feasibility.

use oracleforge_core::{Answer, InputKind, OracleDescriptor, OracleError, Result, TruthValue};
use tracing::{debug, trace};

use crate::oracle::{Oracle, Query};

/// `&subsetSum[w, bound]()`: true iff the weights of the true `w(item,
/// weight)` facts sum to exactly `bound`.
///
/// With `trueSum` over True facts and `possibleSum` over Undefined ones:
///
/// - Definite when `trueSum = bound` and `possibleSum = 0`;
/// - excluded when `trueSum > bound`, when `trueSum + possibleSum < bound`,
///   or when no subset of the Undefined weights makes up `bound - trueSum`;
/// - Possible otherwise.
///
/// The subset check builds a reachability table over `0..=bound - trueSum`
/// and is skipped above `subset_sum.max_table_size`, leaving the answer
/// Possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetSum;

/// Whether some subset of `weights` sums to `target`.
fn reachable(weights: &[i64], target: i64) -> bool {
    let Ok(target) = usize::try_from(target) else {
        return false;
    };
    let mut table = vec![false; target + 1];
    table[0] = true;
    for &weight in weights {
        let Ok(weight) = usize::try_from(weight) else {
            continue;
        };
        if weight == 0 || weight > target {
            continue;
        }
        for sum in (weight..=target).rev() {
            if table[sum - weight] {
                table[sum] = true;
            }
        }
        if table[target] {
            return true;
        }
    }
    table[target]
}

impl Oracle for SubsetSum {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("subsetSum", 0)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Constant)
            .with_partial_answer()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let bound = query.int(1)?;
        let mut true_sum: i64 = 0;
        let mut possible_sum: i64 = 0;
        let mut undefined = Vec::new();

        for (fact, value) in query.facts_of_arity(0, 2)? {
            let weight = query.int_arg(fact, 1)?;
            if weight < 0 {
                return Err(OracleError::invalid_fact(
                    query.oracle(),
                    fact,
                    "weight must be non-negative",
                ));
            }
            let sum = match value {
                TruthValue::True => &mut true_sum,
                TruthValue::Undefined => {
                    undefined.push(weight);
                    &mut possible_sum
                }
                TruthValue::False => continue,
            };
            *sum = sum.checked_add(weight).ok_or_else(|| {
                OracleError::invalid_fact(query.oracle(), fact, "weights overflow the 64-bit sum")
            })?;
        }
        trace!(event = "sums", oracle = query.oracle(), true_sum, possible_sum, bound);

        let short = true_sum
            .checked_add(possible_sum)
            .is_some_and(|total| total < bound);
        let value = if true_sum > bound || short {
            TruthValue::False
        } else if true_sum == bound && possible_sum == 0 {
            TruthValue::True
        } else {
            let residual = bound - true_sum;
            let limit = query.config().subset_sum.max_table_size;
            if u64::try_from(residual).map_or(false, |r| r <= limit) {
                if reachable(&undefined, residual) {
                    TruthValue::Undefined
                } else {
                    TruthValue::False
                }
            } else {
                debug!(event = "table_skipped", oracle = query.oracle(), residual, limit);
                TruthValue::Undefined
            }
        };
        Ok(Answer::nullary(value))
    }
}

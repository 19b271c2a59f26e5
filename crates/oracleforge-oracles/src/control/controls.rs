//! Multi-level corporate control.

use std::collections::{BTreeMap, BTreeSet};

use oracleforge_core::{
    Answer, InputKind, MonotonicitySpec, OracleDescriptor, OracleError, Result, Tuple, Value,
};
use tracing::trace;

use super::{holdings, tally_pairs};
use crate::oracle::{Oracle, Query};

/// `&controls[owns](X, Y)`: company `X` controls `Y`.
///
/// `X` controls `Y` when the shares of `Y` held by `X` together with those
/// held by companies `X` already controls exceed
/// `control.majority_threshold`. The relation is the least fixpoint of that
/// rule: once over True `owns` facts for Definite, once over every fact that
/// is not False for Possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls;

/// Least fixpoint of the control rule over fixed pair totals.
///
/// Pooled totals are summed in `i128`, wide enough for any number of `i64`
/// pair totals.
fn control_relation(shares: &BTreeMap<(Value, Value), i64>, threshold: i64) -> BTreeSet<Tuple> {
    let owners: BTreeSet<&Value> = shares.keys().map(|(owner, _)| owner).collect();
    let targets: BTreeSet<&Value> = shares.keys().map(|(_, target)| target).collect();
    let held = |owner: &Value, target: &Value| {
        shares
            .get(&(owner.clone(), target.clone()))
            .copied()
            .map_or(0, i128::from)
    };
    let threshold = i128::from(threshold);

    let mut relation = BTreeSet::new();
    for &company in &owners {
        let mut controlled: BTreeSet<&Value> = BTreeSet::new();
        loop {
            let mut grew = false;
            for &target in &targets {
                if target == company || controlled.contains(target) {
                    continue;
                }
                let total = held(company, target)
                    + controlled.iter().map(|&via| held(via, target)).sum::<i128>();
                if total > threshold {
                    controlled.insert(target);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }
        relation.extend(
            controlled
                .into_iter()
                .map(|target| vec![company.clone(), target.clone()]),
        );
    }
    relation
}

impl Oracle for Controls {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("controls", 2)
            .with_input(InputKind::Predicate)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0))
            .with_partial_answer()
            .with_finite_output_domain(0)
            .with_finite_output_domain(1)
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let threshold = query.config().control.majority_threshold;
        let pairs = tally_pairs(query, &holdings(query, 0, false)?)?;

        let pessimistic: BTreeMap<_, _> = pairs
            .iter()
            .map(|(pair, tally)| (pair.clone(), tally.pessimistic()))
            .collect();
        let optimistic: BTreeMap<_, _> = pairs
            .iter()
            .map(|(pair, tally)| (pair.clone(), tally.optimistic()))
            .collect();

        let definite = control_relation(&pessimistic, threshold);
        let possible = control_relation(&optimistic, threshold);
        trace!(
            event = "control_fixpoint",
            oracle = query.oracle(),
            definite = definite.len(),
            possible = possible.len()
        );

        Answer::from_bounds(definite, possible)
            .map_err(|err| OracleError::defect(query.oracle(), err.to_string()))
    }
}

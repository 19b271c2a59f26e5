//! Fair allocation of items between two agents.

use oracleforge_config::MAX_ENUMERATED_UNDEFINED;
use oracleforge_core::{Answer, InputKind, OracleDescriptor, Result, TruthValue, Value};
use tracing::debug;

use crate::format::Preferences;
use crate::oracle::{Oracle, Query};

/// `&envyFree[alloc, "prefs.txt"]()`: the allocation is envy-free.
///
/// Item `i` goes to the first agent when `alloc(i)` holds and to the second
/// otherwise. An agent is envy-free when, for every prefix of its ranking,
/// it holds at least as many of those items as the other agent
/// (stochastic dominance).
///
/// Undefined items are settled by enumerating all their completions, up to
/// `enumeration.max_undefined` of them; beyond that the answer is Possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvyFree;

/// Whether `agent` weakly prefers its own bundle under SD comparison.
fn sd_satisfied(prefs: &Preferences, agent: usize, to_first: &[bool]) -> bool {
    let mut own = 0i64;
    let mut other = 0i64;
    for &item in prefs.ranking(agent) {
        let Some(&first) = usize::try_from(item - 1).ok().and_then(|i| to_first.get(i)) else {
            continue;
        };
        if first == (agent == 0) {
            own += 1;
        } else {
            other += 1;
        }
        if own < other {
            return false;
        }
    }
    true
}

fn envy_free(prefs: &Preferences, to_first: &[bool]) -> bool {
    sd_satisfied(prefs, 0, to_first) && sd_satisfied(prefs, 1, to_first)
}

impl Oracle for EnvyFree {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("envyFree", 0)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Constant)
            .with_partial_answer()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let prefs = query.load::<Preferences>(1)?;
        let items = prefs.items();

        let mut to_first = vec![false; items];
        let mut undefined = Vec::new();
        for (index, slot) in to_first.iter_mut().enumerate() {
            let item = Value::Int(index as i64 + 1);
            match query.value_at(0, vec![item])? {
                TruthValue::True => *slot = true,
                TruthValue::False => {}
                TruthValue::Undefined => undefined.push(index),
            }
        }

        let limit = query
            .config()
            .enumeration
            .max_undefined
            .min(MAX_ENUMERATED_UNDEFINED);
        if undefined.len() > limit {
            debug!(
                event = "enumeration_skipped",
                oracle = query.oracle(),
                undefined = undefined.len(),
                limit
            );
            return Ok(Answer::nullary(TruthValue::Undefined));
        }

        let (mut some_fair, mut some_unfair) = (false, false);
        for mask in 0u64..1 << undefined.len() {
            for (bit, &index) in undefined.iter().enumerate() {
                to_first[index] = mask & (1 << bit) != 0;
            }
            if envy_free(&prefs, &to_first) {
                some_fair = true;
            } else {
                some_unfair = true;
            }
            if some_fair && some_unfair {
                break;
            }
        }

        let value = match (some_fair, some_unfair) {
            (true, false) => TruthValue::True,
            (false, _) => TruthValue::False,
            (true, true) => TruthValue::Undefined,
        };
        Ok(Answer::nullary(value))
    }
}

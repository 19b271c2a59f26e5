//! Corporate control and strategic companies.
//!
//! Ownership is read from facts `owns(Owner, Target, Shares)`. Shares of the
//! same pair are summed into a [`Tally`] that keeps decided and undecided
//! contributions apart, so every oracle here derives its pessimistic and
//! optimistic totals from the same accumulator.

mod controls;
mod majority;
mod strategic;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use oracleforge_core::{Fact, OracleError, Result, TruthValue, Value};

use crate::oracle::Query;

pub use controls::Controls;
pub use majority::{ControlsMajority, ControlsMajorityNonmonotonic, ControlsMajorityWithMax};
pub use strategic::Strategic;

/// Running share totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Shares whose facts are all True.
    pub confirmed: i64,
    /// Positive shares whose facts are still Undefined.
    pub gain: i64,
    /// Negative shares whose facts are still Undefined.
    pub loss: i64,
}

impl Tally {
    /// Adds `shares` held under a condition with truth value `value`.
    ///
    /// Returns `None` when a running total or either bound would leave the
    /// `i64` range.
    pub fn checked_add(self, shares: i64, value: TruthValue) -> Option<Self> {
        let mut next = self;
        match value {
            TruthValue::True => next.confirmed = self.confirmed.checked_add(shares)?,
            TruthValue::Undefined if shares >= 0 => next.gain = self.gain.checked_add(shares)?,
            TruthValue::Undefined => next.loss = self.loss.checked_add(shares)?,
            TruthValue::False => {}
        }
        next.confirmed.checked_add(next.gain)?;
        next.confirmed.checked_add(next.loss)?;
        Some(next)
    }

    /// Lowest total any completion can reach.
    ///
    /// Exact for tallies built through [`checked_add`](Self::checked_add).
    pub fn pessimistic(&self) -> i64 {
        self.confirmed.saturating_add(self.loss)
    }

    /// Highest total any completion can reach.
    pub fn optimistic(&self) -> i64 {
        self.confirmed.saturating_add(self.gain)
    }
}

/// One `owns(Owner, Target, Shares)` fact.
#[derive(Debug, Clone)]
pub(crate) struct Holding<'a> {
    pub fact: &'a Fact,
    pub owner: Value,
    pub target: Value,
    pub shares: i64,
    pub value: TruthValue,
}

/// Reads the ownership facts at `position`.
///
/// Negative shares are rejected unless `allow_negative` is set.
pub(crate) fn holdings<'a>(
    query: &Query<'a>,
    position: usize,
    allow_negative: bool,
) -> Result<Vec<Holding<'a>>> {
    query
        .facts_of_arity(position, 3)?
        .into_iter()
        .map(|(fact, value)| {
            let shares = query.int_arg(fact, 2)?;
            if shares < 0 && !allow_negative {
                return Err(OracleError::invalid_fact(
                    query.oracle(),
                    fact,
                    "shares must be non-negative",
                ));
            }
            Ok(Holding {
                fact,
                owner: fact.args()[0].clone(),
                target: fact.args()[1].clone(),
                shares,
                value,
            })
        })
        .collect()
}

/// Counts `holding` into `tally` under `condition`.
pub(crate) fn add_holding(
    query: &Query<'_>,
    tally: &mut Tally,
    holding: &Holding<'_>,
    condition: TruthValue,
) -> Result<()> {
    *tally = tally
        .checked_add(holding.shares, condition)
        .ok_or_else(|| {
            OracleError::invalid_fact(
                query.oracle(),
                holding.fact,
                "shares overflow the 64-bit total",
            )
        })?;
    Ok(())
}

/// Sums holdings per `(owner, target)` pair.
pub(crate) fn tally_pairs(
    query: &Query<'_>,
    holdings: &[Holding<'_>],
) -> Result<BTreeMap<(Value, Value), Tally>> {
    let mut pairs: BTreeMap<(Value, Value), Tally> = BTreeMap::new();
    for holding in holdings {
        let tally = pairs
            .entry((holding.owner.clone(), holding.target.clone()))
            .or_default();
        add_holding(query, tally, holding, holding.value)?;
    }
    Ok(pairs)
}

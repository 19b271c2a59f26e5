//! Partial assignments and read-only views over them.
//!
//! The host owns the assignment; oracles only ever see an
//! [`AssignmentView`]. A fact the view has never observed is Undefined
//! unless its predicate is closed, in which case it is False.

mod overlay;
mod restricted;

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::fact::Fact;
use crate::truth::TruthValue;

pub use overlay::OverlayView;
pub use restricted::RestrictedView;

/// Read access to the current (possibly partial) truth values.
pub trait AssignmentView: Sync {
    /// Truth value of a fact.
    fn value_of(&self, fact: &Fact) -> TruthValue;

    /// All observed facts of a predicate with their values, in
    /// first-observation order.
    fn known_facts(&self, predicate: &str) -> Vec<(&Fact, TruthValue)>;

    /// Whether unobserved facts of this predicate are False.
    fn is_closed(&self, predicate: &str) -> bool;
}

/// Assignment error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// A known value would be changed or forgotten.
    #[error("fact {fact} is already {current}, cannot become {requested}")]
    Conflict {
        fact: Fact,
        current: TruthValue,
        requested: TruthValue,
    },
}

/// A mapping from facts to truth values, ordered by first observation.
///
/// # Examples
///
/// ```
/// use oracleforge_core::{Assignment, AssignmentView, Fact, TruthValue};
///
/// let mut assignment = Assignment::new();
/// let p1: Fact = "p(1)".parse().unwrap();
/// assignment.assign(p1.clone(), TruthValue::Undefined).unwrap();
/// assignment.assign(p1.clone(), TruthValue::True).unwrap();
///
/// assert_eq!(assignment.value_of(&p1), TruthValue::True);
/// assert!(assignment.assign(p1, TruthValue::False).is_err());
///
/// let q1: Fact = "q(1)".parse().unwrap();
/// assert_eq!(assignment.value_of(&q1), TruthValue::Undefined);
/// assignment.close("q");
/// assert_eq!(assignment.value_of(&q1), TruthValue::False);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    facts: Vec<(Fact, TruthValue)>,
    index: HashMap<Fact, usize>,
    by_predicate: HashMap<String, Vec<usize>>,
    closed: HashSet<String>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment from `(fact, value)` pairs in observation order.
    pub fn from_facts<I>(facts: I) -> Result<Self, AssignmentError>
    where
        I: IntoIterator<Item = (Fact, TruthValue)>,
    {
        let mut assignment = Self::new();
        for (fact, value) in facts {
            assignment.assign(fact, value)?;
        }
        Ok(assignment)
    }

    /// Records a value for a fact.
    ///
    /// Observing a fact as Undefined places it in the domain without
    /// deciding it. A known value may only be repeated, never changed.
    pub fn assign(&mut self, fact: Fact, value: TruthValue) -> Result<(), AssignmentError> {
        if let Some(&slot) = self.index.get(&fact) {
            let current = self.facts[slot].1;
            if !value.refines(current) {
                return Err(AssignmentError::Conflict {
                    fact,
                    current,
                    requested: value,
                });
            }
            self.facts[slot].1 = value;
            return Ok(());
        }

        let slot = self.facts.len();
        self.by_predicate
            .entry(fact.predicate().to_string())
            .or_default()
            .push(slot);
        self.index.insert(fact.clone(), slot);
        self.facts.push((fact, value));
        Ok(())
    }

    pub fn set_true(&mut self, fact: Fact) -> Result<(), AssignmentError> {
        self.assign(fact, TruthValue::True)
    }

    pub fn set_false(&mut self, fact: Fact) -> Result<(), AssignmentError> {
        self.assign(fact, TruthValue::False)
    }

    pub fn set_undefined(&mut self, fact: Fact) -> Result<(), AssignmentError> {
        self.assign(fact, TruthValue::Undefined)
    }

    /// Marks a predicate as closed: unobserved facts of it are False.
    pub fn close(&mut self, predicate: impl Into<String>) {
        self.closed.insert(predicate.into());
    }

    /// Returns a copy with one more fact decided.
    pub fn refined(&self, fact: Fact, value: bool) -> Result<Self, AssignmentError> {
        let mut next = self.clone();
        next.assign(fact, TruthValue::from_bool(value))?;
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterates over all observed facts in observation order.
    pub fn iter(&self) -> impl Iterator<Item = (&Fact, TruthValue)> {
        self.facts.iter().map(|(fact, value)| (fact, *value))
    }

    /// Observed facts that are still Undefined, in observation order.
    pub fn undefined_facts(&self) -> Vec<&Fact> {
        self.iter()
            .filter(|(_, value)| value.is_undefined())
            .map(|(fact, _)| fact)
            .collect()
    }

    /// Returns true if no observed fact is Undefined.
    pub fn is_total(&self) -> bool {
        self.facts.iter().all(|(_, value)| value.is_known())
    }

    /// Names of all closed predicates.
    pub fn closed_predicates(&self) -> impl Iterator<Item = &str> {
        self.closed.iter().map(String::as_str)
    }
}

impl AssignmentView for Assignment {
    fn value_of(&self, fact: &Fact) -> TruthValue {
        match self.index.get(fact) {
            Some(&slot) => self.facts[slot].1,
            None if self.closed.contains(fact.predicate()) => TruthValue::False,
            None => TruthValue::Undefined,
        }
    }

    fn known_facts(&self, predicate: &str) -> Vec<(&Fact, TruthValue)> {
        self.by_predicate
            .get(predicate)
            .map(|slots| {
                slots
                    .iter()
                    .map(|&slot| {
                        let (fact, value) = &self.facts[slot];
                        (fact, *value)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_closed(&self, predicate: &str) -> bool {
        self.closed.contains(predicate)
    }
}

//! Oracle answers: definite and possible output tuples.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::truth::TruthValue;
use crate::value::Tuple;

/// Verdict for a single output tuple. Absence means excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// Holds under every completion of the Undefined facts.
    Definite,
    /// Holds under some completion but not provably under all.
    Possible,
}

/// Raised when an oracle's bounds contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pessimistic output {tuple:?} is missing from the optimistic output")]
pub struct AnswerError {
    pub tuple: Tuple,
}

/// The result of one oracle call.
///
/// `definite` and `possible` are disjoint; both are ordered so repeated
/// calls with the same input produce identical answers.
///
/// # Examples
///
/// ```
/// use oracleforge_core::{Answer, TruthValue, Value, Verdict};
///
/// let mut answer = Answer::new();
/// answer.insert(vec![Value::Int(1)], TruthValue::True);
/// answer.insert(vec![Value::Int(2)], TruthValue::Undefined);
/// answer.insert(vec![Value::Int(3)], TruthValue::False);
///
/// assert_eq!(answer.verdict(&[Value::Int(1)]), Some(Verdict::Definite));
/// assert_eq!(answer.verdict(&[Value::Int(2)]), Some(Verdict::Possible));
/// assert_eq!(answer.verdict(&[Value::Int(3)]), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Answer {
    definite: BTreeSet<Tuple>,
    possible: BTreeSet<Tuple>,
}

impl Answer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for a zero-arity oracle whose single output has value `value`.
    pub fn nullary(value: TruthValue) -> Self {
        let mut answer = Self::new();
        answer.insert(Vec::new(), value);
        answer
    }

    /// Builds an answer from the pessimistic and optimistic output sets.
    ///
    /// Tuples in both sets are Definite, tuples only in the optimistic set
    /// are Possible. A pessimistic tuple absent from the optimistic set is
    /// a defect in the oracle and is reported.
    pub fn from_bounds(
        pessimistic: BTreeSet<Tuple>,
        optimistic: BTreeSet<Tuple>,
    ) -> Result<Self, AnswerError> {
        if let Some(tuple) = pessimistic.difference(&optimistic).next() {
            return Err(AnswerError {
                tuple: tuple.clone(),
            });
        }
        let possible = optimistic.difference(&pessimistic).cloned().collect();
        Ok(Self {
            definite: pessimistic,
            possible,
        })
    }

    /// Records a tuple with its Kleene value.
    ///
    /// True marks it Definite, Undefined marks it Possible unless it is
    /// already Definite, False leaves the answer unchanged.
    pub fn insert(&mut self, tuple: Tuple, value: TruthValue) {
        match value {
            TruthValue::True => {
                self.possible.remove(&tuple);
                self.definite.insert(tuple);
            }
            TruthValue::Undefined => {
                if !self.definite.contains(&tuple) {
                    self.possible.insert(tuple);
                }
            }
            TruthValue::False => {}
        }
    }

    pub fn verdict(&self, tuple: &[crate::value::Value]) -> Option<Verdict> {
        if self.definite.contains(tuple) {
            Some(Verdict::Definite)
        } else if self.possible.contains(tuple) {
            Some(Verdict::Possible)
        } else {
            None
        }
    }

    /// Kleene value of a tuple: Definite is True, Possible is Undefined.
    pub fn truth_of(&self, tuple: &[crate::value::Value]) -> TruthValue {
        match self.verdict(tuple) {
            Some(Verdict::Definite) => TruthValue::True,
            Some(Verdict::Possible) => TruthValue::Undefined,
            None => TruthValue::False,
        }
    }

    pub fn definite(&self) -> &BTreeSet<Tuple> {
        &self.definite
    }

    pub fn possible(&self) -> &BTreeSet<Tuple> {
        &self.possible
    }

    /// Definite and Possible tuples together.
    pub fn optimistic(&self) -> BTreeSet<Tuple> {
        self.definite.union(&self.possible).cloned().collect()
    }

    /// Iterates over all tuples with their verdicts, Definite first.
    pub fn iter(&self) -> impl Iterator<Item = (&Tuple, Verdict)> {
        self.definite
            .iter()
            .map(|t| (t, Verdict::Definite))
            .chain(self.possible.iter().map(|t| (t, Verdict::Possible)))
    }

    pub fn len(&self) -> usize {
        self.definite.len() + self.possible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definite.is_empty() && self.possible.is_empty()
    }

    /// Returns true if no tuple is merely Possible.
    pub fn is_decided(&self) -> bool {
        self.possible.is_empty()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |tuple: &Tuple| {
            let parts: Vec<String> = tuple.iter().map(ToString::to_string).collect();
            format!("({})", parts.join(","))
        };
        let definite: Vec<String> = self.definite.iter().map(render).collect();
        let possible: Vec<String> = self.possible.iter().map(render).collect();
        write!(
            f,
            "definite {{{}}} possible {{{}}}",
            definite.join(", "),
            possible.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn t(i: i64) -> Tuple {
        vec![Value::Int(i)]
    }

    #[test]
    fn test_from_bounds() {
        let pessimistic = BTreeSet::from([t(1)]);
        let optimistic = BTreeSet::from([t(1), t(2)]);
        let answer = Answer::from_bounds(pessimistic, optimistic).unwrap();
        assert_eq!(answer.definite(), &BTreeSet::from([t(1)]));
        assert_eq!(answer.possible(), &BTreeSet::from([t(2)]));
    }

    #[test]
    fn test_from_bounds_rejects_inverted_bounds() {
        let err = Answer::from_bounds(BTreeSet::from([t(3)]), BTreeSet::new()).unwrap_err();
        assert_eq!(err.tuple, t(3));
    }

    #[test]
    fn test_insert_true_upgrades_possible() {
        let mut answer = Answer::new();
        answer.insert(t(1), TruthValue::Undefined);
        answer.insert(t(1), TruthValue::True);
        answer.insert(t(1), TruthValue::Undefined);
        assert_eq!(answer.verdict(&t(1)), Some(Verdict::Definite));
        assert!(answer.is_decided());
        assert_eq!(answer.len(), 1);
    }

    #[test]
    fn test_nullary() {
        assert_eq!(
            Answer::nullary(TruthValue::True).truth_of(&[]),
            TruthValue::True
        );
        assert_eq!(
            Answer::nullary(TruthValue::Undefined).truth_of(&[]),
            TruthValue::Undefined
        );
        assert!(Answer::nullary(TruthValue::False).is_empty());
    }

    #[test]
    fn test_display() {
        let mut answer = Answer::new();
        answer.insert(t(1), TruthValue::True);
        answer.insert(t(2), TruthValue::Undefined);
        assert_eq!(answer.to_string(), "definite {(1)} possible {(2)}");
    }
}

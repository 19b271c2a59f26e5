//! Nogoods and the learner side channel.
//!
//! A nogood is a set of signed literals that can never hold together.
//! Learning oracles emit nogoods of the shape `{inputs..., -out(t)}`:
//! "whenever these inputs hold, the output atom cannot be false".

use std::fmt;

use smallvec::SmallVec;

use crate::answer::Answer;
use crate::fact::Fact;
use crate::input::Input;
use crate::truth::TruthValue;
use crate::value::Tuple;

/// The output atom of one oracle call for one tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputAtom {
    pub oracle: String,
    pub inputs: Vec<Input>,
    pub tuple: Tuple,
}

impl OutputAtom {
    pub fn new(oracle: impl Into<String>, inputs: Vec<Input>, tuple: Tuple) -> Self {
        Self {
            oracle: oracle.into(),
            inputs,
            tuple,
        }
    }
}

impl fmt::Display for OutputAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<String> = self.inputs.iter().map(ToString::to_string).collect();
        let outputs: Vec<String> = self.tuple.iter().map(ToString::to_string).collect();
        write!(f, "&{}[{}]({})", self.oracle, inputs.join(","), outputs.join(","))
    }
}

/// An atom a literal can talk about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Input(Fact),
    Output(OutputAtom),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Input(fact) => write!(f, "{fact}"),
            Atom::Output(output) => write!(f, "{output}"),
        }
    }
}

/// A signed atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub atom: Atom,
    pub positive: bool,
}

impl Literal {
    pub fn new(atom: Atom, positive: bool) -> Self {
        Self { atom, positive }
    }

    /// An input fact holding with the given sign.
    pub fn input(fact: Fact, positive: bool) -> Self {
        Self::new(Atom::Input(fact), positive)
    }

    /// An output atom holding with the given sign.
    pub fn output(output: OutputAtom, positive: bool) -> Self {
        Self::new(Atom::Output(output), positive)
    }

    pub fn negate(&self) -> Self {
        Self::new(self.atom.clone(), !self.positive)
    }

    /// Truth of this literal given the value of its atom.
    pub fn holds(&self, atom_value: TruthValue) -> TruthValue {
        if self.positive {
            atom_value
        } else {
            !atom_value
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "-{}", self.atom)
        }
    }
}

/// A conjunction of literals that must never be satisfied.
///
/// # Examples
///
/// ```
/// use oracleforge_core::{Fact, Literal, Nogood, OutputAtom, Value};
///
/// let out = OutputAtom::new("id", vec![], vec![Value::Int(1)]);
/// let nogood = Nogood::from_literals([
///     Literal::input("p(1)".parse::<Fact>().unwrap(), true),
///     Literal::output(out, false),
/// ]);
/// assert_eq!(nogood.len(), 2);
/// assert_eq!(nogood.to_string(), "{p(1), -&id[](1)}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Nogood {
    literals: SmallVec<[Literal; 4]>,
}

impl Nogood {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_literals<I>(literals: I) -> Self
    where
        I: IntoIterator<Item = Literal>,
    {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Appends a literal, keeping insertion order.
    pub fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Kleene value of the conjunction, reading input facts from
    /// `inputs` and output atoms from `answer`.
    ///
    /// A sound nogood never evaluates to True against a total assignment
    /// and the answer computed for it.
    pub fn evaluate(
        &self,
        inputs: &dyn crate::assignment::AssignmentView,
        answer: &Answer,
    ) -> TruthValue {
        TruthValue::all(self.literals.iter().map(|literal| {
            let value = match &literal.atom {
                Atom::Input(fact) => inputs.value_of(fact),
                Atom::Output(output) => answer.truth_of(&output.tuple),
            };
            literal.holds(value)
        }))
    }
}

impl fmt::Display for Nogood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.literals.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Receives nogoods emitted by learning oracles.
pub trait NogoodLearner {
    fn learn(&mut self, nogood: Nogood);
}

impl NogoodLearner for Vec<Nogood> {
    fn learn(&mut self, nogood: Nogood) {
        self.push(nogood);
    }
}

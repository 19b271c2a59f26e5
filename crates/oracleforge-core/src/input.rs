//! Oracle call inputs.

use std::fmt;

use crate::value::Value;

/// Declared kind of an input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InputKind {
    /// A constant term.
    Constant,
    /// A predicate name whose extension is read from the assignment.
    Predicate,
    /// Any number of trailing constants. Only valid as the last position.
    Tuple,
}

/// An actual input passed to an oracle call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    Predicate(String),
    Constant(Value),
    Tuple(Vec<Value>),
}

impl Input {
    pub fn predicate(name: impl Into<String>) -> Self {
        Input::Predicate(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Input::Constant(value.into())
    }

    pub fn kind(&self) -> InputKind {
        match self {
            Input::Predicate(_) => InputKind::Predicate,
            Input::Constant(_) => InputKind::Constant,
            Input::Tuple(_) => InputKind::Tuple,
        }
    }

    /// Returns the predicate name if this is a predicate input.
    pub fn as_predicate(&self) -> Option<&str> {
        match self {
            Input::Predicate(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Predicate(name) => write!(f, "{name}"),
            Input::Constant(value) => write!(f, "{value}"),
            Input::Tuple(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

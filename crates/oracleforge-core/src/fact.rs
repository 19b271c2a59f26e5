//! Ground facts observed by the host.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::value::{Tuple, Value, ValueError};

/// A ground atom: predicate name plus argument tuple.
///
/// # Examples
///
/// ```
/// use oracleforge_core::{Fact, Value};
///
/// let fact: Fact = "owns(a, b, 60)".parse().unwrap();
/// assert_eq!(fact.predicate(), "owns");
/// assert_eq!(fact.arity(), 3);
/// assert_eq!(fact.arg(2), Some(&Value::Int(60)));
/// assert_eq!(fact.to_string(), "owns(a,b,60)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fact {
    predicate: String,
    args: Tuple,
}

/// Error parsing a fact from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactParseError {
    #[error("missing predicate name in `{0}`")]
    MissingPredicate(String),

    #[error("unbalanced parentheses in `{0}`")]
    Unbalanced(String),

    #[error("bad argument in `{fact}`: {source}")]
    Argument {
        fact: String,
        #[source]
        source: ValueError,
    },
}

impl Fact {
    /// Creates a fact from a predicate name and its arguments.
    pub fn new(predicate: impl Into<String>, args: Tuple) -> Self {
        Fact {
            predicate: predicate.into(),
            args,
        }
    }

    /// Creates a propositional (zero-arity) fact.
    pub fn atom(predicate: impl Into<String>) -> Self {
        Fact::new(predicate, Vec::new())
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Returns the argument tuple, consuming the fact.
    pub fn into_args(self) -> Tuple {
        self.args
    }

    /// Same arguments under another predicate name.
    pub fn renamed(&self, predicate: &str) -> Fact {
        Fact::new(predicate, self.args.clone())
    }
}

impl FromStr for Fact {
    type Err = FactParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (name, rest) = match text.find('(') {
            Some(open) => (&text[..open], Some(&text[open..])),
            None => (text, None),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(FactParseError::MissingPredicate(text.to_string()));
        }

        let Some(rest) = rest else {
            return Ok(Fact::atom(name));
        };
        if !rest.ends_with(')') {
            return Err(FactParseError::Unbalanced(text.to_string()));
        }
        let inner = &rest[1..rest.len() - 1];
        if inner.trim().is_empty() {
            return Ok(Fact::atom(name));
        }

        let args = split_arguments(inner)
            .ok_or_else(|| FactParseError::Unbalanced(text.to_string()))?
            .into_iter()
            .map(|token| {
                token.parse::<Value>().map_err(|source| FactParseError::Argument {
                    fact: text.to_string(),
                    source,
                })
            })
            .collect::<Result<Tuple, _>>()?;

        Ok(Fact::new(name, args))
    }
}

/// Splits on top-level commas, keeping quoted commas intact.
fn split_arguments(inner: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut prev = '\0';

    for (i, c) in inner.char_indices() {
        match c {
            '"' if prev != '\\' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            '(' | ')' if !in_quotes => return None,
            _ => {}
        }
        prev = c;
    }
    if in_quotes {
        return None;
    }
    parts.push(&inner[start..]);
    Some(parts)
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "({first}")?;
            for arg in rest {
                write!(f, ",{arg}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

//! Constant values carried by facts and oracle inputs.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A constant term.
///
/// # Examples
///
/// ```
/// use oracleforge_core::Value;
///
/// let v: Value = "42".parse().unwrap();
/// assert_eq!(v.as_int().unwrap(), 42);
///
/// let s: Value = "\"graph.txt\"".parse().unwrap();
/// assert_eq!(s.as_str().unwrap(), "graph.txt");
///
/// let c: Value = "acme".parse().unwrap();
/// assert!(c.as_int().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// An integer term.
    Int(i64),
    /// A quoted string term.
    Str(String),
    /// A symbolic constant.
    Const(String),
}

/// Kind of a [`Value`], used in type-mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Str,
    Const,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "integer"),
            ValueKind::Str => write!(f, "string"),
            ValueKind::Const => write!(f, "constant"),
        }
    }
}

/// An ordered sequence of values.
pub type Tuple = Vec<Value>;

/// Value conversion error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: Value },

    #[error("cannot parse `{0}` as a term")]
    Malformed(String),
}

impl Value {
    /// Creates an integer value.
    pub fn int(value: i64) -> Self {
        Value::Int(value)
    }

    /// Creates a quoted string value.
    pub fn string(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Creates a symbolic constant.
    pub fn constant(value: impl Into<String>) -> Self {
        Value::Const(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Str(_) => ValueKind::Str,
            Value::Const(_) => ValueKind::Const,
        }
    }

    /// Returns the integer payload.
    pub fn as_int(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(ValueError::TypeMismatch {
                expected: ValueKind::Int,
                found: other.clone(),
            }),
        }
    }

    /// Returns the payload of a quoted string.
    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(ValueError::TypeMismatch {
                expected: ValueKind::Str,
                found: other.clone(),
            }),
        }
    }

    /// Returns the name of a symbolic constant.
    pub fn as_symbol(&self) -> Result<&str, ValueError> {
        match self {
            Value::Const(s) => Ok(s),
            other => Err(ValueError::TypeMismatch {
                expected: ValueKind::Const,
                found: other.clone(),
            }),
        }
    }

    /// Returns the text of a string or constant (file names accept both).
    pub fn as_text(&self) -> Result<&str, ValueError> {
        match self {
            Value::Str(s) | Value::Const(s) => Ok(s),
            other => Err(ValueError::TypeMismatch {
                expected: ValueKind::Str,
                found: other.clone(),
            }),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    /// Symbolic constant from a string slice.
    fn from(value: &str) -> Self {
        Value::Const(value.to_string())
    }
}

impl FromStr for Value {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Ok(i) = token.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            let inner = &token[1..token.len() - 1];
            return Ok(Value::Str(inner.replace("\\\"", "\"")));
        }
        let valid = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '\'' || c == '-' || c == '.');
        if valid {
            Ok(Value::Const(token.to_string()))
        } else {
            Err(ValueError::Malformed(token.to_string()))
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Const(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("-7".parse::<Value>().unwrap(), Value::Int(-7));
        assert_eq!("\"a b\"".parse::<Value>().unwrap(), Value::string("a b"));
        assert_eq!("acme".parse::<Value>().unwrap(), Value::constant("acme"));
        assert!("a(b".parse::<Value>().is_err());
        assert!("".parse::<Value>().is_err());
    }

    #[test]
    fn test_typed_accessors_fail_explicitly() {
        let err = Value::constant("x").as_int().unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: ValueKind::Int,
                found: Value::constant("x"),
            }
        );
        assert!(Value::Int(1).as_str().is_err());
        assert!(Value::Int(1).as_symbol().is_err());
        assert_eq!(Value::constant("f.cnf").as_text().unwrap(), "f.cnf");
    }

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(Value::string("x").to_string(), "\"x\"");
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::constant("c").to_string(), "c");
    }
}

//! Pseudo-Boolean constraint files.

use std::fmt;

use super::{parse_int, parse_literal, FileFormat, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
    Equal,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::AtLeast => write!(f, ">="),
            Comparison::AtMost => write!(f, "<="),
            Comparison::Equal => write!(f, "="),
        }
    }
}

/// `coefficient * literal`; a negative literal is the negated variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PbTerm {
    pub coefficient: i64,
    pub literal: i64,
}

/// `sum of terms OP bound`.
///
/// Parsed constraints keep the positive and the negative coefficients each
/// summing within `i64`, so every partial left-hand side fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbConstraint {
    pub terms: Vec<PbTerm>,
    pub comparison: Comparison,
    pub bound: i64,
}

impl PbConstraint {
    /// Whether a left-hand side interval `[low, high]` certainly satisfies
    /// (`Some(true)`), certainly violates (`Some(false)`) or may go either
    /// way (`None`).
    pub fn decide(&self, low: i64, high: i64) -> Option<bool> {
        let k = self.bound;
        match self.comparison {
            Comparison::AtLeast if low >= k => Some(true),
            Comparison::AtLeast if high < k => Some(false),
            Comparison::AtMost if high <= k => Some(true),
            Comparison::AtMost if low > k => Some(false),
            Comparison::Equal if low == k && high == k => Some(true),
            Comparison::Equal if k < low || k > high => Some(false),
            _ => None,
        }
    }
}

/// A conjunction of pseudo-Boolean constraints, one per line.
///
/// Lines starting with `c`, `p` or `*` are comments. A constraint reads
/// `3*1 2*-4 >= 3;` with the trailing semicolon optional and `+` between
/// terms allowed.
///
/// # Examples
///
/// ```
/// use oracleforge_oracles::format::{Comparison, PbFormula};
/// use oracleforge_oracles::FileFormat;
///
/// let pb = PbFormula::parse("* demo\n2*1 + 1*-2 >= 2;\n1*3 = 1\n").unwrap();
/// assert_eq!(pb.constraints().len(), 2);
/// assert_eq!(pb.constraints()[0].comparison, Comparison::AtLeast);
/// assert_eq!(pb.constraints()[0].terms[1].literal, -2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbFormula {
    constraints: Vec<PbConstraint>,
}

impl PbFormula {
    pub fn constraints(&self) -> &[PbConstraint] {
        &self.constraints
    }
}

fn parse_term(token: &str, line: usize) -> Result<PbTerm, ParseError> {
    let invalid = || ParseError::InvalidToken {
        line,
        token: token.to_string(),
    };
    let (coefficient, literal) = token.split_once('*').ok_or_else(invalid)?;
    let coefficient = parse_int(coefficient, line)?;
    let literal = parse_literal(literal, line)?;
    if literal == 0 {
        return Err(invalid());
    }
    Ok(PbTerm {
        coefficient,
        literal,
    })
}

/// Whether the positive and the negative coefficients each sum within `i64`.
fn coefficients_fit(terms: &[PbTerm]) -> bool {
    terms
        .iter()
        .try_fold((0i64, 0i64), |(negative, positive), term| {
            if term.coefficient < 0 {
                Some((negative.checked_add(term.coefficient)?, positive))
            } else {
                Some((negative, positive.checked_add(term.coefficient)?))
            }
        })
        .is_some()
}

impl FileFormat for PbFormula {
    const NAME: &'static str = "pb";

    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut constraints = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty()
                || trimmed.starts_with('c')
                || trimmed.starts_with('p')
                || trimmed.starts_with('*')
            {
                continue;
            }
            let body = trimmed.strip_suffix(';').unwrap_or(trimmed);

            let mut terms = Vec::new();
            let mut comparison = None;
            let mut bound = None;
            for token in body.split_ascii_whitespace() {
                match (token, comparison) {
                    ("+", None) => {}
                    (">=", None) => comparison = Some(Comparison::AtLeast),
                    ("<=", None) => comparison = Some(Comparison::AtMost),
                    ("=", None) => comparison = Some(Comparison::Equal),
                    (_, None) => terms.push(parse_term(token, line_no)?),
                    (_, Some(_)) if bound.is_none() => bound = Some(parse_int(token, line_no)?),
                    (_, Some(_)) => {
                        return Err(ParseError::InvalidToken {
                            line: line_no,
                            token: token.to_string(),
                        })
                    }
                }
            }

            let comparison = comparison.ok_or(ParseError::MissingOperator { line: line_no })?;
            if !coefficients_fit(&terms) {
                return Err(ParseError::CoefficientOverflow { line: line_no });
            }
            let bound = bound.ok_or(ParseError::MissingOperator { line: line_no })?;
            constraints.push(PbConstraint {
                terms,
                comparison,
                bound,
            });
        }

        Ok(Self { constraints })
    }
}

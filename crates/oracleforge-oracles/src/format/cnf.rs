//! DIMACS-style CNF files.

use super::{parse_literal, FileFormat, ParseError};

/// A disjunction of signed variable indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause(pub Vec<i64>);

impl Clause {
    pub fn literals(&self) -> &[i64] {
        &self.0
    }
}

/// A conjunction of clauses.
///
/// Lines starting with `c` or `p` and blank lines are ignored. Every other
/// line is one clause terminated by `0`.
///
/// # Examples
///
/// ```
/// use oracleforge_oracles::format::Cnf;
/// use oracleforge_oracles::FileFormat;
///
/// let cnf = Cnf::parse("c demo\np cnf 3 2\n1 -2 0\n3 0\n").unwrap();
/// assert_eq!(cnf.clauses().len(), 2);
/// assert_eq!(cnf.clauses()[0].literals(), &[1, -2]);
///
/// assert!(Cnf::parse("0\n").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

impl FileFormat for Cnf {
    const NAME: &'static str = "cnf";

    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut clauses = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('c') || trimmed.starts_with('p') {
                continue;
            }

            let mut literals = Vec::new();
            let mut terminated = false;
            for token in trimmed.split_ascii_whitespace() {
                if terminated {
                    return Err(ParseError::InvalidToken {
                        line: line_no,
                        token: token.to_string(),
                    });
                }
                match parse_literal(token, line_no)? {
                    0 => terminated = true,
                    lit => literals.push(lit),
                }
            }

            if !terminated {
                return Err(ParseError::MissingTerminator { line: line_no });
            }
            if literals.is_empty() {
                return Err(ParseError::EmptyClause { line: line_no });
            }
            clauses.push(Clause(literals));
        }

        Ok(Self { clauses })
    }
}

//! Shared helpers: errors, assignment files, input parsing.

use std::path::{Path, PathBuf};

use oracleforge::{
    Assignment, AssignmentError, ConfigError, Fact, FactParseError, Input, InputKind,
    OracleDescriptor, TruthValue, Value,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Oracle(#[from] oracleforge::OracleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid assignment file {}: {reason}", path.display())]
    AssignmentFile { path: PathBuf, reason: String },

    #[error("{0}")]
    Usage(String),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T = ()> = Result<T, CliError>;

/// Assignment file layout.
///
/// ```toml
/// true = ["p(1)", "owns(a,b,60)"]
/// false = ["q(1)"]
/// undefined = ["p(2)"]
/// closed = ["q"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignmentFile {
    #[serde(rename = "true", default)]
    pub true_facts: Vec<String>,
    #[serde(rename = "false", default)]
    pub false_facts: Vec<String>,
    #[serde(default)]
    pub undefined: Vec<String>,
    #[serde(default)]
    pub closed: Vec<String>,
}

impl AssignmentFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|err| CliError::AssignmentFile {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Builds the assignment, in file order: true, false, then undefined.
    pub fn to_assignment(&self, path: &Path) -> CliResult<Assignment> {
        let invalid = |reason: String| CliError::AssignmentFile {
            path: path.to_path_buf(),
            reason,
        };
        let groups = [
            (&self.true_facts, TruthValue::True),
            (&self.false_facts, TruthValue::False),
            (&self.undefined, TruthValue::Undefined),
        ];

        let mut assignment = Assignment::new();
        for (facts, value) in groups {
            for text in facts {
                let fact: Fact = text
                    .parse()
                    .map_err(|err: FactParseError| invalid(err.to_string()))?;
                assignment
                    .assign(fact, value)
                    .map_err(|err: AssignmentError| invalid(err.to_string()))?;
            }
        }
        for predicate in &self.closed {
            assignment.close(predicate.as_str());
        }
        Ok(assignment)
    }
}

/// A constant written on the command line. Text that is not a valid
/// constant term, such as a file path, becomes a string.
fn constant(text: &str) -> Value {
    text.parse().unwrap_or_else(|_| Value::string(text))
}

/// Interprets raw arguments against the oracle's declared input kinds.
pub fn parse_inputs(descriptor: &OracleDescriptor, raw: &[String]) -> CliResult<Vec<Input>> {
    let mut inputs = Vec::with_capacity(descriptor.inputs.len());
    let mut rest = raw.iter();
    for (position, kind) in descriptor.inputs.iter().enumerate() {
        let input = match kind {
            InputKind::Tuple => Input::Tuple(rest.by_ref().map(|arg| constant(arg)).collect()),
            InputKind::Predicate | InputKind::Constant => {
                let arg = rest.next().ok_or_else(|| {
                    CliError::Usage(format!(
                        "`{}` expects {} inputs, missing input {position}",
                        descriptor.name,
                        descriptor.inputs.len()
                    ))
                })?;
                if *kind == InputKind::Predicate {
                    Input::predicate(arg.as_str())
                } else {
                    Input::constant(constant(arg))
                }
            }
        };
        inputs.push(input);
    }
    if rest.next().is_some() {
        return Err(CliError::Usage(format!(
            "`{}` expects {} inputs, got {}",
            descriptor.name,
            descriptor.inputs.len(),
            raw.len()
        )));
    }
    Ok(inputs)
}

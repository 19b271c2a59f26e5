//! The oracle contract and the per-call query handed to it.

use std::sync::Arc;

use oracleforge_config::OracleConfig;
use oracleforge_core::{
    Answer, AssignmentView, Fact, Input, NogoodLearner, OracleDescriptor, OracleError,
    OutputAtom, Result, TruthValue, Tuple, Value,
};

use crate::format::{FileCache, FileFormat};

/// A three-valued evaluator for one combinatorial problem.
///
/// Implementations classify input facts as True, False or Undefined and
/// report each candidate output tuple as Definite or Possible. A Definite
/// tuple must hold under every completion of the Undefined facts; a tuple
/// that holds under some completion must not be omitted.
pub trait Oracle: Send + Sync {
    /// Registration record: name, input kinds, output arity and properties.
    fn descriptor(&self) -> OracleDescriptor;

    /// Computes the definite and possible output tuples.
    fn evaluate(&self, query: &Query<'_>) -> Result<Answer>;

    /// Emits nogoods justifying the current answer.
    ///
    /// Only called for oracles whose descriptor declares learning.
    fn learn(&self, _query: &Query<'_>, _learner: &mut dyn NogoodLearner) -> Result<()> {
        Ok(())
    }
}

/// Everything one oracle call may read.
///
/// Accessors fail with [`OracleError::ConfigurationMismatch`] when an input
/// position is missing or of the wrong kind.
pub struct Query<'a> {
    oracle: &'a str,
    inputs: &'a [Input],
    view: &'a dyn AssignmentView,
    config: &'a OracleConfig,
    files: &'a FileCache,
}

impl<'a> Query<'a> {
    pub fn new(
        oracle: &'a str,
        inputs: &'a [Input],
        view: &'a dyn AssignmentView,
        config: &'a OracleConfig,
        files: &'a FileCache,
    ) -> Self {
        Self {
            oracle,
            inputs,
            view,
            config,
            files,
        }
    }

    pub fn oracle(&self) -> &'a str {
        self.oracle
    }

    pub fn inputs(&self) -> &'a [Input] {
        self.inputs
    }

    pub fn view(&self) -> &'a dyn AssignmentView {
        self.view
    }

    pub fn config(&self) -> &'a OracleConfig {
        self.config
    }

    pub fn input(&self, position: usize) -> Result<&'a Input> {
        self.inputs.get(position).ok_or_else(|| {
            OracleError::mismatch(self.oracle, format!("missing input at position {position}"))
        })
    }

    /// Name of the predicate at `position`.
    pub fn predicate(&self, position: usize) -> Result<&'a str> {
        match self.input(position)? {
            Input::Predicate(name) => Ok(name),
            other => Err(OracleError::mismatch(
                self.oracle,
                format!("input {position} must be a predicate, got `{other}`"),
            )),
        }
    }

    /// Constant at `position`, of any kind.
    pub fn constant(&self, position: usize) -> Result<&'a Value> {
        match self.input(position)? {
            Input::Constant(value) => Ok(value),
            other => Err(OracleError::mismatch(
                self.oracle,
                format!("input {position} must be a constant, got `{other}`"),
            )),
        }
    }

    /// Integer constant at `position`.
    pub fn int(&self, position: usize) -> Result<i64> {
        self.constant(position)?.as_int().map_err(|err| {
            OracleError::mismatch(self.oracle, format!("input {position}: {err}"))
        })
    }

    /// String or symbolic constant at `position`.
    pub fn text(&self, position: usize) -> Result<&'a str> {
        self.constant(position)?.as_text().map_err(|err| {
            OracleError::mismatch(self.oracle, format!("input {position}: {err}"))
        })
    }

    /// Trailing constants at `position`.
    pub fn tuple(&self, position: usize) -> Result<&'a [Value]> {
        match self.input(position)? {
            Input::Tuple(values) => Ok(values),
            other => Err(OracleError::mismatch(
                self.oracle,
                format!("input {position} must be a tuple, got `{other}`"),
            )),
        }
    }

    /// Observed facts of the predicate at `position`, in observation order.
    pub fn facts(&self, position: usize) -> Result<Vec<(&'a Fact, TruthValue)>> {
        let predicate = self.predicate(position)?;
        let view: &'a dyn AssignmentView = self.view;
        Ok(view.known_facts(predicate))
    }

    /// Like [`facts`](Self::facts), rejecting any fact whose arity differs.
    pub fn facts_of_arity(
        &self,
        position: usize,
        arity: usize,
    ) -> Result<Vec<(&'a Fact, TruthValue)>> {
        let facts = self.facts(position)?;
        if let Some((fact, _)) = facts.iter().find(|(fact, _)| fact.arity() != arity) {
            return Err(OracleError::invalid_fact(
                self.oracle,
                fact,
                format!("expected arity {arity}"),
            ));
        }
        Ok(facts)
    }

    /// Truth value of `predicate(args)` for the predicate at `position`.
    pub fn value_at(&self, position: usize, args: Tuple) -> Result<TruthValue> {
        let predicate = self.predicate(position)?;
        Ok(self.view.value_of(&Fact::new(predicate, args)))
    }

    /// Integer argument `index` of `fact`.
    pub fn int_arg(&self, fact: &Fact, index: usize) -> Result<i64> {
        fact.arg(index)
            .and_then(|value| value.as_int().ok())
            .ok_or_else(|| {
                OracleError::invalid_fact(
                    self.oracle,
                    fact,
                    format!("argument {index} must be an integer"),
                )
            })
    }

    /// Loads and parses the file named by the constant at `position`.
    pub fn load<F: FileFormat>(&self, position: usize) -> Result<Arc<F>> {
        let name = self.text(position)?;
        let path = self.config.resolve_path(name);
        self.files.load(self.oracle, &path)
    }

    /// Output atom of this call for `tuple`.
    pub fn output_atom(&self, tuple: Tuple) -> OutputAtom {
        OutputAtom::new(self.oracle, self.inputs.to_vec(), tuple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracleforge_core::Assignment;
    use oracleforge_test::fact;

    #[test]
    fn test_typed_accessors() {
        let inputs = [
            Input::predicate("p"),
            Input::constant(Value::Int(3)),
            Input::constant(Value::string("f.cnf")),
        ];
        let assignment = Assignment::new();
        let config = OracleConfig::default();
        let files = FileCache::new(false);
        let query = Query::new("test", &inputs, &assignment, &config, &files);

        assert_eq!(query.predicate(0).unwrap(), "p");
        assert_eq!(query.int(1).unwrap(), 3);
        assert_eq!(query.text(2).unwrap(), "f.cnf");
        assert!(matches!(
            query.int(0),
            Err(OracleError::ConfigurationMismatch { .. })
        ));
        assert!(matches!(
            query.int(2),
            Err(OracleError::ConfigurationMismatch { .. })
        ));
        assert!(query.input(3).is_err());
    }

    #[test]
    fn test_facts_of_arity_names_offending_fact() {
        let inputs = [Input::predicate("p")];
        let assignment = Assignment::from_facts([
            (fact("p(1)"), TruthValue::True),
            (fact("p(1,2)"), TruthValue::False),
        ])
        .unwrap();
        let config = OracleConfig::default();
        let files = FileCache::new(false);
        let query = Query::new("test", &inputs, &assignment, &config, &files);

        match query.facts_of_arity(0, 1) {
            Err(OracleError::InvalidFact { fact: f, .. }) => assert_eq!(f, fact("p(1,2)")),
            other => panic!("expected InvalidFact, got {other:?}"),
        }
    }
}

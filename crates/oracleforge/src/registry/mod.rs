//! Oracle registration and evaluation.
//!
//! The registry owns the oracles and their descriptors. Hosts resolve an
//! oracle name to an [`OracleId`] once and then evaluate [`Call`]s by id.

use std::collections::HashMap;
use std::fmt;

use oracleforge_config::OracleConfig;
use oracleforge_core::{
    Answer, AssignmentView, Input, Nogood, OracleDescriptor, OracleError, RestrictedView, Result,
};
use oracleforge_oracles::{BuiltinOracle, FileCache, Oracle, Query};
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::conformance::check_monotonicity;


/// Handle of a registered oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OracleId(usize);

impl OracleId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OracleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One evaluation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub oracle: OracleId,
    pub inputs: Vec<Input>,
    /// Whether nogoods should be collected.
    pub learn: bool,
}

impl Call {
    pub fn new(oracle: OracleId, inputs: Vec<Input>) -> Self {
        Self {
            oracle,
            inputs,
            learn: false,
        }
    }

    pub fn with_learning(mut self) -> Self {
        self.learn = true;
        self
    }
}

/// Result of one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub answer: Answer,
    pub nogoods: Vec<Nogood>,
}

struct Entry {
    oracle: Box<dyn Oracle>,
    descriptor: OracleDescriptor,
}

/// Registered oracles plus the configuration and file cache they share.
///
/// # Examples
///
/// ```
/// use oracleforge::{Call, OracleRegistry};
/// use oracleforge_config::OracleConfig;
/// use oracleforge_core::{Assignment, Input, TruthValue, Value, Verdict};
///
/// let registry = OracleRegistry::with_builtins(OracleConfig::default());
/// let setminus = registry.lookup("setminus").unwrap();
///
/// let mut view = Assignment::new();
/// view.assign("p(x)".parse().unwrap(), TruthValue::True).unwrap();
/// view.close("q");
///
/// let call = Call::new(setminus, vec![Input::predicate("p"), Input::predicate("q")]);
/// let evaluation = registry.evaluate(&call, &view).unwrap();
/// assert_eq!(
///     evaluation.answer.verdict(&[Value::constant("x")]),
///     Some(Verdict::Definite)
/// );
/// ```
pub struct OracleRegistry {
    config: OracleConfig,
    files: FileCache,
    entries: Vec<Entry>,
    by_name: HashMap<&'static str, OracleId>,
}

impl OracleRegistry {
    pub fn new(config: OracleConfig) -> Self {
        let files = FileCache::new(config.files.cache);
        Self {
            config,
            files,
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Creates a registry holding every [`BuiltinOracle`].
    pub fn with_builtins(config: OracleConfig) -> Self {
        let mut registry = Self::new(config);
        for builtin in BuiltinOracle::ALL {
            let registered = registry.register(Box::new(builtin));
            if let Err(err) = &registered {
                error!(event = "builtin_rejected", oracle = builtin.name(), reason = %err);
            }
            debug_assert!(registered.is_ok(), "built-in rejected: {registered:?}");
        }
        info!(
            event = "registry_ready",
            oracle_count = registry.len(),
            environment_mode = ?registry.config.environment_mode,
        );
        registry
    }

    /// Registers `oracle` under its descriptor name.
    pub fn register(&mut self, oracle: Box<dyn Oracle>) -> Result<OracleId> {
        let descriptor = oracle.descriptor();
        if self.by_name.contains_key(descriptor.name) {
            return Err(OracleError::DuplicateOracle(descriptor.name.to_string()));
        }
        descriptor
            .validate()
            .map_err(|reason| OracleError::mismatch(descriptor.name, reason))?;

        let id = OracleId(self.entries.len());
        debug!(
            event = "oracle_registered",
            oracle = descriptor.name,
            id = id.0,
            inputs = descriptor.inputs.len(),
            output_arity = descriptor.output_arity,
        );
        self.by_name.insert(descriptor.name, id);
        self.entries.push(Entry { oracle, descriptor });
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<OracleId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| OracleError::UnknownOracle(name.to_string()))
    }

    pub fn descriptor(&self, id: OracleId) -> Result<&OracleDescriptor> {
        self.entry(id).map(|entry| &entry.descriptor)
    }

    /// All declarations in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = (OracleId, &OracleDescriptor)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (OracleId(index), &entry.descriptor))
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn files(&self) -> &FileCache {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: OracleId) -> Result<&Entry> {
        self.entries
            .get(id.0)
            .ok_or_else(|| OracleError::UnknownOracle(id.to_string()))
    }

    /// Evaluates one call against `view`.
    ///
    /// The oracle only sees the predicates named by its predicate inputs.
    /// Nogoods are collected when the call asks for them, the oracle
    /// declares learning and `learning.enabled` is set.
    pub fn evaluate(&self, call: &Call, view: &dyn AssignmentView) -> Result<Evaluation> {
        let entry = self.entry(call.oracle)?;
        let descriptor = &entry.descriptor;
        let name = descriptor.name;
        descriptor
            .check_inputs(&call.inputs)
            .map_err(|reason| OracleError::mismatch(name, reason))?;

        let allowed: Vec<&str> = call
            .inputs
            .iter()
            .filter_map(|input| match input {
                Input::Predicate(predicate) => Some(predicate.as_str()),
                _ => None,
            })
            .collect();
        let evaluate_on = |view: &dyn AssignmentView| {
            let restricted = RestrictedView::new(view, name, allowed.clone());
            let query = Query::new(name, &call.inputs, &restricted, &self.config, &self.files);
            entry.oracle.evaluate(&query)
        };

        let answer = evaluate_on(view)?;
        if self.config.environment_mode.is_asserted() {
            check_answer(descriptor, &answer)?;
        }
        if self.config.environment_mode.is_fully_asserted() {
            check_monotonicity(
                name,
                &descriptor.properties.monotonicity,
                &call.inputs,
                view,
                evaluate_on,
            )?;
        }

        let mut nogoods = Vec::new();
        if call.learn {
            if !descriptor.properties.learning {
                warn!(
                    event = "learning_ignored",
                    oracle = name,
                    reason = "oracle does not support learning"
                );
            } else if !self.config.learning.enabled {
                warn!(
                    event = "learning_ignored",
                    oracle = name,
                    reason = "learning disabled in configuration"
                );
            } else {
                let restricted = RestrictedView::new(view, name, allowed.clone());
                let query = Query::new(name, &call.inputs, &restricted, &self.config, &self.files);
                entry.oracle.learn(&query, &mut nogoods)?;
            }
        }

        debug!(
            event = "evaluated",
            oracle = name,
            definite = answer.definite().len(),
            possible = answer.possible().len(),
            nogoods = nogoods.len(),
        );
        Ok(Evaluation { answer, nogoods })
    }

    /// Evaluates independent calls in parallel, results in call order.
    pub fn evaluate_batch(
        &self,
        calls: &[Call],
        view: &dyn AssignmentView,
    ) -> Vec<Result<Evaluation>> {
        calls
            .par_iter()
            .map(|call| self.evaluate(call, view))
            .collect()
    }
}

impl fmt::Debug for OracleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.entries.iter().map(|e| e.descriptor.name).collect();
        f.debug_struct("OracleRegistry")
            .field("oracles", &names)
            .field("config", &self.config)
            .finish()
    }
}

/// Invariants every answer must satisfy.
fn check_answer(descriptor: &OracleDescriptor, answer: &Answer) -> Result<()> {
    if let Some(tuple) = answer.definite().intersection(answer.possible()).next() {
        return Err(OracleError::defect(
            descriptor.name,
            format!("tuple {tuple:?} is both definite and possible"),
        ));
    }
    if !descriptor.properties.partial_answer && !answer.is_decided() {
        return Err(OracleError::defect(
            descriptor.name,
            "possible tuples from an oracle without partial answers",
        ));
    }
    if descriptor.output_arity == 0 {
        if let Some(tuple) = answer.optimistic().into_iter().find(|t| !t.is_empty()) {
            return Err(OracleError::defect(
                descriptor.name,
                format!("non-empty tuple {tuple:?} from a nullary oracle"),
            ));
        }
    }
    Ok(())
}

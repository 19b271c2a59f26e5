//! Oracle descriptors.
//!
//! A descriptor is what the host sees at registration time: name, input
//! signature, output arity and the semantic properties the host may rely on
//! when pruning.

use std::collections::BTreeSet;

use crate::input::{Input, InputKind};

/// Declared monotonicity of predicate input positions.
///
/// A monotonic position can only gain output tuples as more of its facts
/// become true; an antimonotonic position can only lose them.
///
/// # Example
///
/// ```
/// use oracleforge_core::MonotonicitySpec;
///
/// let spec = MonotonicitySpec::new().monotonic(0).antimonotonic(1);
/// assert!(spec.is_monotonic(0));
/// assert!(spec.is_antimonotonic(1));
/// assert!(!spec.is_nonmonotonic());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonotonicitySpec {
    monotonic: BTreeSet<usize>,
    antimonotonic: BTreeSet<usize>,
}

impl MonotonicitySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monotonic(mut self, position: usize) -> Self {
        self.monotonic.insert(position);
        self
    }

    pub fn antimonotonic(mut self, position: usize) -> Self {
        self.antimonotonic.insert(position);
        self
    }

    pub fn is_monotonic(&self, position: usize) -> bool {
        self.monotonic.contains(&position)
    }

    pub fn is_antimonotonic(&self, position: usize) -> bool {
        self.antimonotonic.contains(&position)
    }

    /// Returns true if no position carries a declaration.
    pub fn is_nonmonotonic(&self) -> bool {
        self.monotonic.is_empty() && self.antimonotonic.is_empty()
    }

    pub fn monotonic_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.monotonic.iter().copied()
    }

    pub fn antimonotonic_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.antimonotonic.iter().copied()
    }
}

/// Well-ordering hint: output position `output` is bounded by input
/// position `input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wellordering {
    /// By string length.
    Strlen { output: usize, input: usize },
    /// By natural number order.
    Natural { output: usize, input: usize },
}

/// Semantic properties declared by an oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleProperties {
    pub monotonicity: MonotonicitySpec,
    /// The oracle reports Possible tuples instead of requiring a total
    /// assignment.
    pub partial_answer: bool,
    /// The oracle can emit nogoods.
    pub learning: bool,
    /// Identifier of the host-side compliance check to run on learned
    /// nogoods, if any.
    pub compliance_check: Option<u32>,
    /// At most one output tuple per input.
    pub functional: bool,
    /// Output positions with a finite domain.
    pub finite_output_domain: BTreeSet<usize>,
    pub wellordering: BTreeSet<Wellordering>,
}

/// Registration record for one oracle.
///
/// # Example
///
/// ```
/// use oracleforge_core::{InputKind, MonotonicitySpec, OracleDescriptor};
///
/// let descriptor = OracleDescriptor::new("setminus", 1)
///     .with_input(InputKind::Predicate)
///     .with_input(InputKind::Predicate)
///     .with_monotonicity(MonotonicitySpec::new().monotonic(0).antimonotonic(1))
///     .with_partial_answer()
///     .with_learning();
///
/// assert_eq!(descriptor.inputs.len(), 2);
/// assert!(descriptor.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleDescriptor {
    pub name: &'static str,
    pub inputs: Vec<InputKind>,
    pub output_arity: usize,
    pub properties: OracleProperties,
}

impl OracleDescriptor {
    pub fn new(name: &'static str, output_arity: usize) -> Self {
        Self {
            name,
            inputs: Vec::new(),
            output_arity,
            properties: OracleProperties::default(),
        }
    }

    pub fn with_input(mut self, kind: InputKind) -> Self {
        self.inputs.push(kind);
        self
    }

    pub fn with_monotonicity(mut self, spec: MonotonicitySpec) -> Self {
        self.properties.monotonicity = spec;
        self
    }

    pub fn with_partial_answer(mut self) -> Self {
        self.properties.partial_answer = true;
        self
    }

    pub fn with_learning(mut self) -> Self {
        self.properties.learning = true;
        self
    }

    pub fn with_compliance_check(mut self, id: u32) -> Self {
        self.properties.compliance_check = Some(id);
        self
    }

    pub fn with_functional(mut self) -> Self {
        self.properties.functional = true;
        self
    }

    pub fn with_finite_output_domain(mut self, position: usize) -> Self {
        self.properties.finite_output_domain.insert(position);
        self
    }

    pub fn with_wellordering(mut self, hint: Wellordering) -> Self {
        self.properties.wellordering.insert(hint);
        self
    }

    /// Positions declared as predicate inputs.
    pub fn predicate_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == InputKind::Predicate)
            .map(|(i, _)| i)
    }

    /// Checks the declaration is self-consistent.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(pos) = self.inputs.iter().position(|k| *k == InputKind::Tuple) {
            if pos + 1 != self.inputs.len() {
                return Err(format!("tuple input at position {pos} is not last"));
            }
        }

        let spec = &self.properties.monotonicity;
        for pos in spec.monotonic_positions().chain(spec.antimonotonic_positions()) {
            if self.inputs.get(pos) != Some(&InputKind::Predicate) {
                return Err(format!(
                    "monotonicity declared for position {pos}, which is not a predicate input"
                ));
            }
            if spec.is_monotonic(pos) && spec.is_antimonotonic(pos) {
                return Err(format!(
                    "position {pos} declared both monotonic and antimonotonic"
                ));
            }
        }

        for &pos in &self.properties.finite_output_domain {
            if pos >= self.output_arity {
                return Err(format!("finite output domain at {pos} exceeds output arity"));
            }
        }
        Ok(())
    }

    /// Checks that actual inputs match the declared kinds.
    pub fn check_inputs(&self, inputs: &[Input]) -> Result<(), String> {
        let tuple_tail = self.inputs.last() == Some(&InputKind::Tuple);
        let fixed = if tuple_tail {
            self.inputs.len() - 1
        } else {
            self.inputs.len()
        };

        let arity_ok = if tuple_tail {
            inputs.len() == fixed + 1
        } else {
            inputs.len() == fixed
        };
        if !arity_ok {
            return Err(format!(
                "expected {} inputs, got {}",
                self.inputs.len(),
                inputs.len()
            ));
        }

        for (pos, (kind, input)) in self.inputs.iter().zip(inputs).enumerate() {
            if *kind != input.kind() {
                return Err(format!(
                    "input {pos} must be a {kind:?}, got {:?} `{input}`",
                    input.kind()
                ));
            }
        }
        Ok(())
    }
}

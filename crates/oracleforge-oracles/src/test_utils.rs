//! Test utilities for oracleforge-oracles
//!
//! Runs an oracle directly against an assignment, without the registry.

use oracleforge_config::OracleConfig;
use oracleforge_core::{Answer, Assignment, Input, Nogood, Result};

pub use oracleforge_test::{assignment, check_soundness, fact, quick_config};

use crate::format::FileCache;
use crate::oracle::{Oracle, Query};

/// Evaluates `oracle` with the default configuration.
pub fn run(oracle: &dyn Oracle, inputs: &[Input], view: &Assignment) -> Result<Answer> {
    run_with(oracle, inputs, view, &quick_config())
}

pub fn run_with(
    oracle: &dyn Oracle,
    inputs: &[Input],
    view: &Assignment,
    config: &OracleConfig,
) -> Result<Answer> {
    let files = FileCache::new(false);
    let name = oracle.descriptor().name;
    oracle.evaluate(&Query::new(name, inputs, view, config, &files))
}

/// Collects the nogoods `oracle` learns.
pub fn learn(oracle: &dyn Oracle, inputs: &[Input], view: &Assignment) -> Result<Vec<Nogood>> {
    let config = quick_config();
    let files = FileCache::new(false);
    let name = oracle.descriptor().name;
    let mut learned = Vec::new();
    oracle.learn(&Query::new(name, inputs, view, &config, &files), &mut learned)?;
    Ok(learned)
}

pub fn p(name: &str) -> Input {
    Input::predicate(name)
}

pub fn int(value: i64) -> Input {
    Input::constant(value)
}

pub fn text(value: &str) -> Input {
    Input::constant(oracleforge_core::Value::string(value))
}

use oracleforge::{InputKind, OracleConfig, OracleDescriptor, OracleRegistry};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::support::CliResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Listed {
    name: &'static str,
    inputs: Vec<&'static str>,
    output_arity: usize,
    monotonic: Vec<usize>,
    antimonotonic: Vec<usize>,
    partial_answer: bool,
    learning: bool,
}

impl From<&OracleDescriptor> for Listed {
    fn from(descriptor: &OracleDescriptor) -> Self {
        let spec = &descriptor.properties.monotonicity;
        Self {
            name: descriptor.name,
            inputs: descriptor.inputs.iter().map(|kind| kind_label(*kind)).collect(),
            output_arity: descriptor.output_arity,
            monotonic: spec.monotonic_positions().collect(),
            antimonotonic: spec.antimonotonic_positions().collect(),
            partial_answer: descriptor.properties.partial_answer,
            learning: descriptor.properties.learning,
        }
    }
}

fn kind_label(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Predicate => "predicate",
        InputKind::Constant => "constant",
        InputKind::Tuple => "tuple",
    }
}

pub fn run(json: bool) -> CliResult {
    let registry = OracleRegistry::with_builtins(OracleConfig::default());
    let listed: Vec<Listed> = registry
        .descriptors()
        .map(|(_, descriptor)| Listed::from(descriptor))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for oracle in &listed {
        let mut flags = Vec::new();
        if oracle.partial_answer {
            flags.push("partial");
        }
        if oracle.learning {
            flags.push("learning");
        }
        println!(
            "{:<32} ({}) -> {}  {}",
            oracle.name.bright_cyan().bold(),
            oracle.inputs.join(", "),
            oracle.output_arity,
            flags.join(" ").dimmed()
        );
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use oracleforge::{Call, Evaluation, OracleConfig, OracleRegistry, Value};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::support::{parse_inputs, AssignmentFile, CliResult};

#[derive(Debug, Clone)]
pub struct Args {
    pub oracle: String,
    pub inputs: Vec<String>,
    pub assignment: PathBuf,
    pub config: Option<PathBuf>,
    pub learn: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    oracle: String,
    inputs: Vec<String>,
    definite: Vec<String>,
    possible: Vec<String>,
    nogoods: Vec<String>,
}

impl Report {
    fn new(oracle: &str, raw_inputs: &[String], evaluation: &Evaluation) -> Self {
        Self {
            oracle: oracle.to_string(),
            inputs: raw_inputs.to_vec(),
            definite: evaluation.answer.definite().iter().map(|t| render(t)).collect(),
            possible: evaluation.answer.possible().iter().map(|t| render(t)).collect(),
            nogoods: evaluation.nogoods.iter().map(ToString::to_string).collect(),
        }
    }
}

fn render(tuple: &[Value]) -> String {
    let parts: Vec<String> = tuple.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(","))
}

/// Reads the configuration by extension. Relative file inputs resolve
/// against the assignment file's directory unless the configuration
/// names a base directory.
fn load_config(path: Option<&Path>, assignment: &Path) -> CliResult<OracleConfig> {
    let config = match path {
        Some(path) => match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => OracleConfig::from_yaml_file(path)?,
            _ => OracleConfig::from_toml_file(path)?,
        },
        None => OracleConfig::default(),
    };
    if config.files.base_dir.is_some() {
        return Ok(config);
    }
    Ok(match assignment.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => config.with_base_dir(dir),
        _ => config,
    })
}

pub fn evaluate(args: &Args) -> CliResult<Evaluation> {
    let config = load_config(args.config.as_deref(), &args.assignment)?;
    let assignment =
        AssignmentFile::load(&args.assignment)?.to_assignment(&args.assignment)?;

    let registry = OracleRegistry::with_builtins(config);
    let id = registry.lookup(&args.oracle)?;
    let inputs = parse_inputs(registry.descriptor(id)?, &args.inputs)?;

    let mut call = Call::new(id, inputs);
    if args.learn {
        call = call.with_learning();
    }
    Ok(registry.evaluate(&call, &assignment)?)
}

pub fn run(args: Args) -> CliResult {
    let evaluation = evaluate(&args)?;
    let report = Report::new(&args.oracle, &args.inputs, &evaluation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}[{}]",
        format!("&{}", report.oracle).bright_cyan().bold(),
        report.inputs.join(",")
    );
    if report.definite.is_empty() && report.possible.is_empty() {
        println!("  {}", "no output tuples".dimmed());
    }
    for tuple in &report.definite {
        println!("  {} {tuple}", "definite".bright_green());
    }
    for tuple in &report.possible {
        println!("  {} {tuple}", "possible".bright_yellow());
    }
    if args.learn {
        println!("{} {}", "nogoods:".bold(), report.nogoods.len());
        for nogood in &report.nogoods {
            println!("  {nogood}");
        }
    }
    Ok(())
}

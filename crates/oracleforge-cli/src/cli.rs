use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "oracleforge",
    about = "OracleForge: evaluate three-valued external oracles against partial assignments",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in oracles and their declarations
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one oracle call against an assignment file
    Eval {
        /// Oracle name, e.g. `setminus`
        #[arg(long)]
        oracle: String,

        /// Oracle inputs in declaration order (repeatable)
        #[arg(long = "input")]
        inputs: Vec<String>,

        /// TOML file with `true`, `false`, `undefined` and `closed` lists
        #[arg(long)]
        assignment: PathBuf,

        /// Oracle configuration (TOML or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Collect nogoods from learning oracles
        #[arg(long)]
        learn: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

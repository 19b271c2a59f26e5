//! OracleForge CLI: the `oracleforge` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use owo_colors::OwoColorize;

fn main() {
    let cli = Cli::parse();
    oracleforge::console::init();

    let result = match cli.command {
        Commands::List { json } => commands::list::run(json),

        Commands::Eval {
            oracle,
            inputs,
            assignment,
            config,
            learn,
            json,
        } => commands::eval::run(commands::eval::Args {
            oracle,
            inputs,
            assignment,
            config,
            learn,
            json,
        }),
    };

    if let Err(err) = result {
        eprintln!("{} {err}", "error:".bright_red().bold());
        std::process::exit(1);
    }
}

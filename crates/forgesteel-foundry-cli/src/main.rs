//! forgesteel-foundry CLI - level detection and conversion quality audits.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use forgesteel_foundry::Verdict;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Level { file, json } => commands::level::run(file, json, cli.verbose),

        Commands::Validate {
            inputs,
            json,
            strict,
        } => commands::validate::run(inputs, json, cli.verbose).map(|verdict| {
            if strict && verdict == Verdict::Poor {
                std::process::exit(2);
            }
        }),

        Commands::Report { inputs, output } => commands::report::run(inputs, output, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// forgesteel-foundry: audit Forgesteel to Foundry VTT character conversions
#[derive(Parser)]
#[command(name = "forgesteel-foundry")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect a hero's level and check its sources agree
    Level {
        /// Path to the Forgesteel export (.ds-hero or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a converted actor against its original export
    Validate {
        #[command(flatten)]
        inputs: ConversionInputs,

        /// Output metrics and findings as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 2 when the verdict is Poor
        #[arg(long)]
        strict: bool,
    },

    /// Print the plain-text quality report for a conversion
    Report {
        #[command(flatten)]
        inputs: ConversionInputs,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Files shared by the validation commands.
#[derive(Args)]
pub struct ConversionInputs {
    /// Original Forgesteel export
    #[arg(value_name = "ORIGINAL")]
    pub original: PathBuf,

    /// Converted Foundry actor
    #[arg(value_name = "CONVERTED")]
    pub converted: PathBuf,

    /// Reference catalog of compendium entries (JSON)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Validator configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "forgesteel-foundry",
            "validate",
            "keth.ds-hero",
            "keth.json",
            "--catalog",
            "packs.json",
            "--strict",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Validate { inputs, json, strict } => {
                assert_eq!(inputs.original, PathBuf::from("keth.ds-hero"));
                assert_eq!(inputs.catalog, Some(PathBuf::from("packs.json")));
                assert!(inputs.config.is_none());
                assert!(strict);
                assert!(!json);
            }
            _ => panic!("expected validate"),
        }
    }
}

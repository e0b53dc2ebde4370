//! Level command - detect a hero's level and show where it came from.

use std::path::PathBuf;

use colored::Colorize;
use forgesteel_foundry::{LevelResolver, load_record};

pub fn run(
    file: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = load_record(&file)?;
    let resolver = LevelResolver::new();
    let resolution = resolver.resolve(&record);
    let consistency = resolver.check_consistency(&record);

    if json_output {
        let output = serde_json::json!({
            "file": file.display().to_string(),
            "resolution": resolution,
            "consistency": consistency,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let source = match resolution.source {
        Some(source) => format!("{} ({})", source.key, source.description),
        None => "default".to_string(),
    };
    println!(
        "{} {} {}",
        "Level".cyan().bold(),
        resolution.value.to_string().white().bold(),
        format!("from {}", source).dimmed()
    );

    if consistency.is_consistent {
        println!("{}", "Sources consistent".green());
    } else {
        println!("{}", "Sources inconsistent:".yellow().bold());
        for inconsistency in &consistency.inconsistencies {
            println!(
                "  - {}: {} ({:+} difference)",
                inconsistency.source, inconsistency.value, inconsistency.difference
            );
        }
    }

    if verbose || !resolution.diagnostics.is_empty() {
        for diagnostic in &resolution.diagnostics {
            println!("  {} {}", "!".yellow(), diagnostic.message);
        }
    }

    if verbose {
        println!();
        println!("{}", "Values found:".dimmed());
        for (source, value) in &consistency.values_found {
            println!("  {}: {}", source, value);
        }
    }

    Ok(())
}

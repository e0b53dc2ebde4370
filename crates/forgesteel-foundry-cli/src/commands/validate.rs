//! Validate command - run quality checks and summarize the findings.

use colored::Colorize;
use forgesteel_foundry::{Severity, Verdict};

use super::Conversion;
use crate::cli::ConversionInputs;

pub fn run(
    inputs: ConversionInputs,
    json_output: bool,
    verbose: bool,
) -> Result<Verdict, Box<dyn std::error::Error>> {
    let conversion = Conversion::load(&inputs)?;
    let metrics = conversion.validator.run_full_validation(
        &conversion.original,
        &conversion.converted,
        &conversion.catalog,
    );
    let verdict = metrics.verdict();

    if json_output {
        let output = serde_json::json!({
            "original": inputs.original.display().to_string(),
            "converted": inputs.converted.display().to_string(),
            "verdict": verdict,
            "success_rate": metrics.success_rate(),
            "metrics": metrics,
            "findings": metrics.findings(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(verdict);
    }

    println!(
        "{} {}",
        "Validating".cyan().bold(),
        inputs.converted.display().to_string().white()
    );
    println!();

    for finding in metrics.findings() {
        let marker = match finding.severity {
            Severity::Error => "x".red().bold(),
            Severity::Warning => "!".yellow().bold(),
            Severity::Info if verbose => "-".dimmed(),
            Severity::Info => continue,
        };
        println!(
            "  {} {:<22} {}",
            marker,
            finding.check.label(),
            finding.message
        );
    }

    println!();
    println!(
        "Checks: {} passed, {} failed, {} warnings ({:.1}% success)",
        metrics.successful.to_string().green(),
        metrics.failed.to_string().red(),
        metrics.items_with_warnings.to_string().yellow(),
        metrics.success_rate() * 100.0
    );

    let verdict_line = format!("{}: {}", verdict.label(), verdict.description());
    let verdict_line = match verdict {
        Verdict::Excellent | Verdict::Good => verdict_line.green().bold(),
        Verdict::Fair => verdict_line.yellow().bold(),
        Verdict::Poor => verdict_line.red().bold(),
    };
    println!("{}", verdict_line);

    Ok(verdict)
}

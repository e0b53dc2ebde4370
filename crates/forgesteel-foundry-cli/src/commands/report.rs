//! Report command - render the plain-text quality report.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use super::Conversion;
use crate::cli::ConversionInputs;

pub fn run(
    inputs: ConversionInputs,
    output: Option<PathBuf>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversion = Conversion::load(&inputs)?;
    let metrics = conversion.validator.run_full_validation(
        &conversion.original,
        &conversion.converted,
        &conversion.catalog,
    );
    let report = conversion.validator.build_report(&metrics);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("{}\n", report))?;
            println!(
                "{} {}",
                "Report written to".green(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", report),
    }

    Ok(())
}

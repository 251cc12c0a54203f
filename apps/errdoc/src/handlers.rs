use anyhow::{Result, bail};
use errdoc_core::{Generation, GeneratorConfig, Warning, generate, is_up_to_date, write_report};

/// Generates the reference and replaces the output file.
///
/// # Errors
/// Returns an error if generation fails or the report cannot be written.
pub fn generate_report(config: &GeneratorConfig) -> Result<()> {
    let generation = generate(config)?;
    print_warnings(&generation.warnings);

    write_report(&generation.output, &generation.document)?;

    println!(
        "✅ Generated error reference: {} errors across {} modules -> {}",
        generation.report.error_count(),
        generation.report.sections.len(),
        generation.output.display()
    );
    Ok(())
}

/// Generates the reference in memory and compares it with the output file.
///
/// # Errors
/// Returns an error if generation fails or the output file is missing or stale.
pub fn check_report(config: &GeneratorConfig) -> Result<()> {
    let Generation { document, warnings, output, .. } = generate(config)?;
    print_warnings(&warnings);

    if !is_up_to_date(&output, &document)? {
        bail!("{} is out of date; run errdoc to regenerate it", output.display());
    }

    println!("✅ {} is up to date", output.display());
    Ok(())
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        println!("⚠️ {warning}");
    }
}

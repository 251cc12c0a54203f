//! Generates a markdown reference of the error codes registered across a source tree.
//!
//! The generator works on text, one line at a time. It never parses the source
//! grammar, so a declaration is only recognized when it fits on a single line.
//!
//! # Pipeline
//!
//! 1. **Discovery** ([`discovery`]): walks the root for files named like
//!    [`GeneratorConfig::target_file`].
//! 2. **Module resolution** ([`module`]): groups the files by the path segment
//!    that follows [`GeneratorConfig::module_marker`].
//! 3. **Extraction** ([`extract`]): collects local constants and registered
//!    errors from each file.
//! 4. **Emission** ([`report`]): resolves the module-name placeholder through the
//!    sibling key file ([`keys`]) and renders the document.
//!
//! [`generate`] runs the first four stages entirely in memory; nothing is
//! written until the caller hands the document to [`write_report`]. A fatal
//! [`ErrdocError`] therefore never leaves a partial report behind.
//!
//! # Example
//!
//! ```rust,no_run
//! use errdoc_core::{GeneratorConfig, generate, write_report};
//!
//! # fn main() -> errdoc_core::Result<()> {
//! let config = GeneratorConfig { root: "x".into(), ..Default::default() };
//! let generation = generate(&config)?;
//!
//! for warning in &generation.warnings {
//!     eprintln!("{warning}");
//! }
//! write_report(&generation.output, &generation.document)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
mod error;
pub mod extract;
pub mod keys;
pub mod module;
pub mod report;
mod warning;
mod writer;

pub use crate::config::{GeneratorConfig, load_config};
pub use crate::error::{ErrdocError, ErrdocErrorExt, Result};
pub use crate::report::{ModuleSection, ReportModel, ReportRow};
pub use crate::warning::Warning;
pub use crate::writer::{is_up_to_date, write_atomic as write_report};

use crate::discovery::discover_all;
use crate::extract::extract_file;
use crate::keys::lookup_module_name;
use crate::module::{ModuleFiles, ModuleGroups};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of an in-memory generation run.
#[derive(Debug)]
pub struct Generation {
    pub report: ReportModel,
    /// The rendered markdown document.
    pub document: String,
    /// Recoverable problems, in the order they were found.
    pub warnings: Vec<Warning>,
    /// Where the document belongs.
    pub output: PathBuf,
}

/// Scans, extracts and renders the reference without touching the output file.
///
/// # Errors
/// Returns the first fatal [`ErrdocError`]: no declaration files, a file outside
/// any module, a malformed constant or module-name line, or an I/O failure.
pub fn generate(config: &GeneratorConfig) -> Result<Generation> {
    let files = discover_all(&config.root, &config.target_file)?;
    let groups = ModuleGroups::from_paths(files, &config.module_marker)?;

    info!(modules = groups.len(), root = %config.root.display(), "Grouped declaration files");

    let mut warnings = Vec::new();
    let sections = groups
        .into_iter()
        .map(|group| build_section(group, config, &mut warnings))
        .collect::<Result<Vec<_>>>()?;

    let report = ReportModel { sections };
    info!(
        errors = report.error_count(),
        modules = report.sections.len(),
        warnings = warnings.len(),
        "Rendered error reference"
    );

    Ok(Generation { document: report.to_string(), report, warnings, output: config.output_path() })
}

fn build_section(
    group: ModuleFiles,
    config: &GeneratorConfig,
    warnings: &mut Vec<Warning>,
) -> Result<ModuleSection> {
    let mut rows = Vec::new();

    for path in &group.files {
        let extraction = extract_file(path, config)?;
        warnings.extend(extraction.warnings);

        let module_name = lookup_module_name(path, config)?;
        let mut reported_missing = false;

        for record in extraction.records {
            let codespace = if record.codespace == config.sentinel {
                if let Some(name) = &module_name {
                    name.clone()
                } else {
                    if !reported_missing {
                        warn!(path = %path.display(), module = %group.module, "Module name not declared");
                        warnings.push(Warning::MissingModuleName {
                            path: path.clone(),
                            module: group.module.clone(),
                        });
                        reported_missing = true;
                    }
                    group.module.clone()
                }
            } else {
                record.codespace
            };

            rows.push(ReportRow {
                name: record.name,
                codespace,
                code: record.code,
                description: record.description,
            });
        }
    }

    Ok(ModuleSection { module: group.module, rows })
}

use std::fmt;
use std::path::PathBuf;

/// A recoverable problem found during generation.
///
/// Warnings never stop a run; the affected line or value is skipped or
/// substituted and processing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line mentions the registration call but does not have its expected shape.
    UnrecognizedRegistration { path: PathBuf, line_number: usize, line: String },
    /// A record uses the module-name placeholder but no key file declares a name.
    MissingModuleName { path: PathBuf, module: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedRegistration { path, line_number, line } => write!(
                f,
                "Skipped unrecognized error registration in {}:{line_number}: {}",
                path.display(),
                line.trim()
            ),
            Self::MissingModuleName { path, module } => write!(
                f,
                "No module name declared next to {}; using '{module}' as codespace",
                path.display()
            ),
        }
    }
}

use crate::config::GeneratorConfig;
use crate::error::{ErrdocError, ErrdocErrorExt, Result};
use crate::extract::{split_assignment, unquote};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the first existing key file next to `errors_file`, in configured order.
#[must_use]
pub fn find_key_file(errors_file: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates.iter().map(|name| errors_file.with_file_name(name)).find(|path| path.is_file())
}

/// Reads the module name declared next to a specific declaration file.
///
/// Yields `None` when no key file exists, none of its lines carries the
/// module name assignment, or the assigned value is empty.
///
/// # Errors
/// Returns [`ErrdocError::MalformedKeyAssignment`] when the matching line is not a
/// single `=` assignment, and [`ErrdocError::Io`] if the key file cannot be read.
pub fn lookup_module_name(errors_file: &Path, config: &GeneratorConfig) -> Result<Option<String>> {
    let Some(key_file) = find_key_file(errors_file, &config.key_files) else {
        debug!(path = %errors_file.display(), "No key file found");
        return Ok(None);
    };

    let content =
        fs::read_to_string(&key_file).context(format!("Failed to read {}", key_file.display()))?;

    let Some((index, line)) =
        content.lines().enumerate().find(|(_, line)| line.contains(&config.module_name_marker))
    else {
        return Ok(None);
    };

    let (_, value) = split_assignment(line).ok_or_else(|| ErrdocError::MalformedKeyAssignment {
        path: key_file.display().to_string().into(),
        line_number: index + 1,
        line: line.trim().to_owned().into(),
        context: None,
    })?;

    let module_name = unquote(value);
    if module_name.is_empty() {
        debug!(path = %key_file.display(), "Module name is empty");
        return Ok(None);
    }

    debug!(path = %key_file.display(), module_name, "Resolved module name");
    Ok(Some(module_name.to_owned()))
}

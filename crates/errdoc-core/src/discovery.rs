use crate::error::{ErrdocError, ErrdocErrorExt, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Lazily yields every file under `root` whose name equals `file_name`.
///
/// Entries are visited in file-name order, so two walks over an unchanged tree
/// yield the same sequence. Symbolic links are not followed.
pub fn discover<'a>(root: &'a Path, file_name: &'a str) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    WalkDir::new(root).follow_links(false).sort_by_file_name().into_iter().filter_map(
        move |entry| match entry {
            Ok(entry) => (entry.file_type().is_file() && entry.file_name() == OsStr::new(file_name))
                .then(|| Ok(entry.into_path())),
            Err(e) => Some(Err::<PathBuf, _>(e).context(format!("Failed to scan {}", root.display()))),
        },
    )
}

/// Collects all matches of [`discover`], treating an empty result as fatal.
///
/// # Errors
/// Returns [`ErrdocError::NoInputFiles`] when nothing matches and
/// [`ErrdocError::Walk`] when the tree cannot be traversed.
pub fn discover_all(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let files = discover(root, file_name).collect::<Result<Vec<_>>>()?;

    if files.is_empty() {
        return Err(ErrdocError::NoInputFiles {
            file_name: file_name.to_owned().into(),
            root: root.display().to_string().into(),
            context: None,
        });
    }

    debug!(count = files.len(), root = %root.display(), "Discovered declaration files");
    Ok(files)
}

use crate::error::{ErrdocError, ErrdocErrorExt, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replaces `path` with `contents` using a temp file, `fsync` and `rename`.
///
/// A reader never observes a half written document, and a failed run leaves
/// any previous document untouched.
///
/// # Errors
/// Returns [`ErrdocError::Io`] if the directory cannot be created or the swap fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }

    let temp = unique_tmp_path(path);

    if let Err(err) = swap(&temp, path, contents) {
        let _ = fs::remove_file(&temp);
        return Err(ErrdocError::Io {
            source: err,
            context: Some(format!("Atomic swap failed: {} -> {}", temp.display(), path.display()).into()),
        });
    }

    debug!(path = %path.display(), bytes = contents.len(), "Report saved atomically");
    Ok(())
}

/// Returns `true` when `path` already holds exactly `contents`.
///
/// # Errors
/// Returns [`ErrdocError::Io`] for read failures other than a missing file.
pub fn is_up_to_date(path: &Path, contents: &str) -> Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) => Ok(existing == contents),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).context(format!("Failed to read {}", path.display())),
    }
}

fn swap(temp: &Path, path: &Path, contents: &str) -> std::io::Result<()> {
    {
        let mut file = fs::OpenOptions::new().create_new(true).write(true).open(temp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(temp, path)
}

/// Picks a temp name next to `path` that no earlier (possibly crashed) write left behind.
fn unique_tmp_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(|| "report".into(), |n| n.to_string_lossy());
    let pid = std::process::id();

    loop {
        let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let candidate = path.with_file_name(format!(".{name}.{pid}.{counter}.tmp"));
        if !candidate.exists() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("errors.md");
        fs::write(&path, "stale content that is much longer than the new one").unwrap();

        write_atomic(&path, "fresh\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_write_creates_parent_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs/errors.md");

        write_atomic(&path, "doc\n").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path().join("docs"))
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["errors.md"]);
    }

    #[test]
    fn test_leftover_temp_file_does_not_block_the_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("errors.md");
        let leftover = unique_tmp_path(&path);
        fs::write(&leftover, "partial").unwrap();

        write_atomic(&path, "doc\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "doc\n");
        assert_eq!(fs::read_to_string(&leftover).unwrap(), "partial");
    }

    #[test]
    fn test_up_to_date_check() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("errors.md");

        assert!(!is_up_to_date(&path, "doc\n").unwrap());

        fs::write(&path, "doc\n").unwrap();
        assert!(is_up_to_date(&path, "doc\n").unwrap());
        assert!(!is_up_to_date(&path, "other\n").unwrap());
    }
}

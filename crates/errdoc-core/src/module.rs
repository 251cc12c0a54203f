use crate::error::{ErrdocError, Result};
use fxhash::FxHashMap;
use std::path::{Component, Path, PathBuf};

/// Derives the module identifier of a declaration file.
///
/// The identifier is the path segment right after the first `marker` segment,
/// and it must itself be followed by at least one more segment:
/// `x/bank/types/errors.go` resolves to `bank`, `x/errors.go` does not resolve.
///
/// # Errors
/// Returns [`ErrdocError::UnresolvedModule`] naming the offending path.
pub fn resolve_module(path: &Path, marker: &str) -> Result<String> {
    let segments: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment),
            _ => None,
        })
        .collect();

    segments
        .iter()
        .position(|segment| *segment == marker)
        .filter(|&i| i + 2 < segments.len())
        .and_then(|i| segments[i + 1].to_str())
        .filter(|module| !module.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ErrdocError::UnresolvedModule {
            path: path.display().to_string().into(),
            context: None,
        })
}

/// Files of one module, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFiles {
    pub module: String,
    pub files: Vec<PathBuf>,
}

/// Insertion-ordered grouping of declaration files by module.
#[derive(Debug, Default)]
pub struct ModuleGroups {
    groups: Vec<ModuleFiles>,
    index: FxHashMap<String, usize>,
}

impl ModuleGroups {
    /// Resolves and groups every path, aborting on the first unresolvable one.
    ///
    /// # Errors
    /// Returns [`ErrdocError::UnresolvedModule`] if any path has no module segment.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>, marker: &str) -> Result<Self> {
        let mut groups = Self::default();
        for path in paths {
            let module = resolve_module(&path, marker)?;
            groups.push(module, path);
        }
        Ok(groups)
    }

    pub fn push(&mut self, module: String, path: PathBuf) {
        if let Some(&i) = self.index.get(&module) {
            self.groups[i].files.push(path);
        } else {
            self.index.insert(module.clone(), self.groups.len());
            self.groups.push(ModuleFiles { module, files: vec![path] });
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleFiles> {
        self.groups.iter()
    }
}

impl IntoIterator for ModuleGroups {
    type Item = ModuleFiles;
    type IntoIter = std::vec::IntoIter<ModuleFiles>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

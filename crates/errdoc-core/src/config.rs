use crate::error::{ErrdocErrorExt, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of the environment variables that override file settings (e.g. `ERRDOC__ROOT`).
pub const ENV_PREFIX: &str = "ERRDOC";
/// File name of the generated document when no explicit output is configured.
pub const DEFAULT_OUTPUT_FILE: &str = "errors.md";

/// Settings of a single generation run.
///
/// The defaults describe the layout the generator was written for: `errors.go`
/// files under `x/<module>/...`, registered through `sdkerrors.Register`, with the
/// module name declared in a sibling `key.go` or `keys.go`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory that is scanned recursively.
    pub root: PathBuf,
    /// Report location; `<root>/errors.md` when unset.
    pub output: Option<PathBuf>,
    /// Exact file name of the error declaration files.
    pub target_file: String,
    /// Path segment that precedes the module directory.
    pub module_marker: String,
    /// Sibling files holding the module name, in lookup order.
    pub key_files: Vec<String>,
    /// Substring identifying the module name assignment inside a key file.
    pub module_name_marker: String,
    /// Name of the registration function.
    pub register_call: String,
    /// Codespace placeholder standing for the module's own name.
    pub sentinel: String,
    /// Keyword stripped from constant declarations.
    pub const_keyword: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("../../x"),
            output: None,
            target_file: "errors.go".to_owned(),
            module_marker: "x".to_owned(),
            key_files: vec!["key.go".to_owned(), "keys.go".to_owned()],
            module_name_marker: "ModuleName = ".to_owned(),
            register_call: "sdkerrors.Register".to_owned(),
            sentinel: "ModuleName".to_owned(),
            const_keyword: "const".to_owned(),
        }
    }
}

impl GeneratorConfig {
    /// Returns where the report is written.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.root.join(DEFAULT_OUTPUT_FILE))
    }
}

/// Loads a [`GeneratorConfig`] from an optional TOML file layered with environment overrides.
///
/// 1. **Defaults**: every field falls back to [`GeneratorConfig::default`].
/// 2. **File**: when `path` is given the file must exist.
/// 3. **Environment**: variables prefixed with `ERRDOC__` win over the file
///    (`ERRDOC__ROOT=../x`, `ERRDOC__KEY_FILES=key.go,keys.go`).
///
/// # Errors
/// Returns [`ErrdocError::Config`](crate::ErrdocError::Config) if the file is missing,
/// unreadable, or does not match the expected shape.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("key_files"),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<GeneratorConfig>()
        .context("Failed to deserialize config")
}

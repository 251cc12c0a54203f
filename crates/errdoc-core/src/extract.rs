//! Line-oriented extraction of constants and error registrations.
//!
//! A declaration is only recognized when it fits on a single line; there is no
//! attempt to understand the surrounding source grammar.

use crate::config::GeneratorConfig;
use crate::error::{ErrdocError, ErrdocErrorExt, Result};
use crate::warning::Warning;
use fxhash::FxHashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const VAR_KEYWORD: &str = "var";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Local constant identifiers of one file mapped to their string values.
pub type ConstantTable = FxHashMap<String, String>;

/// One registered error as declared in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub name: String,
    /// Literal codespace, the resolved value of a local constant, or the module-name placeholder.
    pub codespace: String,
    pub code: String,
    pub description: String,
}

/// Everything extracted from a single declaration file.
#[derive(Debug, Default)]
pub struct Extraction {
    pub constants: ConstantTable,
    /// Records in declaration order; a repeated name replaces the earlier value in place.
    pub records: Vec<ErrorRecord>,
    pub warnings: Vec<Warning>,
}

/// Reads and extracts a declaration file.
///
/// # Errors
/// Returns [`ErrdocError::Io`] if the file cannot be read and
/// [`ErrdocError::MalformedConstant`] for a constant line that is not a single assignment.
pub fn extract_file(path: &Path, config: &GeneratorConfig) -> Result<Extraction> {
    let source =
        fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    extract_source(path, &source, config)
}

/// Extracts constants and error records from `source`; `path` is only used for diagnostics.
///
/// # Errors
/// Returns [`ErrdocError::MalformedConstant`] for a constant line with more than one `=`.
pub fn extract_source(path: &Path, source: &str, config: &GeneratorConfig) -> Result<Extraction> {
    let mut extraction = Extraction::default();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();

    let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);

    for (index, line) in source.lines().enumerate() {
        if !line.contains('=') {
            continue;
        }
        let line_number = index + 1;

        if line.contains(config.register_call.as_str()) {
            let Some(record) = parse_registration(line, &config.register_call) else {
                warn!(path = %path.display(), line_number, line, "Unrecognized error registration");
                extraction.warnings.push(Warning::UnrecognizedRegistration {
                    path: path.to_path_buf(),
                    line_number,
                    line: line.to_owned(),
                });
                continue;
            };

            if let Some(&at) = positions.get(&record.name) {
                extraction.records[at] = record;
            } else {
                positions.insert(record.name.clone(), extraction.records.len());
                extraction.records.push(record);
            }
        } else {
            let (identifier, value) = parse_constant(line, &config.const_keyword).ok_or_else(
                || ErrdocError::MalformedConstant {
                    path: path.display().to_string().into(),
                    line_number,
                    line: line.trim().to_owned().into(),
                    context: None,
                },
            )?;
            extraction.constants.insert(identifier, value);
        }
    }

    for record in &mut extraction.records {
        if let Some(value) = extraction.constants.get(&record.codespace) {
            record.codespace.clone_from(value);
        }
    }

    debug!(
        path = %path.display(),
        constants = extraction.constants.len(),
        records = extraction.records.len(),
        "Extracted declaration file"
    );
    Ok(extraction)
}

/// Parses `[const] <ident> = <value>`, returning `None` when the line is not a single assignment.
pub(crate) fn parse_constant(line: &str, keyword: &str) -> Option<(String, String)> {
    let (identifier, value) = split_assignment(strip_keyword(line.trim(), keyword))?;
    Some((unquote(identifier).to_owned(), unquote(value).to_owned()))
}

/// Parses `<ident> = <call>(<codespace>, <code>, <description>)`.
///
/// The arguments end at the last `)` of the line and are split on the first two
/// commas only, so the description may contain commas.
pub(crate) fn parse_registration(line: &str, call: &str) -> Option<ErrorRecord> {
    let (name, body) = line.split_once('=')?;
    let start = body.find(call)? + call.len();
    let args = body[start..].strip_prefix('(')?;
    let args = &args[..args.rfind(')')?];

    let mut fields = args.splitn(3, ',').map(unquote);
    let (codespace, code, description) = (fields.next()?, fields.next()?, fields.next()?);

    Some(ErrorRecord {
        name: strip_keyword(name.trim(), VAR_KEYWORD).to_owned(),
        codespace: codespace.to_owned(),
        code: code.to_owned(),
        description: description.to_owned(),
    })
}

/// Splits `lhs = rhs`, rejecting text with any other number of `=` separated parts.
pub(crate) fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lhs), Some(rhs), None) => Some((lhs, rhs)),
        _ => None,
    }
}

/// Trims whitespace, then surrounding double quotes.
pub(crate) fn unquote(text: &str) -> &str {
    text.trim().trim_matches('"')
}

fn strip_keyword<'t>(text: &'t str, keyword: &str) -> &'t str {
    text.strip_prefix(keyword)
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map_or(text, str::trim_start)
}

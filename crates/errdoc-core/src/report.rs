use std::fmt;

const TOC_MARKER: &str = "<!-- TOC -->";
const TOC_TITLE: &str = "Category";
const TABLE_HEADER: &str = "|Error Name|Codespace|Code|Description|";
const TABLE_ALIGNMENT: &str = "|:-|:-|:-|:-|";

/// A fully resolved table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub codespace: String,
    pub code: String,
    pub description: String,
}

/// The rows of one module, in file then declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSection {
    pub module: String,
    pub rows: Vec<ReportRow>,
}

impl ModuleSection {
    /// Heading text: first character upper-cased, the rest lower-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.module.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
        })
    }

    /// Link target of the module heading.
    #[must_use]
    pub fn anchor(&self) -> String {
        self.module.to_lowercase()
    }
}

/// The whole reference document, rendered through [`fmt::Display`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportModel {
    pub sections: Vec<ModuleSection>,
}

impl ReportModel {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

impl fmt::Display for ReportModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TOC_MARKER}")?;
        writeln!(f, "{TOC_TITLE}")?;
        for section in &self.sections {
            writeln!(f, "  * [{}](#{})", section.display_name(), section.anchor())?;
        }
        writeln!(f, "{TOC_MARKER}")?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "## {}", section.display_name())?;
            writeln!(f)?;
            writeln!(f, "{TABLE_HEADER}")?;
            writeln!(f, "{TABLE_ALIGNMENT}")?;
            for row in &section.rows {
                writeln!(
                    f,
                    "|{}|{}|{}|{}|",
                    escape_cell(&row.name),
                    escape_cell(&row.codespace),
                    escape_cell(&row.code),
                    escape_cell(&row.description)
                )?;
            }
        }

        Ok(())
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

use std::borrow::Cow;

/// A specialized `Result` alias for this crate.
pub type Result<T, E = ErrdocError> = std::result::Result<T, E>;

/// Failures that abort a generation run.
///
/// Every variant is fatal: the caller reports it and exits without writing
/// the reference document. Recoverable problems are surfaced as
/// [`Warning`](crate::Warning)s instead.
#[derive(Debug, thiserror::Error)]
pub enum ErrdocError {
    #[error("No '{file_name}' files found under {root}{}", format_context(.context))]
    NoInputFiles {
        file_name: Cow<'static, str>,
        root: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Failed to resolve module name{}: {path}", format_context(.context))]
    UnresolvedModule { path: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed constant declaration{} in {path}:{line_number}: {line}", format_context(.context))]
    MalformedConstant {
        path: Cow<'static, str>,
        line_number: usize,
        line: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Malformed module name assignment{} in {path}:{line_number}: {line}", format_context(.context))]
    MalformedKeyAssignment {
        path: Cow<'static, str>,
        line_number: usize,
        line: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Directory walk failure{}: {source}", format_context(.context))]
    Walk { source: walkdir::Error, context: Option<Cow<'static, str>> },

    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

impl ErrdocError {
    fn set_context(&mut self, value: Cow<'static, str>) {
        match self {
            Self::NoInputFiles { context, .. }
            | Self::UnresolvedModule { context, .. }
            | Self::MalformedConstant { context, .. }
            | Self::MalformedKeyAssignment { context, .. }
            | Self::Io { context, .. }
            | Self::Walk { context, .. }
            | Self::Config { context, .. } => *context = Some(value),
        }
    }
}

/// Adds `.context(...)` to results carrying an [`ErrdocError`] or one of its sources.
pub trait ErrdocErrorExt<T> {
    /// Attaches a human readable context to the error, converting it if needed.
    ///
    /// # Errors
    /// Returns the original failure as an [`ErrdocError`] with the context set.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> ErrdocErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            e.set_context(context.into());
            e
        })
    }
}

macro_rules! source_variant {
    ($variant:ident => $source:ty) => {
        impl From<$source> for ErrdocError {
            #[inline]
            fn from(source: $source) -> Self {
                Self::$variant { source, context: None }
            }
        }

        impl<T> ErrdocErrorExt<T> for std::result::Result<T, $source> {
            #[inline]
            fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
                self.map_err(|source| ErrdocError::$variant { source, context: Some(context.into()) })
            }
        }
    };
}

source_variant!(Io => std::io::Error);
source_variant!(Walk => walkdir::Error);
source_variant!(Config => config::ConfigError);

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_rendered_in_message() {
        let result: Result<()> = Err(ErrdocError::UnresolvedModule {
            path: "x/errors.go".into(),
            context: None,
        });

        let err = result.context("grouping files").unwrap_err();
        assert_eq!(err.to_string(), "Failed to resolve module name (grouping files): x/errors.go");
    }

    #[test]
    fn test_io_error_converts_with_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));

        let err = result.context("Reading errors.go").unwrap_err();
        assert!(matches!(err, ErrdocError::Io { context: Some(_), .. }));
        assert!(err.to_string().starts_with("I/O failure (Reading errors.go)"));
    }

    #[test]
    fn test_message_without_context_has_no_parentheses() {
        let err = ErrdocError::MalformedConstant {
            path: "a/errors.go".into(),
            line_number: 7,
            line: r#"const A = "b" = "c""#.into(),
            context: None,
        };

        assert_eq!(
            err.to_string(),
            r#"Malformed constant declaration in a/errors.go:7: const A = "b" = "c""#
        );
    }
}

//! Error adapter for converting PrismaError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error
//! carries a stable code naming the phase that failed.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use prisma_flow::{InputError, PrismaError, RenderError};

/// A reportable error that can be rendered by miette.
pub struct Reportable<'a>(&'a PrismaError);

impl Reportable<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            PrismaError::Io(_) => "prisma_flow::io",
            PrismaError::InvalidInput(_) => "prisma_flow::input",
            PrismaError::Layout(_) => "prisma_flow::layout",
            PrismaError::Render(_) => "prisma_flow::render",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        let help = match self.0 {
            PrismaError::Io(_) => return None,
            PrismaError::InvalidInput(InputError::Missing(_)) => {
                "every one of the thirteen counts must be present in the input record"
            }
            PrismaError::InvalidInput(InputError::Negative { .. }) => {
                "counts are numbers of records and cannot be negative"
            }
            PrismaError::InvalidInput(InputError::Malformed(_)) => {
                "the input must be a TOML table, or a JSON object when the file ends in `.json`"
            }
            PrismaError::Layout(_) => {
                "check the [layout] and [canvas] sections of the configuration file"
            }
            PrismaError::Render(RenderError::Style(_)) => {
                "check the [style] section of the configuration file"
            }
            PrismaError::Render(RenderError::Allocation(_)) => {
                "try a smaller --scale or canvas size"
            }
            PrismaError::Render(_) => return None,
        };
        Some(help)
    }
}

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`PrismaError`] into a list of reportable errors.
pub fn to_reportables(err: &PrismaError) -> Vec<Reportable<'_>> {
    vec![Reportable(err)]
}

#[cfg(test)]
mod tests {
    use std::io;

    use prisma_flow::record::Field;

    use super::*;

    fn code_of(err: &PrismaError) -> String {
        let reportables = to_reportables(err);
        assert_eq!(reportables.len(), 1);
        reportables[0].code().unwrap().to_string()
    }

    #[test]
    fn test_codes_per_phase() {
        let io_err = PrismaError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(code_of(&io_err), "prisma_flow::io");

        let input_err = PrismaError::from(InputError::Missing(Field::Databases));
        assert_eq!(code_of(&input_err), "prisma_flow::input");

        let layout_err = PrismaError::Layout("bad rectangle".to_string());
        assert_eq!(code_of(&layout_err), "prisma_flow::layout");

        let render_err = PrismaError::from(RenderError::Cancelled);
        assert_eq!(code_of(&render_err), "prisma_flow::render");
    }

    #[test]
    fn test_message_and_help() {
        let err = PrismaError::from(InputError::Negative {
            field: Field::RecordsExcluded,
            value: -3,
        });
        let reportables = to_reportables(&err);
        let reportable = &reportables[0];

        assert_eq!(
            reportable.to_string(),
            "Invalid input: field `records_excluded` must be a non-negative integer, got -3"
        );
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_cancelled_render_has_no_help() {
        let err = PrismaError::from(RenderError::Cancelled);
        assert!(to_reportables(&err)[0].help().is_none());
    }
}

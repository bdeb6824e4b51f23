//! Error adapter for converting TypexError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use typex::TypexError;

/// Adapter giving every [`TypexError`] variant a diagnostic code and help.
pub struct ErrorAdapter<'a>(pub &'a TypexError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TypexError::Io(_) => "typex::io",
            TypexError::Provider(_) => "typex::provider",
            TypexError::Compile(_) => "typex::compile",
            TypexError::UnresolvedType(_) => "typex::unresolved_type",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TypexError::Provider(_) => "check that every pattern names a .json file or directory",
            TypexError::UnresolvedType(_) => {
                "every named type reachable from a package needs a definition in `types`"
            }
            TypexError::Io(_) | TypexError::Compile(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`TypexError`] into a reportable error.
pub fn to_reportable(err: &TypexError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

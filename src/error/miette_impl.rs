//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{BatchError, FatalError, InputError};

/// A diagnostic wrapper for batch errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct ErrorDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the operator
    pub help: Option<String>,

    #[diagnostic(severity)]
    pub severity: Severity,
}

fn help_for(error: &BatchError) -> Option<String> {
    let text = match error {
        BatchError::Input(InputError::MissingInput) => {
            "Pass -i <file> or pipe records on stdin"
        }
        BatchError::Input(InputError::MissingSheetRange) => {
            "Pass -s with an A1 range such as 'Sheet1!A1:D50'"
        }
        BatchError::Input(InputError::UnknownAttribute { .. }) => {
            "Header names are case-insensitive but must name a known attribute"
        }
        BatchError::Input(InputError::UnsupportedFormat { .. }) => {
            "Delete commands take text or gsheet; all others take csv, json or gsheet"
        }
        BatchError::Fatal(FatalError::CredentialsMissing) => {
            "Set access_token in the config file or export GMIN_ACCESS_TOKEN"
        }
        _ => return None,
    };
    Some(text.to_string())
}

impl From<BatchError> for ErrorDiagnostic {
    fn from(error: BatchError) -> Self {
        let help = help_for(&error);
        ErrorDiagnostic {
            message: error.to_string(),
            source: None,
            help,
            severity: Severity::Error,
        }
    }
}

impl From<BatchError> for miette::Report {
    fn from(error: BatchError) -> Self {
        miette::Report::new(ErrorDiagnostic::from(error))
    }
}

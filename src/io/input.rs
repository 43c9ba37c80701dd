//! Input provider trait and source resolution.

use std::fmt::Debug;
use std::io::Read;

use super::{FileInput, StdinInput};
use crate::error::InputError;

/// Somewhere batch records can be read from.
pub trait InputProvider: Send + Sync + Debug {
    /// Name used in input errors and reader logs: `-` for stdin, else the path.
    fn id(&self) -> &str;

    /// A fresh stream over the whole input.
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}

/// Where a batch reads its records from.
#[derive(Debug)]
pub enum InputSource {
    File(FileInput),
    Stdin(StdinInput),
}

impl InputSource {
    /// Pick the input for a batch: an explicit file wins over piped stdin.
    pub fn resolve(input_file: Option<&str>, stdin_piped: bool) -> Result<Self, InputError> {
        match input_file {
            Some(path) if !path.is_empty() && path != "-" => {
                Ok(InputSource::File(FileInput::new(path)))
            }
            Some("-") => Ok(InputSource::Stdin(StdinInput)),
            _ if stdin_piped => Ok(InputSource::Stdin(StdinInput)),
            _ => Err(InputError::MissingInput),
        }
    }

    pub fn provider(&self) -> &dyn InputProvider {
        match self {
            InputSource::File(f) => f,
            InputSource::Stdin(s) => s,
        }
    }
}

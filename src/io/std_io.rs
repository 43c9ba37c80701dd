//! Process stdin, input files and stdout.

use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use super::{InputProvider, OperatorSink};

/// Whether stdin is a pipe or file rather than an interactive terminal.
pub fn stdin_is_piped() -> bool {
    !io::stdin().is_terminal()
}

/// Records piped on the process stdin. Identified as `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        "-"
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::stdin()))
    }
}

/// Records read from `--input-file`.
#[derive(Debug, Clone)]
pub struct FileInput {
    display: String,
    path: PathBuf,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            display: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.display
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// Operator lines on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OperatorSink for StdoutSink {
    fn write_line(&self, line: &str) {
        // One lock per line keeps concurrent report lines whole.
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

//! In-memory input and sink, for tests and embedding.

use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{InputProvider, OperatorSink};

/// Input held in memory; every `open` replays it from the start.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    data: Arc<[u8]>,
}

impl InMemorySource {
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }
}

/// Collects operator lines. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Lines written so far, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// All lines, each terminated by a newline, as stdout would show them.
    pub fn contents_string(&self) -> String {
        self.guard().iter().map(|l| format!("{l}\n")).collect()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl OperatorSink for InMemorySink {
    fn write_line(&self, line: &str) {
        self.guard().push(line.to_string());
    }
}

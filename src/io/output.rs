//! Operator sink trait definition.

use std::fmt::Debug;

/// Destination for the human-readable report lines.
///
/// Sinks are shared by concurrent workers; each call writes one whole line.
pub trait OperatorSink: Send + Sync + Debug {
    fn write_line(&self, line: &str);
}

/// Sink that drops every line; used for `--silent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl OperatorSink for DiscardSink {
    fn write_line(&self, _line: &str) {}
}

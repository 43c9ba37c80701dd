//! I/O abstractions for batch input and operator output.
//!
//! This module provides:
//! - `InputProvider`: Trait for input sources
//! - `InputSource`: Chooses between an input file and piped stdin
//! - `OperatorSink`: Trait for the human-readable report stream
//! - Standard implementations for files, stdin and stdout
//! - In-memory implementations for testing

mod input;
mod memory;
mod output;
mod std_io;

pub use input::{InputProvider, InputSource};
pub use memory::{InMemorySink, InMemorySource};
pub use output::{DiscardSink, OperatorSink};
pub use std_io::{FileInput, StdinInput, StdoutSink, stdin_is_piped};

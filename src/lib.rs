//! # gmin
//!
//! Batch execution engine for a hosted directory administration CLI.
//!
//! ## Overview
//!
//! A batch command reads records from a file, piped stdin or a spreadsheet
//! range, validates each one against the attribute catalog, turns it into a
//! typed payload and submits the payloads concurrently to the directory API.
//! Every record ends in exactly one outcome; a bad record never stops its
//! siblings.
//!
//! - **Formats**: CSV, JSON lines, plain text keys and spreadsheet ranges
//! - **Catalog**: Case-insensitive attribute aliases, enumerations and
//!   required fields per object type and call type
//! - **Dispatch**: Bounded worker pool, per-object pacing and retry with
//!   jittered exponential back-off under a wall-clock budget
//! - **Reporting**: One operator line and one structured log event per record
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gmin::command::{BatchArgs, BatchCommand, BatchContext};
//! use gmin::model::{CallType, ObjectType};
//!
//! let ctx = BatchContext::new(Arc::new(gateway)).with_customer_id("C01abc");
//! let command = BatchCommand::new(CallType::Create, ObjectType::User);
//! let report = command
//!     .run(&BatchArgs::new().with_input_file("users.csv"), &ctx)
//!     .await?;
//! std::process::exit(report.exit_code());
//! ```
//!
//! ## Features
//!
//! - `http` - reqwest gateway for the Directory, Groups Settings and Sheets APIs
//! - `cli` - clap command tree, config file lookup and log initialisation
//!   (enabled by default)
//! - `miette` - Pretty error reporting with miette

pub mod api;
pub mod builder;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod io;
pub mod model;
pub mod report;
pub mod retry;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

pub use api::{CallFactory, CallHandle, DirectoryApi, SheetSource};
pub use catalog::AttributeCatalog;
pub use command::{BatchArgs, BatchCommand, BatchContext, BatchReport};
pub use config::GminConfig;
pub use dispatch::{Dispatcher, DispatcherBuilder, Pacing, Submission};
pub use error::{
    BatchError, ErrorKind, FatalError, InputError, RecordError, RecordFailure, Stage,
    UpstreamError, UpstreamKind,
};
pub use format::{FormatKind, RawRecord};
pub use io::{InMemorySink, InMemorySource, InputProvider, OperatorSink};
pub use model::{CallType, ObjectType, Payload};
pub use report::{BatchSummary, Outcome, OutcomeStatus, Reporter};
pub use retry::RetryPolicy;

#[cfg(feature = "miette")]
pub use error::ErrorDiagnostic;

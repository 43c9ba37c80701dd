//! Error types for batch execution.
//!
//! This module provides:
//! - `Stage`: Indicates where in the batch pipeline an error occurred
//! - `InputError`: Batch-wide input problems; these abort before dispatch
//! - `RecordError` / `RecordFailure`: Problems with a single record; siblings continue
//! - `UpstreamError`: Classified failures returned by the directory API
//! - `FatalError`: Problems constructing the environment; these abort the process
//! - `BatchError`: The error returned by a batch command

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatKind;
use crate::model::ObjectType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Choosing the input source and format
    ResolveInput,
    /// Error while opening the input stream
    Open,
    Parse,
    /// Converting a raw record into a typed payload
    Build,
    /// Executing the API call for a record
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ResolveInput => write!(f, "ResolveInput"),
            Stage::Open => write!(f, "Open"),
            Stage::Parse => write!(f, "Parse"),
            Stage::Build => write!(f, "Build"),
            Stage::Submit => write!(f, "Submit"),
        }
    }
}

/// A problem with the batch input as a whole.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no input: supply --input-file or pipe data on stdin")]
    MissingInput,

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("format '{format}' is not accepted by {command}")]
    UnsupportedFormat { format: FormatKind, command: String },

    #[error("a sheet range is required when the format is gsheet")]
    MissingSheetRange,

    #[error("unknown {object} attribute '{attribute}'")]
    UnknownAttribute {
        attribute: String,
        object: ObjectType,
    },

    #[error("missing required column '{column}'")]
    MissingRequiredColumn { column: String },

    #[error("[{stage}] {target}: {source}")]
    Io {
        stage: Stage,
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[{stage}] {target}: {message}")]
    Parse {
        stage: Stage,
        target: String,
        message: String,
    },

    #[error("failed to read sheet '{sheet_id}': {source}")]
    Sheet {
        sheet_id: String,
        #[source]
        source: UpstreamError,
    },
}

/// A problem with a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: String },

    #[error("invalid value '{value}' for '{field}'")]
    InvalidEnum { field: String, value: String },

    #[error("invalid email address '{value}' in '{field}'")]
    InvalidEmail { field: String, value: String },

    #[error("invalid phone number '{value}' in '{field}': must begin with '+'")]
    InvalidPhone { field: String, value: String },

    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    #[error("cannot hash '{field}': {reason}")]
    HashFailure { field: String, reason: String },

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl RecordError {
    /// The offending field, where one applies.
    pub fn field(&self) -> Option<&str> {
        match self {
            RecordError::MissingRequiredField { field }
            | RecordError::InvalidEnum { field, .. }
            | RecordError::InvalidEmail { field, .. }
            | RecordError::InvalidPhone { field, .. }
            | RecordError::HashFailure { field, .. } => Some(field),
            RecordError::UnknownAttribute { attribute } => Some(attribute),
            RecordError::Malformed(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            RecordError::InvalidEnum { .. } => ErrorKind::InvalidEnum,
            RecordError::InvalidEmail { .. } => ErrorKind::InvalidEmail,
            RecordError::InvalidPhone { .. } => ErrorKind::InvalidPhone,
            RecordError::UnknownAttribute { .. } => ErrorKind::UnknownAttribute,
            RecordError::HashFailure { .. } => ErrorKind::HashFailure,
            RecordError::Malformed(_) => ErrorKind::Malformed,
        }
    }
}

/// A record rejected before dispatch, with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {index}: {error}")]
pub struct RecordFailure {
    /// 1-based source row index
    pub index: usize,
    /// Natural key of the record, when it could be read
    pub key: Option<String>,
    pub error: RecordError,
}

impl RecordFailure {
    pub fn new(index: usize, error: RecordError) -> Self {
        Self {
            index,
            key: None,
            error,
        }
    }

    pub fn with_key(mut self, key: Option<String>) -> Self {
        self.key = key;
        self
    }
}

/// Classification of a directory API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamKind {
    /// Connection refused, reset or otherwise broken transport
    Transport,
    Timeout,
    /// 5xx from the service
    Server,
    /// Per-second or per-user rate limit; worth retrying
    RateLimited,
    BadRequest,
    NotFound,
    AlreadyExists,
    Unauthorized,
    Forbidden,
    /// Daily or project quota; not worth retrying within this invocation
    QuotaExhausted,
}

impl UpstreamKind {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            UpstreamKind::Transport
                | UpstreamKind::Timeout
                | UpstreamKind::Server
                | UpstreamKind::RateLimited
        )
    }
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpstreamKind::Transport => "transport",
            UpstreamKind::Timeout => "timeout",
            UpstreamKind::Server => "server",
            UpstreamKind::RateLimited => "rate_limited",
            UpstreamKind::BadRequest => "bad_request",
            UpstreamKind::NotFound => "not_found",
            UpstreamKind::AlreadyExists => "already_exists",
            UpstreamKind::Unauthorized => "unauthorized",
            UpstreamKind::Forbidden => "forbidden",
            UpstreamKind::QuotaExhausted => "quota_exhausted",
        };
        f.write_str(s)
    }
}

/// A failure returned by the directory API gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UpstreamError {
    pub kind: UpstreamKind,
    /// HTTP status, when the failure came from a response
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn new(kind: UpstreamKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_transient()
    }
}

/// Kind of a per-record failure, as reported in outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidEnum,
    InvalidEmail,
    InvalidPhone,
    UnknownAttribute,
    HashFailure,
    Malformed,
    /// The payload reached the dispatcher without a natural key
    MissingKey,
    Upstream(UpstreamKind),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingRequiredField => write!(f, "missing_required_field"),
            ErrorKind::InvalidEnum => write!(f, "invalid_enum"),
            ErrorKind::InvalidEmail => write!(f, "invalid_email"),
            ErrorKind::InvalidPhone => write!(f, "invalid_phone"),
            ErrorKind::UnknownAttribute => write!(f, "unknown_attribute"),
            ErrorKind::HashFailure => write!(f, "hash_failure"),
            ErrorKind::Malformed => write!(f, "malformed"),
            ErrorKind::MissingKey => write!(f, "missing_key"),
            ErrorKind::Upstream(kind) => write!(f, "{kind}"),
        }
    }
}

/// A problem that prevents the tool from running at all.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("configuration file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("invalid configuration in {}: {message}", path.display())]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("no access token configured; set access_token or GMIN_ACCESS_TOKEN")]
    CredentialsMissing,

    #[error("failed to construct service: {0}")]
    ServiceConstruction(String),
}

/// Error returned by a batch command when nothing could be dispatched.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl BatchError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BatchError::Input(_) => 2,
            BatchError::Fatal(_) => 3,
        }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;

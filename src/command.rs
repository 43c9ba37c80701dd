//! Batch command facade.
//!
//! A `BatchCommand` is one (call type, object type) pair from the CLI
//! surface. Running it resolves the input and format, reads raw records,
//! builds payloads and hands them to a `Dispatcher`. Records the reader or
//! builder rejects are reported alongside dispatched ones, so the returned
//! outcomes cover every input record in source order.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{DirectoryApi, SheetSource};
use crate::builder::{self, BuildContext};
use crate::catalog::AttributeCatalog;
use crate::dispatch::{DEFAULT_CONCURRENCY, Dispatcher, Pacing, Submission};
use crate::error::{BatchError, InputError, Stage};
use crate::format::{self, FormatKind, ReadOutput, RecordLayout};
use crate::io::{InputProvider, InputSource, OperatorSink, StdoutSink, stdin_is_piped};
use crate::model::{CallType, ObjectType};
use crate::report::{BatchSummary, Outcome, Reporter};
use crate::retry::RetryPolicy;

/// Flags shared by every batch command.
#[derive(Debug, Clone, Default)]
pub struct BatchArgs {
    /// Input file path, or the spreadsheet id for `gsheet`
    pub input_file: Option<String>,
    pub format: Option<String>,
    /// A1 range for `gsheet` input
    pub sheet_range: Option<String>,
    /// Owning group for member batches
    pub group_key: Option<String>,
    /// Suppress operator lines; structured logs are unaffected
    pub silent: bool,
}

impl BatchArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, path: impl Into<String>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_sheet_range(mut self, range: impl Into<String>) -> Self {
        self.sheet_range = Some(range.into());
        self
    }

    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Collaborators and settings a batch runs with.
pub struct BatchContext {
    pub api: Arc<dyn DirectoryApi>,
    pub sheets: Option<Arc<dyn SheetSource>>,
    pub customer_id: String,
    pub retry: RetryPolicy,
    pub pacing: Pacing,
    pub concurrency: usize,
    pub sink: Arc<dyn OperatorSink>,
    /// Replaces process stdin when set
    pub stdin: Option<Arc<dyn InputProvider>>,
}

impl BatchContext {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            sheets: None,
            customer_id: "my_customer".to_string(),
            retry: RetryPolicy::default(),
            pacing: Pacing::default(),
            concurrency: DEFAULT_CONCURRENCY,
            sink: Arc::new(StdoutSink),
            stdin: None,
        }
    }

    pub fn with_sheets(mut self, sheets: Arc<dyn SheetSource>) -> Self {
        self.sheets = Some(sheets);
        self
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = customer_id.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn OperatorSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_stdin(mut self, stdin: Arc<dyn InputProvider>) -> Self {
        self.stdin = Some(stdin);
        self
    }

    fn reporter(&self, silent: bool) -> Reporter {
        if silent {
            Reporter::silent()
        } else {
            Reporter::new(Arc::clone(&self.sink))
        }
    }

    fn dispatcher(&self, reporter: Reporter) -> Dispatcher {
        Dispatcher::builder(Arc::clone(&self.api))
            .with_customer_id(self.customer_id.clone())
            .with_retry_policy(self.retry.clone())
            .with_pacing(self.pacing.clone())
            .with_concurrency(self.concurrency)
            .with_reporter(reporter)
            .build()
    }
}

/// Outcomes of one batch, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }
}

/// One batch entry point, identified by (call type, object type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchCommand {
    pub call: CallType,
    pub object: ObjectType,
}

impl fmt::Display for BatchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch-{} {}", self.call, self.object.noun())
    }
}

impl BatchCommand {
    /// Every batch command the CLI exposes.
    pub const ALL: [BatchCommand; 19] = [
        BatchCommand::new(CallType::Create, ObjectType::User),
        BatchCommand::new(CallType::Create, ObjectType::Group),
        BatchCommand::new(CallType::Create, ObjectType::Member),
        BatchCommand::new(CallType::Create, ObjectType::OrgUnit),
        BatchCommand::new(CallType::Delete, ObjectType::User),
        BatchCommand::new(CallType::Delete, ObjectType::Group),
        BatchCommand::new(CallType::Delete, ObjectType::Member),
        BatchCommand::new(CallType::Delete, ObjectType::OrgUnit),
        BatchCommand::new(CallType::Delete, ObjectType::MobileDevice),
        BatchCommand::new(CallType::Update, ObjectType::User),
        BatchCommand::new(CallType::Update, ObjectType::Group),
        BatchCommand::new(CallType::Update, ObjectType::Member),
        BatchCommand::new(CallType::Update, ObjectType::OrgUnit),
        BatchCommand::new(CallType::Update, ObjectType::ChromeOsDevice),
        BatchCommand::new(CallType::Manage, ObjectType::ChromeOsDevice),
        BatchCommand::new(CallType::Manage, ObjectType::MobileDevice),
        BatchCommand::new(CallType::Manage, ObjectType::GroupSettings),
        BatchCommand::new(CallType::Move, ObjectType::ChromeOsDevice),
        BatchCommand::new(CallType::Undelete, ObjectType::User),
    ];

    pub const fn new(call: CallType, object: ObjectType) -> Self {
        Self { call, object }
    }

    /// Look up a supported command.
    pub fn find(call: CallType, object: ObjectType) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.call == call && c.object == object)
    }

    pub fn accepted_formats(&self) -> &'static [FormatKind] {
        if self.call.is_key_only() {
            &[FormatKind::Text, FormatKind::GSheet]
        } else {
            &[FormatKind::Csv, FormatKind::Json, FormatKind::GSheet]
        }
    }

    pub fn default_format(&self) -> FormatKind {
        if self.call.is_key_only() {
            FormatKind::Text
        } else {
            FormatKind::Json
        }
    }

    /// Pick the format from the flag, else the file extension, else the default.
    pub fn resolve_format(&self, args: &BatchArgs) -> Result<FormatKind, InputError> {
        let format = match &args.format {
            Some(raw) => {
                FormatKind::from_str(raw).ok_or_else(|| InputError::UnknownFormat(raw.clone()))?
            }
            None => args
                .input_file
                .as_deref()
                .and_then(FormatKind::from_path)
                .unwrap_or_else(|| self.default_format()),
        };
        if !self.accepted_formats().contains(&format) {
            return Err(InputError::UnsupportedFormat {
                format,
                command: self.to_string(),
            });
        }
        Ok(format)
    }

    async fn read(
        &self,
        args: &BatchArgs,
        format: FormatKind,
        layout: &RecordLayout<'_>,
        ctx: &BatchContext,
    ) -> Result<ReadOutput, InputError> {
        if format == FormatKind::GSheet {
            let sheet_id = args
                .input_file
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or(InputError::MissingInput)?;
            let range = args
                .sheet_range
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or(InputError::MissingSheetRange)?;
            let sheets = ctx.sheets.as_ref().ok_or_else(|| InputError::Parse {
                stage: Stage::ResolveInput,
                target: sheet_id.to_string(),
                message: "no spreadsheet source configured".to_string(),
            })?;
            let rows = sheets
                .values(sheet_id, range)
                .await
                .map_err(|source| InputError::Sheet {
                    sheet_id: sheet_id.to_string(),
                    source,
                })?;
            debug!(sheet_id, range, rows = rows.len(), "fetched sheet range");
            return if self.call.is_key_only() {
                format::read_sheet_keys(&rows, layout)
            } else {
                format::read_sheet_rows(&rows, layout)
            };
        }

        match (&ctx.stdin, args.input_file.as_deref()) {
            (Some(stdin), None) => format::read_records(stdin.as_ref(), format, layout),
            _ => {
                let piped = ctx.stdin.is_some() || stdin_is_piped();
                let source = InputSource::resolve(args.input_file.as_deref(), piped)?;
                format::read_records(source.provider(), format, layout)
            }
        }
    }

    /// Run the batch with the process-wide catalog.
    pub async fn run(&self, args: &BatchArgs, ctx: &BatchContext) -> Result<BatchReport, BatchError> {
        self.run_with(AttributeCatalog::global(), args, ctx).await
    }

    pub async fn run_with(
        &self,
        catalog: &AttributeCatalog,
        args: &BatchArgs,
        ctx: &BatchContext,
    ) -> Result<BatchReport, BatchError> {
        let format = self.resolve_format(args)?;
        let layout = RecordLayout::new(self.object, self.call, catalog);
        let records = self.read(args, format, &layout, ctx).await?;

        if self.object.needs_customer_id() {
            debug!(customer_id = %ctx.customer_id, "using customer id");
        }

        let build_ctx = BuildContext {
            group_key: args.group_key.clone(),
        };
        let reporter = ctx.reporter(args.silent);

        let mut outcomes = Vec::new();
        let mut submissions = Vec::new();
        for record in records {
            let built = record.and_then(|raw| {
                builder::build_with(catalog, self.object, self.call, &raw, &build_ctx)
                    .map(|payload| Submission::new(raw.index, payload))
            });
            match built {
                Ok(submission) => submissions.push(submission),
                Err(failure) => {
                    let outcome = Outcome::rejected(self.object, self.call, &failure);
                    reporter.report(&outcome);
                    outcomes.push(outcome);
                }
            }
        }

        let dispatcher = ctx.dispatcher(reporter);
        outcomes.extend(dispatcher.dispatch(self.call, self.object, submissions).await);
        outcomes.sort_by_key(|o| o.index);

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            command = %self,
            format = %format,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        Ok(BatchReport { outcomes, summary })
    }
}

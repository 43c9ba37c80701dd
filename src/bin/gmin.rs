use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use gmin::api::http::{Endpoints, HttpGateway};
use gmin::cli::Cli;
use gmin::command::{BatchContext, BatchReport};
use gmin::config::GminConfig;
use gmin::error::{BatchError, FatalError};
use gmin::logging;

fn endpoints(config: &GminConfig) -> Endpoints {
    let defaults = Endpoints::default();
    Endpoints {
        directory: config.directory_base_url.clone().unwrap_or(defaults.directory),
        groups_settings: config
            .groups_settings_base_url
            .clone()
            .unwrap_or(defaults.groups_settings),
        sheets: config.sheets_base_url.clone().unwrap_or(defaults.sheets),
    }
}

async fn run(cli: &Cli, config: &GminConfig) -> Result<BatchReport, BatchError> {
    let (command, args) = cli.batch();

    let token = config.require_token()?;
    let pacing = config.pacing().map_err(|rule| FatalError::ConfigInvalid {
        path: cli.config.clone().unwrap_or_default(),
        message: format!("unknown pacing rule {}/{}", rule.object, rule.call),
    })?;
    let gateway = Arc::new(HttpGateway::new(token, &endpoints(config))?);

    let ctx = BatchContext::new(gateway.clone())
        .with_sheets(gateway)
        .with_customer_id(config.customer_id.clone())
        .with_retry_policy(config.retry_policy())
        .with_pacing(pacing)
        .with_concurrency(config.effective_concurrency());

    command.run(&args, &ctx).await
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn fail(err: BatchError) -> ExitCode {
    let code = err.exit_code();
    error!(error = %err, exit_code = code, "batch aborted");
    #[cfg(feature = "miette")]
    eprintln!("{:?}", miette::Report::from(err));
    #[cfg(not(feature = "miette"))]
    eprintln!("gmin: error - {err}");
    exit_code(code)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match GminConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(err.into()),
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    let directive =
        logging::filter_directive(cli.log_level.as_deref(), rust_log.as_deref(), &config.log_level);
    let _guard = match logging::init(&directive, config.log_path.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("gmin: error - cannot initialise logging: {err}");
            None
        }
    };

    match run(&cli, &config).await {
        Ok(report) => exit_code(report.exit_code()),
        Err(err) => fail(err),
    }
}

use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::args::{Command, LogFormat, ServeArgs, VolleyArgs};
use crate::error::{AppError, AppResult, HttpError};
use crate::prompt;
use crate::report::{FileSink, ReportSink};
use crate::run::{LoadTestConfig, RunOptions, run_load_test};
use crate::server::{self, ServerState};
use crate::shutdown_handlers::{
    setup_abort_signal_handler, setup_signal_shutdown_handler, shutdown_channel,
};
use crate::summary;

pub(crate) fn run() -> AppResult<()> {
    let args = VolleyArgs::parse();

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(mut args: VolleyArgs) -> AppResult<()> {
    if let Some(command) = args.command.take() {
        match command {
            Command::Serve(serve_args) => return run_serve(&serve_args).await,
        }
    }
    run_load(&args).await
}

async fn run_serve(serve_args: &ServeArgs) -> AppResult<()> {
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let listener = TcpListener::bind(("127.0.0.1", serve_args.port)).await?;
    let state = Arc::new(ServerState::new());
    server::serve(listener, state, shutdown_rx).await?;

    drop(shutdown_tx.send(()));
    drop(signal_handle.await);
    Ok(())
}

async fn run_load(args: &VolleyArgs) -> AppResult<()> {
    crate::banner::print_cli_banner(args.no_color);

    let interactive = args.url.is_none();
    let (config, interval) = resolve_run(args)?;

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let abort_handle = setup_abort_signal_handler(&shutdown_tx, args.no_color);

    let client = reqwest::Client::builder()
        .timeout(args.request_timeout)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

    let sink = open_log_sink(&args.log_file, args.log_format);

    info!(
        "Dispatching {} {} request(s) to {}",
        config.requests,
        config.method.as_str(),
        config.url
    );

    let options = RunOptions {
        interval,
        max_in_flight: args.max_in_flight,
        no_color: args.no_color,
        quiet: false,
    };
    let summary_result = run_load_test(&client, &Arc::new(config), &options, sink).await;

    // Stand the abort handler down so a signal arriving after the run no
    // longer terminates the process.
    drop(shutdown_tx.send(()));
    drop(abort_handle.await);

    summary::print_summary(&summary_result, args.no_color);

    if interactive {
        let stdin = std::io::stdin();
        let mut input = BufReader::new(stdin.lock());
        let mut output = std::io::stdout();
        summary::wait_for_acknowledgment(&mut input, &mut output)?;
    }

    Ok(())
}

fn resolve_run(args: &VolleyArgs) -> AppResult<(LoadTestConfig, Duration)> {
    if let Some(url) = args.url.as_deref() {
        let data = args.data.clone().map(String::into_bytes);
        let config =
            LoadTestConfig::new(url, args.requests, args.method, data).map_err(AppError::from)?;
        return Ok((config, args.interval));
    }

    let stdin = std::io::stdin();
    let mut input = BufReader::new(stdin.lock());
    let mut output = std::io::stdout();
    let prompted = prompt::collect_run(&mut input, &mut output, args.no_color)?;
    Ok((prompted.config, prompted.interval))
}

/// The run log is best-effort: a sink that cannot be opened is reported and
/// skipped rather than blocking the run.
fn open_log_sink(path: &str, format: LogFormat) -> Option<Arc<dyn ReportSink>> {
    match FileSink::open(Path::new(path), format) {
        Ok(sink) => Some(Arc::new(sink)),
        Err(err) => {
            warn!("Continuing without a run log: {}", err);
            None
        }
    }
}

//! The paced dispatcher.
//!
//! One task is spawned per request index, eagerly. With no pacing interval
//! every task is in flight at once; there is deliberately no implicit
//! concurrency cap, though callers can opt into a bounded in-flight window
//! via `max_in_flight`.

mod executor;


use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::time::{Instant, interval};
use tracing::warn;
use url::Url;

use crate::args::HttpMethod;
use crate::error::HttpError;
use crate::metrics::{RunCounters, RunSummary};
use crate::report::ReportSink;

/// Immutable description of one load-test run, shared read-only by every
/// dispatched task.
#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub url: Url,
    pub requests: u64,
    pub method: HttpMethod,
    pub data: Option<Vec<u8>>,
}

impl LoadTestConfig {
    /// # Errors
    ///
    /// Returns an error if `url` is not a valid URL.
    pub fn new(
        url: &str,
        requests: u64,
        method: HttpMethod,
        data: Option<Vec<u8>>,
    ) -> Result<Self, HttpError> {
        let url = Url::parse(url).map_err(|err| HttpError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })?;
        Ok(Self {
            url,
            requests,
            method,
            data,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Fixed wait between dispatches; zero means unpaced.
    pub interval: Duration,
    /// Optional cap on simultaneously in-flight requests.
    pub max_in_flight: Option<usize>,
    pub no_color: bool,
    /// Suppress per-request console lines (the log sink still sees them).
    pub quiet: bool,
}

/// Dispatch `config.requests` tasks, wait for all of them, and return the
/// aggregate result.
///
/// Individual request failures are absorbed into the counters and never
/// surface here; this function cannot fail. The join barrier guarantees
/// every task's counter update has landed before the summary is taken.
pub async fn run_load_test(
    client: &Client,
    config: &Arc<LoadTestConfig>,
    options: &RunOptions,
    sink: Option<Arc<dyn ReportSink>>,
) -> RunSummary {
    if config.requests == 0 {
        return RunSummary::zero();
    }

    let start = Instant::now();
    let counters = Arc::new(RunCounters::new());
    let limiter = options
        .max_in_flight
        .map(|cap| Arc::new(Semaphore::new(cap)));

    let mut ticker = (options.interval > Duration::ZERO).then(|| interval(options.interval));
    // The first tick of a fresh interval completes immediately; consume it
    // so pacing starts after the first dispatch, not before it.
    if let Some(ticker) = ticker.as_mut() {
        ticker.tick().await;
    }

    let capacity = usize::try_from(config.requests).unwrap_or_default();
    let mut handles = Vec::with_capacity(capacity);
    for index in 1..=config.requests {
        let task = executor::RequestTask {
            client: client.clone(),
            config: Arc::clone(config),
            counters: Arc::clone(&counters),
            sink: sink.clone(),
            limiter: limiter.clone(),
            index,
            no_color: options.no_color,
            quiet: options.quiet,
        };
        handles.push(tokio::spawn(task.execute()));

        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
    }

    for handle in handles {
        if let Err(err) = handle.await {
            warn!("Request task failed to join: {}", err);
        }
    }

    counters.summarize(start.elapsed())
}

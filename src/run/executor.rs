use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::time::Instant;

use crate::metrics::RunCounters;
use crate::report::{ReportRecord, ReportSink, print_record};

use super::LoadTestConfig;

/// One dispatched request. Exactly one outcome per invocation: a transport
/// failure records a failure, anything that produced a status line records
/// a success (non-2xx included). The executor never retries and never
/// raises an error to the dispatcher.
pub(super) struct RequestTask {
    pub(super) client: Client,
    pub(super) config: Arc<LoadTestConfig>,
    pub(super) counters: Arc<RunCounters>,
    pub(super) sink: Option<Arc<dyn ReportSink>>,
    pub(super) limiter: Option<Arc<Semaphore>>,
    pub(super) index: u64,
    pub(super) no_color: bool,
    pub(super) quiet: bool,
}

impl RequestTask {
    pub(super) async fn execute(self) {
        // With a bounded window the task starts immediately but holds off
        // sending until a permit frees up. The semaphore is never closed.
        let _permit = match self.limiter.as_ref() {
            Some(limiter) => Arc::clone(limiter).acquire_owned().await.ok(),
            None => None,
        };

        let start = Instant::now();
        let outcome = send_request(&self.client, &self.config).await;
        let elapsed = start.elapsed();

        let record = match outcome {
            Ok(response) => {
                self.counters.record_success();
                ReportRecord::success(
                    self.index,
                    elapsed,
                    response.status,
                    response.headers,
                    response.body_bytes,
                )
            }
            Err(err) => {
                self.counters.record_failure();
                ReportRecord::failure(self.index, elapsed, err.to_string())
            }
        };

        if !self.quiet {
            print_record(&record, self.no_color);
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.append(&record);
        }
    }
}

struct ResponseSummary {
    status: u16,
    headers: Vec<(String, String)>,
    body_bytes: u64,
}

async fn send_request(
    client: &Client,
    config: &LoadTestConfig,
) -> Result<ResponseSummary, reqwest::Error> {
    let mut request = client.request(config.method.to_method(), config.url.clone());
    if let Some(data) = config.data.as_ref() {
        request = request.body(data.clone());
    }

    let response = request.send().await?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body_bytes = drain_response_body(response).await?;

    Ok(ResponseSummary {
        status,
        headers,
        body_bytes,
    })
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

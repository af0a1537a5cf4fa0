//! Per-request report records and the sinks that consume them.

mod console;
mod file;

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

pub use console::{paint, print_record};
pub use file::FileSink;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// Human-readable outcome of one request, written to the console and the
/// run log. Elapsed time covers request construction through completion.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub index: u64,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportRecord {
    #[must_use]
    pub fn success(
        index: u64,
        elapsed: Duration,
        status: u16,
        headers: Vec<(String, String)>,
        response_bytes: u64,
    ) -> Self {
        Self {
            index,
            outcome: Outcome::Success,
            elapsed_ms: elapsed_millis(elapsed),
            status: Some(status),
            headers,
            response_bytes: Some(response_bytes),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(index: u64, elapsed: Duration, error: String) -> Self {
        Self {
            index,
            outcome: Outcome::Failure,
            elapsed_ms: elapsed_millis(elapsed),
            status: None,
            headers: Vec::new(),
            response_bytes: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    #[must_use]
    pub fn text_line(&self) -> String {
        match self.outcome {
            Outcome::Success => {
                let headers = self
                    .headers
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect::<Vec<_>>()
                    .join("; ");
                format!(
                    "Request {} completed in {}ms | status {} | {} body bytes | headers: {}",
                    self.index,
                    self.elapsed_ms,
                    self.status.unwrap_or(0),
                    self.response_bytes.unwrap_or(0),
                    headers
                )
            }
            Outcome::Failure => format!(
                "Request {} failed after {}ms: {}",
                self.index,
                self.elapsed_ms,
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Append-only destination for report records. Injected into the run so
/// tests can substitute an in-memory sink; appends are best-effort and
/// must never fail the run.
pub trait ReportSink: Send + Sync {
    fn append(&self, record: &ReportRecord);
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ReportRecord>>,
}

impl MemorySink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn records(&self) -> Vec<ReportRecord> {
        self.records
            .lock()
            .map_or_else(|_poisoned| Vec::new(), |guard| guard.clone())
    }
}

impl ReportSink for MemorySink {
    fn append(&self, record: &ReportRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

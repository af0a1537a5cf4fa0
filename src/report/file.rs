use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use crate::args::LogFormat;
use crate::error::SinkError;

use super::{ReportRecord, ReportSink};

/// Append-only run log. Opened once per run, never truncated, flushed per
/// write so an interrupted run leaves every completed line on disk.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
    format: LogFormat,
}

impl FileSink {
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened or created.
    pub fn open(path: &Path, format: LogFormat) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|err| SinkError::OpenLogFile {
                path: path.to_path_buf(),
                source: err,
            })?;
        Ok(Self {
            file: Mutex::new(file),
            format,
        })
    }

    fn write_record(&self, record: &ReportRecord) -> Result<(), SinkError> {
        let line = match self.format {
            LogFormat::Text => format!(
                "{} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.text_line()
            ),
            LogFormat::Jsonl => serde_json::to_string(record)
                .map_err(|err| SinkError::SerializeRecord { source: err })?,
        };

        // Lock is only poisoned if another append panicked; drop the line.
        let Ok(mut file) = self.file.lock() else {
            return Ok(());
        };
        file.write_all(line.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .and_then(|()| file.flush())
            .map_err(|err| SinkError::WriteLogFile { source: err })
    }
}

impl ReportSink for FileSink {
    fn append(&self, record: &ReportRecord) {
        if let Err(err) = self.write_record(record) {
            warn!("Failed to append report line: {}", err);
        }
    }
}

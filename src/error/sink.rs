use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to open log file '{path}': {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to append to log file: {source}")]
    WriteLogFile {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize report record: {source}")]
    SerializeRecord {
        #[source]
        source: serde_json::Error,
    },
}

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::parsers::parse_duration_arg;
use super::types::{HttpMethod, LogFormat};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the local demo server used to exercise the load generator
    Serve(ServeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Port to bind on 127.0.0.1
    #[arg(long, short, default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Paced HTTP load generation - fire N requests at a target URL with optional fixed-interval pacing and an append-only run log."
)]
pub struct VolleyArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL for the load test (prompts interactively when omitted)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Number of requests to send
    #[arg(long = "requests", short = 'n', default_value_t = 1)]
    pub requests: u64,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Request body data (for POST/PUT)
    #[arg(long, short)]
    pub data: Option<String>,

    /// Fixed wait between dispatches (supports ms/s/m/h; 0 = fire as fast as possible)
    #[arg(long, default_value = "0ms", value_parser = parse_duration_arg)]
    pub interval: Duration,

    /// Cap on simultaneously in-flight requests (default: unbounded)
    #[arg(long = "max-in-flight")]
    pub max_in_flight: Option<usize>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Append per-request report lines to this file (created if absent, never truncated)
    #[arg(
        long = "log-file",
        default_value = "request_logs.txt",
        env = "VOLLEY_LOG_FILE"
    )]
    pub log_file: String,

    /// Report line format for the log file
    #[arg(long = "log-format", default_value = "text", ignore_case = true)]
    pub log_format: LogFormat,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

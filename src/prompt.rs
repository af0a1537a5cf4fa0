//! Interactive collection of run parameters, used when `--url` is absent.
//!
//! Mirrors the flag-driven configuration surface: url, request count,
//! method, optional body, pacing interval. Invalid numeric input aborts
//! before any request is dispatched.

use std::io::{BufRead, Write};
use std::time::Duration;

use crossterm::style::Color;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, ValidationError};
use crate::report::paint;
use crate::run::LoadTestConfig;

pub(crate) struct PromptedRun {
    pub(crate) config: LoadTestConfig,
    pub(crate) interval: Duration,
}

pub(crate) fn collect_run<R, W>(
    input: &mut R,
    output: &mut W,
    no_color: bool,
) -> AppResult<PromptedRun>
where
    R: BufRead,
    W: Write,
{
    let url = ask(input, output, "Please enter the URL to load test: ", no_color)?;

    let requests: u64 = ask(
        input,
        output,
        "Please enter the number of requests to send: ",
        no_color,
    )?
    .parse()
    .map_err(|err| AppError::validation(ValidationError::InvalidRequestCount { source: err }))?;

    let method: HttpMethod = ask(
        input,
        output,
        "Please enter the HTTP method to use (GET/POST/PUT/PATCH/DELETE): ",
        no_color,
    )?
    .parse()
    .map_err(AppError::validation)?;

    let wants_data = ask(
        input,
        output,
        "Do you want to send a request body? (y/n): ",
        no_color,
    )?;
    let data = if matches!(wants_data.as_str(), "y" | "Y") {
        let body = ask(input, output, "Please enter the data to send: ", no_color)?;
        if body.is_empty() {
            None
        } else {
            Some(body.into_bytes())
        }
    } else {
        None
    };

    let interval_ms: u64 = ask(
        input,
        output,
        "Please enter the pacing interval in milliseconds (0 for none): ",
        no_color,
    )?
    .parse()
    .map_err(|err| AppError::validation(ValidationError::InvalidIntervalMillis { source: err }))?;

    let config = LoadTestConfig::new(&url, requests, method, data).map_err(AppError::from)?;
    Ok(PromptedRun {
        config,
        interval: Duration::from_millis(interval_ms),
    })
}

fn ask<R, W>(input: &mut R, output: &mut W, prompt: &str, no_color: bool) -> AppResult<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", paint(prompt, Color::Yellow, no_color))?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

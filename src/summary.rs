use std::io::{BufRead, Write};

use crossterm::style::Color;

use crate::error::AppResult;
use crate::metrics::RunSummary;
use crate::report::paint;

/// Milliseconds per second, for formatted durations.
const MS_PER_SEC: u64 = 1_000;

/// Each line carries its own color so the print path cannot drift out of
/// sync with the line ordering.
pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<(String, Option<Color>)> {
    let duration_ms = u64::try_from(summary.duration.as_millis()).unwrap_or(u64::MAX);
    vec![
        (
            format!(
                "Load test completed in {}.{:03}s",
                duration_ms / MS_PER_SEC,
                duration_ms % MS_PER_SEC
            ),
            Some(Color::Green),
        ),
        (format!("Total Requests: {}", summary.total_requests), None),
        (
            format!("Successful Requests: {}", summary.successful_requests),
            Some(Color::Green),
        ),
        (
            format!("Failed Requests: {}", summary.failed_requests),
            Some(Color::Red),
        ),
    ]
}

pub(crate) fn print_summary(summary: &RunSummary, no_color: bool) {
    for (line, color) in summary_lines(summary) {
        match color {
            Some(color) => println!("{}", paint(&line, color, no_color)),
            None => println!("{line}"),
        }
    }
}

/// Interactive runs pause for ENTER so the summary is not lost when the
/// terminal window closes with the process.
pub(crate) fn wait_for_acknowledgment<R, W>(input: &mut R, output: &mut W) -> AppResult<()>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Press ENTER to exit...")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    writeln!(output, "Exiting.")?;
    Ok(())
}

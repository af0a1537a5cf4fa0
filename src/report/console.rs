use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

use super::ReportRecord;

fn use_color(no_color: bool) -> bool {
    !no_color && std::io::stdout().is_terminal()
}

/// Color `text` for terminal output, or pass it through untouched.
#[must_use]
pub fn paint(text: &str, color: Color, no_color: bool) -> String {
    if use_color(no_color) {
        format!("{}", text.with(color))
    } else {
        text.to_owned()
    }
}

pub fn print_record(record: &ReportRecord, no_color: bool) {
    let color = if record.is_success() {
        Color::Green
    } else {
        Color::Red
    };
    println!("{}", paint(&record.text_line(), color, no_color));
}

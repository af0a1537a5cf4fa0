use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

const BANNER_LINES: [&str; 6] = [
    "██╗   ██╗ ██████╗ ██╗     ██╗     ███████╗██╗   ██╗",
    "██║   ██║██╔═══██╗██║     ██║     ██╔════╝╚██╗ ██╔╝",
    "██║   ██║██║   ██║██║     ██║     █████╗   ╚████╔╝ ",
    "╚██╗ ██╔╝██║   ██║██║     ██║     ██╔══╝    ╚██╔╝  ",
    " ╚████╔╝ ╚██████╔╝███████╗███████╗███████╗   ██║   ",
    "  ╚═══╝   ╚═════╝ ╚══════╝╚══════╝╚══════╝   ╚═╝   ",
];

pub(crate) fn print_cli_banner(no_color: bool) {
    let use_color = !no_color && std::io::stdout().is_terminal();
    for line in BANNER_LINES {
        if use_color {
            println!("{}", line.with(Color::Yellow));
        } else {
            println!("{line}");
        }
    }

    let description = format!(
        "volley v{} | {} | HTTP load generation",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE")
    );
    if use_color {
        println!("{}", description.with(Color::DarkYellow));
    } else {
        println!("{description}");
    }
    println!();
}

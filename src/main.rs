mod args;
mod banner;
mod entry;
mod error;
mod logger;
mod metrics;
mod prompt;
mod report;
mod run;
mod server;
mod shutdown;
mod shutdown_handlers;
mod summary;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}

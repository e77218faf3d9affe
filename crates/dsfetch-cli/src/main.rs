use dsfetch_core::logging;

mod cli;

use crate::cli::report::is_reported;
use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        if !is_reported(&err) {
            eprintln!("dsfetch error: {:#}", err);
        }
        std::process::exit(1);
    }
}

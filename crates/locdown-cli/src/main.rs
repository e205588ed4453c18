use locdown_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() -> ExitCode {
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // No process::exit here: runtime drop must let blocking transfers clean up.
    match CliCommand::run_from_args().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("locdown error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

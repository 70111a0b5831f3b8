//! regsim - Course-registration simulation in the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = regsim::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

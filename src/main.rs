//! Dojo CLI - Coding-challenge problems as local source files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = dojo_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

//! ticktidy - Keeps markdown checklists sorted by completion status

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ticktidy::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

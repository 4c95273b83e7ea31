//! stack-status entry point
//!
//! Parses arguments, runs the selected command, and exits non-zero with the
//! error on stderr if the command fails. All logic lives in the cli module.

use stack_status::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

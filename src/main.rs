//! Binary entrypoint for the `drover` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Credentials (ANTHROPIC_API_KEY) may live in a local .env file.
    let _ = dotenvy::dotenv();

    match drover::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

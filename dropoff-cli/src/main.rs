//! Entry point for the `dropoff` command-line interface.
#![forbid(unsafe_code)]

use dropoff_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    match dropoff_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("dropoff: {err}");
            std::process::exit(1);
        }
    }
}

//! Drawables - Command-line tool for turning images into Starbound drawables

use std::process::ExitCode;

use drawables::cli;

fn main() -> ExitCode {
    cli::run()
}

mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    platform::logging::initialize(cli.log_destination(), cli.log_level());

    match platform::commands::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("magnet error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

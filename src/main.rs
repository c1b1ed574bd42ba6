use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use worktimer_lib::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match worktimer_lib::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The subscriber may not be installed if its setup was what failed.
            let _ = writeln!(io::stderr().lock(), "error: {e}");
            ExitCode::FAILURE
        }
    }
}

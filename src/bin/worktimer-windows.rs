//! Lists open window titles, one per line, in the form the watch list expects.
//!
//! Pick titles from this output and pass them to `worktimer --watch`.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use worktimer_lib::{
    logging,
    platform::{unique_window_titles, ActiveWindowProbe, NativeProbe},
};

#[derive(Debug, Parser)]
#[command(name = "worktimer-windows", version, about = "List open window titles")]
struct Args {
    /// Print only the focused window's title
    #[arg(short, long)]
    focused: bool,

    /// Log level for worktimer's own logs
    #[arg(long)]
    log_level: Option<String>,
}

fn run(args: &Args) -> Result<(), worktimer_lib::error::AppError> {
    logging::init(args.log_level.as_deref())?;
    let probe = NativeProbe::new();
    let mut out = io::stdout().lock();

    if args.focused {
        writeln!(out, "{}", probe.current_focused_title())?;
    } else {
        for title in unique_window_titles(&probe) {
            writeln!(out, "{title}")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The subscriber may not be installed if its setup was what failed.
            let _ = writeln!(io::stderr().lock(), "error: {e}");
            ExitCode::FAILURE
        }
    }
}

mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod platform;
#[cfg(test)]
mod test_utils;
pub mod tracker;
pub mod validation;

use crate::commands::{Controller, Flow, HELP};
use crate::config::{default_config_path, AppConfig};
use crate::error::AppError;
use crate::overlay::ClockDisplay;
use crate::platform::{ActiveWindowProbe, NativeProbe};
use crate::tracker::{TimerLoop, TrackingTimer, WatchListSource};
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Track how long the watched windows have focus.
#[derive(Debug, Parser)]
#[command(name = "worktimer", version, about)]
pub struct Cli {
    /// Window title to watch (repeat up to 3 times; replaces the config list)
    #[arg(short, long = "watch", value_name = "TITLE")]
    pub watch: Vec<String>,

    /// Tick period in milliseconds
    #[arg(short, long)]
    pub period_ms: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level for worktimer's own logs (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => AppConfig::load(&path)?,
        None => {
            warn!("Could not determine config directory, using defaults");
            AppConfig::default()
        }
    };
    Ok(config.with_overrides(cli.watch.clone(), cli.period_ms))
}

/// Run the terminal front end until `q` or end of input.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    logging::init(cli.log_level.as_deref())?;

    let config = load_config(cli)?;
    let watch_list = config.build_watch_list()?.into_shared();
    if config.watch_list.is_empty() {
        warn!("Watch list is empty; add titles with 'a <title>'");
    }

    let mut timer = TrackingTimer::new(NativeProbe::new());
    timer.connect_watch_list(Arc::clone(&watch_list) as Arc<dyn WatchListSource>);
    let display = Arc::new(Mutex::new(ClockDisplay::new(io::stdout())));
    overlay::attach(&mut timer, &display);

    let timer_loop = TimerLoop::spawn(timer)?;
    let handle = timer_loop.handle();
    let period_ms = config.period_ms_signed();
    handle.start(period_ms)?;

    let probe: Arc<dyn ActiveWindowProbe> = Arc::new(NativeProbe::new());
    let mut controller = Controller::new(handle, watch_list, probe, period_ms, true);

    let mut out = io::stdout();
    writeln!(out, "{HELP}")?;
    for line in io::stdin().lock().lines() {
        if controller.handle_line(&line?, &mut out)? == Flow::Quit {
            break;
        }
    }

    let timer = timer_loop.join()?;
    writeln!(out)?;
    info!("Tracked {} of focus time", timer.session().clock());
    Ok(())
}

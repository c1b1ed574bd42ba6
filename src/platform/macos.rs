use super::script::run_with_timeout;
use super::types::non_blank_titles;
use super::ActiveWindowProbe;
use crate::constants::OSASCRIPT_TIMEOUT_MS;
use crate::error::ProbeError;
use log::debug;
use std::time::Duration;

const OSASCRIPT: &str = "osascript";

const FOCUSED_TITLE_SCRIPT: &str = r#"
tell application "System Events"
    set frontApp to name of first application process whose frontmost is true
end tell
tell application frontApp
    set windowTitle to name of front window
end tell
return frontApp & " - " & windowTitle
"#;

const OPEN_TITLES_SCRIPT: &str = r#"
tell application "System Events"
    set window_list to ""
    repeat with proc in application processes
        repeat with win in (every window of proc)
            set window_list to window_list & (name of proc & " - " & name of win & linefeed)
        end repeat
    end repeat
end tell
return window_list
"#;

/// Probe that asks System Events through `osascript`.
///
/// Both queries report `"<app> - <window>"`, so a title picked from the open
/// window list matches the focused title for the same window.
///
/// Needs the Automation permission for System Events; without it every query
/// fails and the probe reports nothing.
#[derive(Debug, Clone)]
pub struct MacOSProbe {
    timeout: Duration,
}

impl Default for MacOSProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MacOSProbe {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(OSASCRIPT_TIMEOUT_MS),
        }
    }

    fn run(&self, script: &str) -> Result<String, ProbeError> {
        run_with_timeout(OSASCRIPT, &["-e", script], self.timeout)
    }
}

impl ActiveWindowProbe for MacOSProbe {
    fn current_focused_title(&self) -> String {
        match self.run(FOCUSED_TITLE_SCRIPT) {
            Ok(out) => out.trim().to_string(),
            Err(e) => {
                debug!("Focused window query failed: {e}");
                String::new()
            }
        }
    }

    fn all_open_window_titles(&self) -> Vec<String> {
        match self.run(OPEN_TITLES_SCRIPT) {
            Ok(out) => non_blank_titles(out.lines().map(str::to_string)),
            Err(e) => {
                debug!("Window enumeration failed: {e}");
                Vec::new()
            }
        }
    }
}

pub mod scripted;
pub mod types;

#[cfg_attr(
    not(target_os = "macos"),
    allow(dead_code, reason = "only the osascript probe shells out")
)]
mod script;

pub use scripted::ScriptedProbe;
pub use types::ActiveWindowProbe;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub use macos::MacOSProbe as NativeProbe;

#[cfg(target_os = "linux")]
pub use linux::LinuxProbe as NativeProbe;

#[cfg(target_os = "windows")]
pub use self::windows::WindowsProbe as NativeProbe;

/// Probe for platforms without window inspection support. Reports nothing.
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProbe;

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
impl NativeProbe {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
impl ActiveWindowProbe for NativeProbe {
    fn current_focused_title(&self) -> String {
        String::new()
    }

    fn all_open_window_titles(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Open window titles with duplicates removed, sorted for display.
pub fn unique_window_titles(probe: &dyn ActiveWindowProbe) -> Vec<String> {
    let mut titles = probe.all_open_window_titles();
    titles.sort();
    titles.dedup();
    titles
}

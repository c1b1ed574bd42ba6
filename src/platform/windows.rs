#![allow(unsafe_code, reason = "Win32 window queries are FFI calls")]

use super::types::non_blank_titles;
use super::ActiveWindowProbe;
use ::windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use ::windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
};

/// Probe backed by the Win32 window manager APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProbe;

impl WindowsProbe {
    pub fn new() -> Self {
        Self
    }
}

fn window_title(hwnd: HWND) -> String {
    if hwnd.is_invalid() {
        return String::new();
    }

    // SAFETY: `hwnd` came from the window manager; a stale handle just yields 0.
    let length = unsafe { GetWindowTextLengthW(hwnd) };
    let Ok(length) = usize::try_from(length) else {
        return String::new();
    };
    if length == 0 {
        return String::new();
    }

    let mut buffer: Vec<u16> = vec![0; length + 1];
    // SAFETY: the buffer is sized for the reported length plus the terminator.
    let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) };
    let Ok(copied) = usize::try_from(copied) else {
        return String::new();
    };
    buffer.truncate(copied);
    String::from_utf16_lossy(&buffer).trim().to_string()
}

#[allow(clippy::as_conversions, reason = "LPARAM carries a pointer to the collector")]
unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: `lparam` is the `&mut Vec<HWND>` passed by `visible_windows` and
    // outlives the EnumWindows call.
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };
    // SAFETY: plain query on a handle supplied by EnumWindows.
    if unsafe { IsWindowVisible(hwnd) }.as_bool() {
        windows.push(hwnd);
    }
    TRUE
}

#[allow(clippy::as_conversions, reason = "LPARAM carries a pointer to the collector")]
fn visible_windows() -> Vec<HWND> {
    let mut windows: Vec<HWND> = Vec::new();
    // SAFETY: the callback only touches `windows`, which lives across the call.
    let result = unsafe {
        EnumWindows(
            Some(collect_window),
            LPARAM(std::ptr::addr_of_mut!(windows) as isize),
        )
    };
    if let Err(e) = result {
        log::debug!("EnumWindows failed: {e}");
    }
    windows
}

impl ActiveWindowProbe for WindowsProbe {
    fn current_focused_title(&self) -> String {
        // SAFETY: no preconditions; returns a null handle when nothing has focus.
        window_title(unsafe { GetForegroundWindow() })
    }

    fn all_open_window_titles(&self) -> Vec<String> {
        non_blank_titles(visible_windows().into_iter().map(window_title))
    }
}

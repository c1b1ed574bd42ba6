use super::ActiveWindowProbe;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Probe that replays a fixed sequence of focused titles, one per query.
///
/// Once the script runs out every query reports no focus. Useful for demos and
/// for driving a timer deterministically.
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    focused: Mutex<VecDeque<String>>,
    open: Vec<String>,
}

impl ScriptedProbe {
    pub fn new<I, S>(focused: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            focused: Mutex::new(focused.into_iter().map(Into::into).collect()),
            open: Vec::new(),
        }
    }

    /// Set the titles reported by `all_open_window_titles`.
    #[must_use]
    pub fn with_open_windows<I, S>(mut self, open: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.open = open.into_iter().map(Into::into).collect();
        self
    }

    /// Titles not yet handed out.
    pub fn remaining(&self) -> usize {
        self.focused
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

impl ActiveWindowProbe for ScriptedProbe {
    fn current_focused_title(&self) -> String {
        self.focused
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default()
    }

    fn all_open_window_titles(&self) -> Vec<String> {
        super::types::non_blank_titles(self.open.iter().cloned())
    }
}

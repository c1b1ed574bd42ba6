use crate::constants::MAX_WATCH_LIST_LEN;
use crate::error::AppError;
use crate::tracker::WatchListSource;
use crate::validation::validate_window_title;
use log::warn;
use std::sync::{Arc, Mutex};

/// Watch list shared between the front end (writer) and the timer (reader).
pub type SharedWatchList = Arc<Mutex<WatchList>>;

/// Ordered, duplicate-free list of window titles to track.
///
/// Holds at most [`MAX_WATCH_LIST_LEN`] entries. Membership is exact string
/// equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    titles: Vec<String>,
}

impl WatchList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from configured titles, rejecting anything `add` would reject.
    pub fn try_from_titles<I, S>(titles: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for title in titles {
            list.add(title.as_ref())?;
        }
        Ok(list)
    }

    /// Append a title. The title is trimmed first.
    pub fn add(&mut self, title: &str) -> Result<(), AppError> {
        let title = validate_window_title(title)?;
        if self.contains(title) {
            return Err(AppError::AlreadyExists {
                title: title.to_string(),
            });
        }
        if self.titles.len() >= MAX_WATCH_LIST_LEN {
            return Err(AppError::WatchListFull {
                capacity: MAX_WATCH_LIST_LEN,
            });
        }
        self.titles.push(title.to_string());
        Ok(())
    }

    pub fn remove(&mut self, title: &str) -> Result<(), AppError> {
        let title = title.trim();
        let idx = self
            .titles
            .iter()
            .position(|t| t == title)
            .ok_or_else(|| AppError::NotFound {
                title: title.to_string(),
            })?;
        self.titles.remove(idx);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.titles.clear();
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.titles.len() >= MAX_WATCH_LIST_LEN
    }

    pub fn into_shared(self) -> SharedWatchList {
        Arc::new(Mutex::new(self))
    }
}

impl WatchListSource for WatchList {
    fn contains(&self, title: &str) -> bool {
        WatchList::contains(self, title)
    }
}

impl WatchListSource for Mutex<WatchList> {
    fn contains(&self, title: &str) -> bool {
        match self.lock() {
            Ok(list) => list.contains(title),
            Err(poisoned) => {
                warn!("WatchList: mutex was poisoned, recovering");
                poisoned.into_inner().contains(title)
            }
        }
    }
}

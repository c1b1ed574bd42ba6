/// Reports which window has focus and which windows are open.
///
/// Implementations must not block for long and must never fail: anything the
/// OS cannot answer comes back as an empty title or an empty list.
pub trait ActiveWindowProbe: Send + Sync {
    /// Title of the focused window, or `""` when undeterminable.
    fn current_focused_title(&self) -> String;

    /// Titles of all open windows. Blank titles are dropped; duplicates are kept.
    fn all_open_window_titles(&self) -> Vec<String>;
}

impl<P: ActiveWindowProbe + ?Sized> ActiveWindowProbe for Box<P> {
    fn current_focused_title(&self) -> String {
        (**self).current_focused_title()
    }

    fn all_open_window_titles(&self) -> Vec<String> {
        (**self).all_open_window_titles()
    }
}

/// Drop blank entries from a raw window list.
pub(crate) fn non_blank_titles<I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    titles
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect()
}

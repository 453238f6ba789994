//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Text editing inside the search box bypasses this mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Search form
    /// Move focus to the search input. Default: / or i
    FocusInput,
    /// Submit the typed query. Default: Enter (while typing)
    SubmitSearch,
    /// Leave the search input without submitting. Default: Esc
    CancelInput,
    /// Switch between Repositories and Users. Default: t
    ToggleSearchType,

    // Result navigation
    /// Select the next result. Default: j/↓
    SelectNext,
    /// Select the previous result. Default: k/↑
    SelectPrev,
    /// Move selection down by a page. Default: Ctrl+d/Page Down
    PageDown,
    /// Move selection up by a page. Default: Ctrl+u/Page Up
    PageUp,
    /// Jump to the first result. Default: g/Home
    SelectFirst,
    /// Jump to the last loaded result. Default: G/End
    SelectLast,
    /// Reveal more results, fetching pages as needed. Default: m
    LoadMore,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Retry the last failed fetch. Default: r
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn actions_are_hashable_and_distinct() {
        let set: HashSet<KeyAction> = [
            KeyAction::SelectNext,
            KeyAction::SelectPrev,
            KeyAction::LoadMore,
            KeyAction::SelectNext,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn load_more_not_equals_refresh() {
        assert_ne!(KeyAction::LoadMore, KeyAction::Refresh);
    }
}

//! Layout dimension constants for TUI rendering.

/// Title line plus subtitle.
pub const HEADER_HEIGHT: u16 = 2;

/// Type selector line plus the bordered input box.
pub const SEARCH_FORM_HEIGHT: u16 = 4;

/// Single line for key hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Results heading ("N Repositories found").
pub const RESULT_HEADER_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
